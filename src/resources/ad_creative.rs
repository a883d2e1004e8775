use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{string_or_number, Resource};
use crate::client::FacebookClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdCreative {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub object_story_spec: Option<Value>,
    pub object_type: Option<String>,
    pub thumbnail_url: Option<String>,
    pub image_hash: Option<String>,
    pub image_url: Option<String>,
    pub call_to_action_type: Option<String>,
}

impl Resource for AdCreative {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "title",
        "body",
        "object_story_spec",
        "object_type",
        "thumbnail_url",
        "image_hash",
        "image_url",
        "call_to_action_type",
    ];
}

impl AdCreative {
    pub async fn find(client: &FacebookClient, id: &str) -> Result<Self> {
        client.find(id).await
    }
}
