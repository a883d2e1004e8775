use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ad_insight::{self, AdInsight, InsightsQuery};
use super::{require, string_or_number, AdAccount, AdCampaign, AdCreative, AdSet, Resource};
use crate::client::FacebookClient;
use crate::constants::AD_ACCOUNT_PREFIX;
use crate::error::{validate, FacebookApiError, Result};
use crate::query::Query;

// https://developers.facebook.com/docs/marketing-api/reference/adgroup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ad {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub campaign_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub adset_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub configured_status: Option<String>,
    pub effective_status: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bid_amount: Option<String>,
    pub creative: Option<Value>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
}

impl Resource for Ad {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "account_id",
        "campaign_id",
        "adset_id",
        "name",
        "status",
        "configured_status",
        "effective_status",
        "bid_amount",
        "creative",
        "created_time",
        "updated_time",
    ];
}

impl Ad {
    pub const STATUSES: &'static [&'static str] = &[
        "ACTIVE",
        "PAUSED",
        "DELETED",
        "PENDING_REVIEW",
        "DISAPPROVED",
        "PREAPPROVED",
        "PENDING_BILLING_INFO",
        "CAMPAIGN_PAUSED",
        "ARCHIVED",
        "ADSET_PAUSED",
    ];

    pub async fn find(client: &FacebookClient, id: &str) -> Result<Self> {
        client.find(id).await
    }

    pub async fn ad_account(&self, client: &FacebookClient) -> Result<AdAccount> {
        let account_id = require(&self.account_id, "account_id")?;
        AdAccount::find(client, &format!("{}{}", AD_ACCOUNT_PREFIX, account_id)).await
    }

    pub async fn ad_campaign(&self, client: &FacebookClient) -> Result<AdCampaign> {
        AdCampaign::find(client, require(&self.campaign_id, "campaign_id")?).await
    }

    pub async fn ad_set(&self, client: &FacebookClient) -> Result<AdSet> {
        AdSet::find(client, require(&self.adset_id, "adset_id")?).await
    }

    /// `creative` is an object reference; only its `id` is needed here.
    pub fn creative_id(&self) -> Option<String> {
        match self.creative.as_ref()?.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub async fn ad_creative(&self, client: &FacebookClient) -> Result<AdCreative> {
        let creative_id = self
            .creative_id()
            .ok_or(FacebookApiError::MissingField("creative"))?;
        AdCreative::find(client, &creative_id).await
    }

    pub async fn ad_insights(
        &self,
        client: &FacebookClient,
        query: &InsightsQuery,
    ) -> Result<Vec<AdInsight>> {
        let id = require(&self.id, "id")?;
        ad_insight::fetch(client, id, query).await
    }

    pub async fn update_status(&self, client: &FacebookClient, status: &str) -> Result<bool> {
        let id = require(&self.id, "id")?;
        validate("status", status, Self::STATUSES)?;
        client.update(id, Query::new().param("status", status)).await
    }

    pub async fn destroy(&self, client: &FacebookClient) -> Result<bool> {
        client.destroy(require(&self.id, "id")?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creative_id_comes_from_reference() {
        let ad: Ad = serde_json::from_value(json!({
            "id": "7001",
            "creative": {"id": "8001"}
        }))
        .unwrap();
        assert_eq!(ad.creative_id().as_deref(), Some("8001"));

        let numeric: Ad = serde_json::from_value(json!({"creative": {"id": 8002}})).unwrap();
        assert_eq!(numeric.creative_id().as_deref(), Some("8002"));

        let bare = Ad::default();
        assert!(bare.creative_id().is_none());
    }

    #[test]
    fn status_table_includes_adset_paused() {
        assert!(Ad::STATUSES.contains(&"ADSET_PAUSED"));
        assert!(validate("status", "RUNNING", Ad::STATUSES).is_err());
    }
}
