//! Typed projections of Marketing API objects.
//!
//! Records hold whatever the API returned for the fields that were asked
//! for; anything not requested stays `None`. Instance methods take the
//! client explicitly and translate into further Graph calls.

mod ad;
mod ad_account;
mod ad_campaign;
mod ad_creative;
mod ad_insight;
mod ad_set;
mod ad_set_activity;

pub use ad::Ad;
pub use ad_account::AdAccount;
pub use ad_campaign::AdCampaign;
pub use ad_creative::AdCreative;
pub use ad_insight::{AdInsight, DateRange, InsightLevel, InsightsQuery};
pub use ad_set::{AdSet, NewAdSet};
pub use ad_set_activity::{ActivityWindow, AdSetActivity};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{FacebookApiError, Result};

pub trait Resource: DeserializeOwned + Send {
    /// Fields requested when the caller does not name any.
    const FIELDS: &'static [&'static str];
}

/// Default `effective_status` filter for edge listings.
pub const ACTIVE_ONLY: &[&str] = &["ACTIVE"];

pub(crate) fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FacebookApiError::MissingField(field)),
    }
}

/// The `id` of a create call's response.
pub(crate) fn created_id(body: &Value) -> Result<String> {
    match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(FacebookApiError::InvalidResponse(format!(
            "create response without id: {}",
            body
        ))),
    }
}

/// Graph sends ids and money amounts as strings but some fields arrive as
/// bare numbers depending on version; accept both.
pub(crate) fn string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
