use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ad_insight::{self, AdInsight, InsightsQuery};
use super::{created_id, require, string_or_number, AdAccount, AdSet, NewAdSet, Resource};
use crate::client::FacebookClient;
use crate::constants::{AD_ACCOUNT_PREFIX, PARAM_LIMIT};
use crate::error::{validate, Result};
use crate::query::Query;

// https://developers.facebook.com/docs/marketing-api/reference/ad-campaign-group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdCampaign {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    pub buying_type: Option<String>,
    pub configured_status: Option<String>,
    pub effective_status: Option<String>,
    pub name: Option<String>,
    pub objective: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub spend_cap: Option<String>,
    pub start_time: Option<String>,
    pub stop_time: Option<String>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
}

impl Resource for AdCampaign {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "account_id",
        "buying_type",
        "configured_status",
        "effective_status",
        "name",
        "objective",
        "spend_cap",
        "start_time",
        "stop_time",
        "created_time",
        "updated_time",
    ];
}

impl AdCampaign {
    pub const STATUSES: &'static [&'static str] = &["ACTIVE", "PAUSED", "DELETED", "ARCHIVED"];

    pub const OBJECTIVES: &'static [&'static str] = &[
        "APP_INSTALLS",
        "BRAND_AWARENESS",
        "CONVERSIONS",
        "EVENT_RESPONSES",
        "LEAD_GENERATION",
        "LINK_CLICKS",
        "LOCAL_AWARENESS",
        "MESSAGES",
        "OFFER_CLAIMS",
        "PAGE_LIKES",
        "POST_ENGAGEMENT",
        "PRODUCT_CATALOG_SALES",
        "REACH",
        "STORE_VISITS",
        "VIDEO_VIEWS",
        "OUTCOME_APP_PROMOTION",
        "OUTCOME_AWARENESS",
        "OUTCOME_ENGAGEMENT",
        "OUTCOME_LEADS",
        "OUTCOME_SALES",
        "OUTCOME_TRAFFIC",
    ];

    pub async fn find(client: &FacebookClient, id: &str) -> Result<Self> {
        client.find(id).await
    }

    pub async fn ad_account(&self, client: &FacebookClient) -> Result<AdAccount> {
        let account_id = require(&self.account_id, "account_id")?;
        AdAccount::find(client, &format!("{}{}", AD_ACCOUNT_PREFIX, account_id)).await
    }

    pub async fn ad_sets(
        &self,
        client: &FacebookClient,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<AdSet>> {
        let id = require(&self.id, "id")?;
        let query = Query::new()
            .json("effective_status", &json!(effective_status))
            .param(PARAM_LIMIT, limit);
        client.paginate(&format!("/{}/adsets", id), query).await
    }

    pub async fn create_ad_set(&self, client: &FacebookClient, ad_set: &NewAdSet) -> Result<AdSet> {
        let id = require(&self.id, "id")?;
        let account_id = require(&self.account_id, "account_id")?;
        let query = ad_set.to_query(id)?;
        let result = client
            .post(&format!("/{}{}/adsets", AD_ACCOUNT_PREFIX, account_id), query)
            .await?;
        let ad_set_id = created_id(&result)?;
        debug!("Created ad set {} in campaign {}", ad_set_id, id);
        AdSet::find(client, &ad_set_id).await
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
