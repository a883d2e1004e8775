use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ad_insight::{self, AdInsight, InsightsQuery};
use super::ad_set_activity::{ActivityWindow, AdSetActivity};
use super::{created_id, require, string_or_number, Ad, AdAccount, AdCampaign, Resource};
use crate::client::FacebookClient;
use crate::constants::{AD_ACCOUNT_PREFIX, PARAM_LIMIT};
use crate::error::{validate, Result};
use crate::query::Query;

// https://developers.facebook.com/docs/marketing-api/reference/ad-account/adsets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSet {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub campaign_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub configured_status: Option<String>,
    pub effective_status: Option<String>,
    pub bid_strategy: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub bid_amount: Option<String>,
    pub billing_event: Option<String>,
    pub optimization_goal: Option<String>,
    pub pacing_type: Option<Value>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub daily_budget: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub budget_remaining: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub lifetime_budget: Option<String>,
    pub promoted_object: Option<Value>,
    pub targeting: Option<Value>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
}

impl Resource for AdSet {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "account_id",
        "campaign_id",
        "name",
        "status",
        "configured_status",
        "effective_status",
        "bid_strategy",
        "bid_amount",
        "billing_event",
        "optimization_goal",
        "pacing_type",
        "daily_budget",
        "budget_remaining",
        "lifetime_budget",
        "promoted_object",
        "targeting",
        "created_time",
        "updated_time",
    ];
}

/// Parameters for creating an ad set under a campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdSet {
    pub name: String,
    pub targeting: Value,
    pub promoted_object: Value,
    pub daily_budget: Option<u64>,
    pub optimization_goal: String,
    pub billing_event: String,
    pub bid_strategy: String,
    pub bid_amount: Option<u64>,
    pub status: String,
}

impl NewAdSet {
    pub fn new(
        name: impl Into<String>,
        targeting: Value,
        optimization_goal: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            targeting,
            promoted_object: Value::Null,
            daily_budget: None,
            optimization_goal: optimization_goal.into(),
            billing_event: "IMPRESSIONS".to_string(),
            bid_strategy: "LOWEST_COST_WITHOUT_CAP".to_string(),
            bid_amount: None,
            status: "ACTIVE".to_string(),
        }
    }

    pub(crate) fn to_query(&self, campaign_id: &str) -> Result<Query> {
        validate("optimization goal", &self.optimization_goal, AdSet::OPTIMIZATION_GOALS)?;
        validate("billing event", &self.billing_event, AdSet::BILLING_EVENTS)?;
        validate("bid strategy", &self.bid_strategy, AdSet::BID_STRATEGIES)?;
        validate("status", &self.status, AdSet::STATUSES)?;

        Ok(Query::new()
            .param("name", &self.name)
            .param("campaign_id", campaign_id)
            .json("targeting", &self.targeting)
            .json("promoted_object", &self.promoted_object)
            .opt("daily_budget", self.daily_budget)
            .param("optimization_goal", &self.optimization_goal)
            .param("billing_event", &self.billing_event)
            .param("bid_strategy", &self.bid_strategy)
            .opt("bid_amount", self.bid_amount)
            .param("status", &self.status))
    }
}

impl AdSet {
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

    pub const BILLING_EVENTS: &'static [&'static str] = &["APP_INSTALLS", "IMPRESSIONS"];

    pub const OPTIMIZATION_GOALS: &'static [&'static str] = &[
        "NONE",
        "APP_INSTALLS",
        "BRAND_AWARENESS",
        "AD_RECALL_LIFT",
        "CLICKS",
        "ENGAGED_USERS",
        "EVENT_RESPONSES",
        "IMPRESSIONS",
        "LEAD_GENERATION",
        "LINK_CLICKS",
        "OFFER_CLAIMS",
        "OFFSITE_CONVERSIONS",
        "PAGE_ENGAGEMENT",
        "PAGE_LIKES",
        "POST_ENGAGEMENT",
        "REACH",
        "SOCIAL_IMPRESSIONS",
        "VIDEO_VIEWS",
        "APP_DOWNLOADS",
        "LANDING_PAGE_VIEWS",
    ];

    pub const BID_STRATEGIES: &'static [&'static str] = &[
        "LOWEST_COST_WITHOUT_CAP",
        "LOWEST_COST_WITH_BID_CAP",
        "TARGET_COST",
    ];

    pub async fn find(client: &FacebookClient, id: &str) -> Result<Self> {
        client.find(id).await
    }

    pub async fn ad_account(&self, client: &FacebookClient) -> Result<AdAccount> {
        let account_id = require(&self.account_id, "account_id")?;
        AdAccount::find(client, &format!("{}{}", AD_ACCOUNT_PREFIX, account_id)).await
    }

    pub async fn ad_campaign(&self, client: &FacebookClient) -> Result<AdCampaign> {
        let campaign_id = require(&self.campaign_id, "campaign_id")?;
        AdCampaign::find(client, campaign_id).await
    }

    pub async fn ads(
        &self,
        client: &FacebookClient,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<Ad>> {
        let id = require(&self.id, "id")?;
        let query = Query::new()
            .json("effective_status", &json!(effective_status))
            .param(PARAM_LIMIT, limit);
        client.paginate(&format!("/{}/ads", id), query).await
    }

    /// Creates a (paused by default) ad in this ad set and reads it back.
    pub async fn create_ad(
        &self,
        client: &FacebookClient,
        name: &str,
        creative_id: &str,
        status: Option<&str>,
    ) -> Result<Ad> {
        let id = require(&self.id, "id")?;
        let account_id = require(&self.account_id, "account_id")?;
        let status = status.unwrap_or("PAUSED");
        validate("status", status, Ad::STATUSES)?;

        let query = Query::new()
            .param("name", name)
            .param("adset_id", id)
            .json("creative", &json!({ "creative_id": creative_id }))
            .param("status", status);
        let result = client
            .post(&format!("/{}{}/ads", AD_ACCOUNT_PREFIX, account_id), query)
            .await?;
        let ad_id = created_id(&result)?;
        debug!("Created ad {} in ad set {}", ad_id, id);
        Ad::find(client, &ad_id).await
    }

    pub async fn ad_insights(
        &self,
        client: &FacebookClient,
        query: &InsightsQuery,
    ) -> Result<Vec<AdInsight>> {
        let id = require(&self.id, "id")?;
        ad_insight::fetch(client, id, query).await
    }

    pub async fn activities(
        &self,
        client: &FacebookClient,
        window: ActivityWindow,
    ) -> Result<Vec<AdSetActivity>> {
        let id = require(&self.id, "id")?;
        client
            .get_objects(&format!("/{}/activities", id), window.to_query())
            .await
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
