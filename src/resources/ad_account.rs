use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ad_insight::{self, AdInsight, InsightsQuery};
use super::{
    created_id, require, string_or_number, Ad, AdCampaign, AdCreative, AdSet, Resource,
};
use crate::client::FacebookClient;
use crate::constants::{AD_ACCOUNT_PREFIX, PARAM_LIMIT};
use crate::error::{validate, FacebookApiError, Result};
use crate::query::Query;

// https://developers.facebook.com/docs/marketing-api/reference/ad-account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    pub account_status: Option<i64>,
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount_spent: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub balance: Option<String>,
    pub business_city: Option<String>,
    pub business_country_code: Option<String>,
    pub created_time: Option<String>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub funding_source: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub min_campaign_group_spend_cap: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub spend_cap: Option<String>,
    pub timezone_name: Option<String>,
}

impl Resource for AdAccount {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "account_id",
        "account_status",
        "age",
        "amount_spent",
        "balance",
        "business_city",
        "business_country_code",
        "created_time",
        "currency",
        "funding_source",
        "min_campaign_group_spend_cap",
        "name",
        "spend_cap",
        "timezone_name",
    ];
}

impl AdAccount {
    /// `account_status` 1 is the only state in which the account can deliver.
    pub fn is_active(&self) -> bool {
        self.account_status == Some(1)
    }

    /// Adds the `act_` prefix when given a bare numeric account id.
    pub fn graph_id(account_id: &str) -> String {
        if account_id.starts_with(AD_ACCOUNT_PREFIX) {
            account_id.to_string()
        } else {
            format!("{}{}", AD_ACCOUNT_PREFIX, account_id)
        }
    }

    pub async fn find(client: &FacebookClient, id: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(FacebookApiError::MissingField("id"));
        }
        client.find(&Self::graph_id(id)).await
    }

    /// Every ad account the token's user can see.
    pub async fn all(client: &FacebookClient) -> Result<Vec<Self>> {
        client.paginate("/me/adaccounts", Query::new()).await
    }

    pub async fn ad_campaigns(
        &self,
        client: &FacebookClient,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<AdCampaign>> {
        self.edge(client, "campaigns", effective_status, limit).await
    }

    pub async fn ad_sets(
        &self,
        client: &FacebookClient,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<AdSet>> {
        self.edge(client, "adsets", effective_status, limit).await
    }

    pub async fn ads(
        &self,
        client: &FacebookClient,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<Ad>> {
        self.edge(client, "ads", effective_status, limit).await
    }

    pub async fn ad_creatives(
        &self,
        client: &FacebookClient,
        limit: u32,
    ) -> Result<Vec<AdCreative>> {
        let id = require(&self.id, "id")?;
        client
            .paginate(
                &format!("/{}/adcreatives", id),
                Query::new().param(PARAM_LIMIT, limit),
            )
            .await
    }

    pub async fn create_ad_campaign(
        &self,
        client: &FacebookClient,
        name: &str,
        objective: &str,
        status: Option<&str>,
    ) -> Result<AdCampaign> {
        let id = require(&self.id, "id")?;
        let status = status.unwrap_or("ACTIVE");
        validate("objective", objective, AdCampaign::OBJECTIVES)?;
        validate("status", status, AdCampaign::STATUSES)?;

        let query = Query::new()
            .param("name", name)
            .param("objective", objective)
            .param("status", status)
            .param("special_ad_categories", "[]");
        let result = client.post(&format!("/{}/campaigns", id), query).await?;
        let campaign_id = created_id(&result)?;
        debug!("Created campaign {} in account {}", campaign_id, id);
        AdCampaign::find(client, &campaign_id).await
    }

    pub async fn create_ad_creative(
        &self,
        client: &FacebookClient,
        name: &str,
        object_story_spec: &Value,
    ) -> Result<AdCreative> {
        let id = require(&self.id, "id")?;
        if !object_story_spec.is_object() {
            return Err(FacebookApiError::InvalidValue {
                kind: "object story spec",
                value: object_story_spec.to_string(),
            });
        }

        let query = Query::new()
            .param("name", name)
            .json("object_story_spec", object_story_spec);
        let result = client.post(&format!("/{}/adcreatives", id), query).await?;
        let creative_id = created_id(&result)?;
        debug!("Created creative {} in account {}", creative_id, id);
        AdCreative::find(client, &creative_id).await
    }

    /// Audience size estimate for a targeting spec.
    pub async fn reach_estimate(
        &self,
        client: &FacebookClient,
        targeting: &Value,
        optimization_goal: &str,
    ) -> Result<Value> {
        let id = require(&self.id, "id")?;
        validate("optimization goal", optimization_goal, AdSet::OPTIMIZATION_GOALS)?;

        let query = Query::new()
            .json("targeting_spec", targeting)
            .param("optimization_goal", optimization_goal);
        let mut body = client.get(&format!("/{}/reachestimate", id), query).await?;
        Ok(match body.get_mut("data") {
            Some(Value::Array(items)) if !items.is_empty() => items.swap_remove(0),
            Some(data @ Value::Object(_)) => data.take(),
            _ => body,
        })
    }

    pub async fn ad_insights(
        &self,
        client: &FacebookClient,
        query: &InsightsQuery,
    ) -> Result<Vec<AdInsight>> {
        let id = require(&self.id, "id")?;
        ad_insight::fetch(client, id, query).await
    }

    async fn edge<T: Resource>(
        &self,
        client: &FacebookClient,
        edge: &str,
        effective_status: &[&str],
        limit: u32,
    ) -> Result<Vec<T>> {
        let id = require(&self.id, "id")?;
        let query = Query::new()
            .json("effective_status", &json!(effective_status))
            .param(PARAM_LIMIT, limit);
        client.paginate(&format!("/{}/{}", id, edge), query).await
    }
}
