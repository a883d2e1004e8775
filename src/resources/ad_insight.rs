use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use super::{string_or_number, Resource};
use crate::client::FacebookClient;
use crate::constants::{DEFAULT_INSIGHTS_LIMIT, PARAM_FIELDS, PARAM_LIMIT};
use crate::error::Result;
use crate::query::Query;

/// One row of an insights report. Metrics arrive as decimal strings;
/// requested fields outside [`AdInsight::FIELDS`] end up in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdInsight {
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub campaign_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub adset_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ad_id: Option<String>,
    pub objective: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub impressions: Option<String>,
    pub unique_actions: Option<Value>,
    pub cost_per_unique_action_type: Option<Value>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub clicks: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cpc: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cpm: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cpp: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ctr: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub spend: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub reach: Option<String>,
    pub date_start: Option<String>,
    pub date_stop: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for AdInsight {
    const FIELDS: &'static [&'static str] = &[
        "account_id",
        "campaign_id",
        "adset_id",
        "ad_id",
        "objective",
        "impressions",
        "unique_actions",
        "cost_per_unique_action_type",
        "clicks",
        "cpc",
        "cpm",
        "cpp",
        "ctr",
        "spend",
        "reach",
        "date_start",
        "date_stop",
    ];
}

impl AdInsight {
    pub fn spend(&self) -> Option<f64> {
        self.spend.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn impressions(&self) -> Option<i64> {
        self.impressions.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn clicks(&self) -> Option<i64> {
        self.clicks.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn reach(&self) -> Option<i64> {
        self.reach.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Inclusive day range for `time_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Self {
        Self { since, until }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn today() -> Self {
        Self::day(Local::now().date_naive())
    }

    fn to_json(self) -> Value {
        json!({
            "since": self.since.format("%Y-%m-%d").to_string(),
            "until": self.until.format("%Y-%m-%d").to_string(),
        })
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::today()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightLevel {
    Ad,
    Adset,
    Campaign,
    Account,
}

impl InsightLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightLevel::Ad => "ad",
            InsightLevel::Adset => "adset",
            InsightLevel::Campaign => "campaign",
            InsightLevel::Account => "account",
        }
    }
}

impl fmt::Display for InsightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsQuery {
    pub range: DateRange,
    pub level: Option<InsightLevel>,
    pub breakdowns: Vec<String>,
    pub fields: Vec<String>,
    pub limit: u32,
}

impl Default for InsightsQuery {
    fn default() -> Self {
        Self {
            range: DateRange::today(),
            level: None,
            breakdowns: Vec::new(),
            fields: Vec::new(),
            limit: DEFAULT_INSIGHTS_LIMIT,
        }
    }
}

impl InsightsQuery {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn level(mut self, level: InsightLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn breakdowns<S: Into<String>>(mut self, breakdowns: impl IntoIterator<Item = S>) -> Self {
        self.breakdowns = breakdowns.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn to_query(&self) -> Query {
        Query::new()
            .json("time_range", &self.range.to_json())
            .opt("level", self.level)
            .list("breakdowns", &self.breakdowns)
            .list(PARAM_FIELDS, &self.fields)
            .param(PARAM_LIMIT, self.limit)
    }
}

/// Insights edge shared by accounts, campaigns, ad sets and ads.
pub(crate) async fn fetch(
    client: &FacebookClient,
    object_id: &str,
    query: &InsightsQuery,
) -> Result<Vec<AdInsight>> {
    client
        .paginate(&format!("/{}/insights", object_id), query.to_query())
        .await
}
