//! Client binding for the Facebook Marketing Graph API.
//!
//! ```no_run
//! use facebook_ads::{AdSet, Config, FacebookClient, InsightsQuery, ACTIVE_ONLY};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FacebookClient::new(Config::from_env()?);
//! let ad_set = AdSet::find(&client, "23842000000000000").await?;
//! let ads = ad_set.ads(&client, ACTIVE_ONLY, 100).await?;
//! let insights = ad_set.ad_insights(&client, &InsightsQuery::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod query;
pub mod report;
pub mod resources;

pub use client::{FacebookClient, HttpTransport, Method, Request, Response, Transport};
pub use config::{Config, ConfigError};
pub use error::{FacebookApiError, Result};
pub use query::Query;
pub use resources::{
    ActivityWindow, Ad, AdAccount, AdCampaign, AdCreative, AdInsight, AdSet, AdSetActivity,
    DateRange, InsightLevel, InsightsQuery, NewAdSet, Resource, ACTIVE_ONLY,
};
