use dotenv::dotenv;
use std::env;
use thiserror::Error;
use url::Url;

use crate::constants::{
    ENV_ACCESS_TOKEN, ENV_AD_ACCOUNT_ID, ENV_API_VERSION, ENV_APP_SECRET, ENV_BASE_URL,
    FACEBOOK_API_VERSION, FACEBOOK_BASE_URL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub app_secret: Option<String>,
    pub api_version: String,
    pub base_url: String,
    pub ad_account_id: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    MissingEnv(String),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl Config {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            app_secret: None,
            api_version: FACEBOOK_API_VERSION.to_string(),
            base_url: FACEBOOK_BASE_URL.to_string(),
            ad_account_id: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(ENV_ACCESS_TOKEN)
            .ok_or_else(|| ConfigError::MissingEnv(ENV_ACCESS_TOKEN.to_string()))?;

        let base_url = get(ENV_BASE_URL).unwrap_or_else(|| FACEBOOK_BASE_URL.to_string());

        // Validate the URL format
        Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;

        Ok(Self {
            access_token,
            app_secret: get(ENV_APP_SECRET),
            api_version: get(ENV_API_VERSION).unwrap_or_else(|| FACEBOOK_API_VERSION.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            ad_account_id: get(ENV_AD_ACCOUNT_ID),
        })
    }

    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn base_uri(&self) -> String {
        format!("{}/{}", self.base_url, self.api_version)
    }
}
