use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacebookApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Graph API error {code}: {message}")]
    Api {
        message: String,
        error_type: Option<String>,
        code: i64,
        fbtrace_id: Option<String>,
    },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Record is missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid {kind} value: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

impl From<reqwest::Error> for FacebookApiError {
    fn from(e: reqwest::Error) -> Self {
        FacebookApiError::RequestFailed(e.to_string())
    }
}

impl From<serde_json::Error> for FacebookApiError {
    fn from(e: serde_json::Error) -> Self {
        FacebookApiError::InvalidResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FacebookApiError>;

/// Checks `value` against one of the closed string tables on a resource.
pub fn validate(kind: &'static str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(FacebookApiError::InvalidValue {
            kind,
            value: value.to_string(),
        })
    }
}
