// API Versions
pub const FACEBOOK_API_VERSION: &str = "v20.0";

// API Base URLs
pub const FACEBOOK_BASE_URL: &str = "https://graph.facebook.com";

// Environment variables
pub const ENV_ACCESS_TOKEN: &str = "FACEBOOK_ACCESS_TOKEN";
pub const ENV_APP_SECRET: &str = "FACEBOOK_APP_SECRET";
pub const ENV_API_VERSION: &str = "FACEBOOK_API_VERSION";
pub const ENV_BASE_URL: &str = "FACEBOOK_BASE_URL";
pub const ENV_AD_ACCOUNT_ID: &str = "FACEBOOK_AD_ACCOUNT_ID";

// Query parameter names
pub const PARAM_ACCESS_TOKEN: &str = "access_token";
pub const PARAM_APPSECRET_PROOF: &str = "appsecret_proof";
pub const PARAM_FIELDS: &str = "fields";
pub const PARAM_LIMIT: &str = "limit";

// Paging defaults
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_INSIGHTS_LIMIT: u32 = 1_000;

// Ad account ids are addressed as act_<account_id>
pub const AD_ACCOUNT_PREFIX: &str = "act_";
