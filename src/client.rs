use async_trait::async_trait;
use hmac::{Hmac, Mac};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use sha2::Sha256;
use std::fmt;
use url::Url;

use crate::config::Config;
use crate::constants::{
    DEFAULT_PAGE_LIMIT, PARAM_ACCESS_TOKEN, PARAM_APPSECRET_PROOF, PARAM_FIELDS, PARAM_LIMIT,
};
use crate::error::{FacebookApiError, Result};
use crate::query::Query;
use crate::resources::Resource;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A fully resolved request: absolute URL plus the parameters to encode.
/// GET and DELETE send `params` in the query string, POST sends them as a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        if !request.params.is_empty() {
            builder = match request.method {
                Method::Post => builder.form(&request.params),
                Method::Get | Method::Delete => builder.query(&request.params),
            };
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FacebookApiError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FacebookApiError::InvalidResponse(e.to_string()))?;

        Ok(Response { status, body })
    }
}

pub struct FacebookClient {
    transport: Box<dyn Transport>,
    access_token: String,
    app_secret: Option<String>,
    base_uri: String,
}

impl fmt::Debug for FacebookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookClient")
            .field("base_uri", &self.base_uri)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl FacebookClient {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        let base_uri = config.base_uri();
        Self {
            transport: Box::new(transport),
            access_token: config.access_token,
            app_secret: config.app_secret,
            base_uri,
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn set_base_uri(&mut self, base_uri: impl Into<String>) {
        self.base_uri = base_uri.into().trim_end_matches('/').to_string();
    }

    /// hex(HMAC-SHA256(app_secret, access_token)), sent when an app secret is configured.
    pub fn appsecret_proof(&self) -> Option<String> {
        let secret = self.app_secret.as_ref()?;
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(self.access_token.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }

    pub async fn get(&self, path: &str, query: Query) -> Result<Value> {
        self.send(Method::Get, path, query).await
    }

    pub async fn post(&self, path: &str, query: Query) -> Result<Value> {
        self.send(Method::Post, path, query).await
    }

    pub async fn delete(&self, path: &str, query: Query) -> Result<Value> {
        self.send(Method::Delete, path, query).await
    }

    /// GET that decodes into records: each element of `data`, or the body itself.
    pub async fn get_objects<T: Resource>(&self, path: &str, mut query: Query) -> Result<Vec<T>> {
        query.set_default(PARAM_FIELDS, T::FIELDS.join(","));
        let body = self.get(path, query).await?;
        objectify(body)
    }

    pub async fn find<T: Resource>(&self, id: &str) -> Result<T> {
        if id.is_empty() {
            return Err(FacebookApiError::MissingField("id"));
        }
        let query = Query::new().param(PARAM_FIELDS, T::FIELDS.join(","));
        let body = self.get(&format!("/{}", id), query).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn update(&self, id: &str, query: Query) -> Result<bool> {
        if id.is_empty() {
            return Err(FacebookApiError::MissingField("id"));
        }
        let body = self.post(&format!("/{}", id), query).await?;
        Ok(success(&body))
    }

    pub async fn destroy(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Err(FacebookApiError::MissingField("id"));
        }
        let body = self.delete(&format!("/{}", id), Query::new()).await?;
        Ok(success(&body))
    }

    /// Collects every page of an edge. When the first page comes back full,
    /// `paging.next` is followed until it disappears; later pages may be short.
    pub async fn paginate<T: Resource>(&self, path: &str, mut query: Query) -> Result<Vec<T>> {
        query.set_default(PARAM_LIMIT, DEFAULT_PAGE_LIMIT);
        query.set_default(PARAM_FIELDS, T::FIELDS.join(","));
        let limit = query
            .get(PARAM_LIMIT)
            .and_then(|l| l.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT as usize);

        let mut page = self.get(path, query).await?;
        let mut records = Vec::new();

        let first = take_data(&mut page);
        let full = limit > 0 && first.len() >= limit;
        for item in first {
            records.push(serde_json::from_value(item)?);
        }
        if !full {
            return Ok(records);
        }

        while let Some(next) = next_link(&page) {
            let url = self.sign_next(&next)?;
            page = self
                .execute(Request {
                    method: Method::Get,
                    url,
                    params: Vec::new(),
                })
                .await?;
            for item in take_data(&mut page) {
                records.push(serde_json::from_value(item)?);
            }
        }

        Ok(records)
    }

    /// `paging.next` links carry `access_token` but never `appsecret_proof`.
    fn sign_next(&self, next: &str) -> Result<String> {
        let mut url = Url::parse(next).map_err(|e| {
            FacebookApiError::InvalidResponse(format!("bad paging.next {}: {}", next, e))
        })?;

        let present: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        let has = |key: &str| present.iter().any(|k| k == key);

        let mut missing = Vec::new();
        if !has(PARAM_ACCESS_TOKEN) {
            missing.push((PARAM_ACCESS_TOKEN, self.access_token.clone()));
        }
        if let Some(proof) = self.appsecret_proof().filter(|_| !has(PARAM_APPSECRET_PROOF)) {
            missing.push((PARAM_APPSECRET_PROOF, proof));
        }

        if !missing.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &missing {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    async fn send(&self, method: Method, path: &str, query: Query) -> Result<Value> {
        let request = Request {
            method,
            url: self.url(path),
            params: self.pack(query),
        };
        self.execute(request).await
    }

    async fn execute(&self, request: Request) -> Result<Value> {
        debug!("{} {}", request.method, request.url);
        let response = self.transport.execute(request).await?;
        unpack(response)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_uri, path)
        } else {
            format!("{}/{}", self.base_uri, path)
        }
    }

    fn pack(&self, mut query: Query) -> Vec<(String, String)> {
        query.set_default(PARAM_ACCESS_TOKEN, &self.access_token);
        if let Some(proof) = self.appsecret_proof() {
            query.set_default(PARAM_APPSECRET_PROOF, proof);
        }
        query.pairs()
    }
}

fn unpack(response: Response) -> Result<Value> {
    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) if response.is_success() => {
            return Err(FacebookApiError::InvalidResponse(e.to_string()))
        }
        Err(_) => {
            return Err(FacebookApiError::RequestFailed(format!(
                "HTTP {}: {}",
                response.status, response.body
            )))
        }
    };

    if let Some(error) = body.get("error").filter(|e| e.is_object()) {
        return Err(FacebookApiError::Api {
            message: error["message"].as_str().unwrap_or("Unknown error").to_string(),
            error_type: error["type"].as_str().map(str::to_string),
            code: error["code"].as_i64().unwrap_or(0),
            fbtrace_id: error["fbtrace_id"].as_str().map(str::to_string),
        });
    }

    if !response.is_success() {
        return Err(FacebookApiError::RequestFailed(format!(
            "HTTP {}: {}",
            response.status, response.body
        )));
    }

    Ok(body)
}

fn next_link(page: &Value) -> Option<String> {
    page.get("paging")
        .and_then(|p| p.get("next"))
        .and_then(Value::as_str)
        .filter(|next| !next.is_empty())
        .map(str::to_string)
}

fn take_data(page: &mut Value) -> Vec<Value> {
    match page.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

pub(crate) fn objectify<T: Resource>(mut body: Value) -> Result<Vec<T>> {
    if body.get("data").map_or(false, Value::is_array) {
        take_data(&mut body)
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(FacebookApiError::from))
            .collect()
    } else {
        Ok(vec![serde_json::from_value(body)?])
    }
}

fn success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::AdSet;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Replays canned responses in order and records every request.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        responses: Arc<Mutex<Vec<Response>>>,
        requests: Arc<Mutex<Vec<Request>>>,
    }

    impl ScriptedTransport {
        fn new(bodies: Vec<Value>) -> Self {
            let responses = bodies
                .into_iter()
                .rev()
                .map(|b| Response {
                    status: 200,
                    body: b.to_string(),
                })
                .collect();
            Self {
                responses: Arc::new(Mutex::new(responses)),
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: Request) -> Result<Response> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| FacebookApiError::RequestFailed("no scripted response".into()))
        }
    }

    const NEXT_A: &str = "https://graph.facebook.com/v20.0/act_1/adsets?access_token=token&after=a";
    const NEXT_B: &str = "https://graph.facebook.com/v20.0/act_1/adsets?access_token=token&after=b";

    fn client(transport: &ScriptedTransport) -> FacebookClient {
        FacebookClient::with_transport(Config::new("token"), transport.clone())
    }

    fn param<'a>(request: &'a Request, key: &str) -> Option<&'a str> {
        request
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn base_uri_can_be_switched() {
        let transport = ScriptedTransport::default();
        let mut client = FacebookClient::with_transport(
            Config::new("token").with_api_version("v2.9"),
            transport,
        );
        assert!(client.base_uri().contains("2.9"));
        client.set_base_uri("https://graph.facebook.com/v2.10");
        assert!(client.base_uri().contains("2.10"));
    }

    #[test]
    fn appsecret_proof_is_hmac_sha256_hex() {
        let transport = ScriptedTransport::default();
        let client = FacebookClient::with_transport(
            Config::new("what do ya want for nothing?").with_app_secret("Jefe"),
            transport,
        );
        assert_eq!(
            client.appsecret_proof().as_deref(),
            Some("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[tokio::test]
    async fn requests_carry_token_and_proof() {
        let transport = ScriptedTransport::new(vec![json!({"id": "1"})]);
        let client = FacebookClient::with_transport(
            Config::new("token").with_app_secret("secret"),
            transport.clone(),
        );
        client.get("/1", Query::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://graph.facebook.com/v20.0/1");
        assert_eq!(param(&requests[0], "access_token"), Some("token"));
        assert!(param(&requests[0], "appsecret_proof").is_some());
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let transport = ScriptedTransport::new(vec![json!({
            "error": {
                "message": "Unsupported get request.",
                "type": "GraphMethodException",
                "code": 100,
                "fbtrace_id": "AbC"
            }
        })]);
        let err = client(&transport).get("/missing", Query::new()).await.unwrap_err();
        match err {
            FacebookApiError::Api {
                code,
                message,
                error_type,
                fbtrace_id,
            } => {
                assert_eq!(code, 100);
                assert_eq!(message, "Unsupported get request.");
                assert_eq!(error_type.as_deref(), Some("GraphMethodException"));
                assert_eq!(fbtrace_id.as_deref(), Some("AbC"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_failure_is_request_failed() {
        let err = unpack(Response {
            status: 502,
            body: "Bad Gateway".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, FacebookApiError::RequestFailed(ref m) if m.contains("502")));

        let err = unpack(Response {
            status: 200,
            body: "<html>".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, FacebookApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn paginate_follows_next_while_pages_are_full() {
        let transport = ScriptedTransport::new(vec![
            json!({
                "data": [{"id": "1"}, {"id": "2"}],
                "paging": {"next": NEXT_A}
            }),
            json!({
                "data": [{"id": "3"}, {"id": "4"}],
                "paging": {"next": NEXT_B}
            }),
            json!({"data": [{"id": "5"}], "paging": {}}),
        ]);
        let sets: Vec<AdSet> = client(&transport)
            .paginate("/act_1/adsets", Query::new().param("limit", 2))
            .await
            .unwrap();

        let ids: Vec<_> = sets.iter().filter_map(|s| s.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(param(&requests[0], "limit"), Some("2"));
        assert_eq!(param(&requests[0], "fields"), Some(AdSet::FIELDS.join(",").as_str()));
        assert_eq!(requests[1].url, NEXT_A);
        assert!(requests[1].params.is_empty());
    }

    #[tokio::test]
    async fn paginate_keeps_following_past_a_short_middle_page() {
        let transport = ScriptedTransport::new(vec![
            json!({
                "data": [{"id": "1"}, {"id": "2"}],
                "paging": {"next": NEXT_A}
            }),
            json!({
                "data": [{"id": "3"}],
                "paging": {"next": NEXT_B}
            }),
            json!({"data": [{"id": "4"}, {"id": "5"}]}),
        ]);
        let sets: Vec<AdSet> = client(&transport)
            .paginate("/act_1/adsets", Query::new().param("limit", 2))
            .await
            .unwrap();

        assert_eq!(sets.len(), 5);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn next_links_are_signed_with_the_app_secret_proof() {
        let transport = ScriptedTransport::new(vec![
            json!({
                "data": [{"id": "1"}],
                "paging": {"next": NEXT_A}
            }),
            json!({"data": []}),
        ]);
        let client = FacebookClient::with_transport(
            Config::new("token").with_app_secret("secret"),
            transport.clone(),
        );
        let proof = client.appsecret_proof().unwrap();
        let _: Vec<AdSet> = client
            .paginate("/act_1/adsets", Query::new().param("limit", 1))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        let next = &requests[1].url;
        assert!(next.contains(&format!("appsecret_proof={}", proof)));
        assert_eq!(next.matches("access_token=").count(), 1);
        assert!(next.contains("after=a"));
    }

    #[tokio::test]
    async fn next_links_without_a_token_get_one() {
        let transport = ScriptedTransport::new(vec![
            json!({
                "data": [{"id": "1"}],
                "paging": {"next": "https://graph.facebook.com/v20.0/act_1/adsets?after=a"}
            }),
            json!({"data": []}),
        ]);
        let _: Vec<AdSet> = client(&transport)
            .paginate("/act_1/adsets", Query::new().param("limit", 1))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[1].url,
            "https://graph.facebook.com/v20.0/act_1/adsets?after=a&access_token=token"
        );
        assert!(!requests[1].url.contains("appsecret_proof"));
    }

    #[tokio::test]
    async fn paginate_stops_on_short_first_page() {
        let transport = ScriptedTransport::new(vec![json!({
            "data": [{"id": "1"}],
            "paging": {"next": "https://graph.facebook.com/v20.0/next"}
        })]);
        let sets: Vec<AdSet> = client(&transport)
            .paginate("/act_1/adsets", Query::new())
            .await
            .unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(param(&transport.requests()[0], "limit"), Some("100"));
    }

    #[tokio::test]
    async fn paginate_treats_missing_data_as_empty() {
        let transport = ScriptedTransport::new(vec![json!({})]);
        let sets: Vec<AdSet> = client(&transport)
            .paginate("/act_1/adsets", Query::new())
            .await
            .unwrap();
        assert!(sets.is_empty());
    }

    #[tokio::test]
    async fn find_rejects_empty_id() {
        let transport = ScriptedTransport::default();
        let err = client(&transport).find::<AdSet>("").await.unwrap_err();
        assert!(matches!(err, FacebookApiError::MissingField("id")));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn objectify_handles_list_and_single_bodies() {
        let list: Vec<AdSet> = objectify(json!({"data": [{"id": "1"}, {"id": "2"}]})).unwrap();
        assert_eq!(list.len(), 2);
        let single: Vec<AdSet> = objectify(json!({"id": "9", "name": "Solo"})).unwrap();
        assert_eq!(single[0].name.as_deref(), Some("Solo"));
    }
}
