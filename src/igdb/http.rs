// src/igdb/http.rs
// =============================================================================
// HTTP transport for the IGDB API.
//
// Every IGDB call is a POST to https://api-v3.igdb.com/<endpoint> with the
// query language in the body and the API key in a `user-key` header.
//
// The transport sits behind the ApiBackend trait so the request cascade in
// enrich.rs can be tested against canned JSON instead of the real API.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::error::IgdbResult;
use crate::config::Settings;

const USER_AGENT: &str = concat!("igdb-chat/", env!("CARGO_PKG_VERSION"));

// Status code and raw body of an IGDB response.
//
// Status handling is left to the caller: a 401 on the primary search means
// something different to the user than a 500.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ApiBackend: Send + Sync {
    /// POST `body` to `endpoint` (e.g. "games", "covers").
    async fn post(&self, endpoint: &str, body: &str) -> IgdbResult<ApiResponse>;
}

pub struct ReqwestBackend {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ReqwestBackend {
    pub fn new(settings: &Settings, api_key: &str) -> IgdbResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&settings.base_url)?,
            api_key: api_key.to_string(),
        })
    }
}

// Url::join drops the last path segment unless the base ends with '/', so
// "https://host/v3" would otherwise turn into "https://host/games".
fn parse_base_url(base_url: &str) -> IgdbResult<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}

#[async_trait]
impl ApiBackend for ReqwestBackend {
    async fn post(&self, endpoint: &str, body: &str) -> IgdbResult<ApiResponse> {
        let url = self.base_url.join(endpoint)?;

        let response = self
            .client
            .post(url)
            .header("user-key", &self.api_key)
            .header("Accept", "*/*")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

// -----------------------------------------------------------------------------
// Fake backend for tests
// -----------------------------------------------------------------------------

#[cfg(test)]
pub mod testing {
    use super::*;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Canned {
        status: u16,
        body: String,
    }

    /// Serves canned responses per endpoint and records every request.
    ///
    /// When the canned body is a JSON array and the request has a
    /// `where <field>=(1,2,3)` filter, only the items whose `<field>` matches
    /// one of those IDs are returned, so batching behaves like the real API.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        responses: Arc<Mutex<HashMap<String, Canned>>>,
        requests: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_json(self, endpoint: &str, json: Value) -> Self {
            self.with_status(endpoint, 200, &json.to_string())
        }

        pub fn with_status(self, endpoint: &str, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().insert(
                endpoint.to_string(),
                Canned {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        /// Every (endpoint, body) pair posted so far, in call order.
        pub fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().unwrap().clone()
        }

        pub fn requests_to(&self, endpoint: &str) -> Vec<String> {
            self.requests()
                .into_iter()
                .filter(|(e, _)| e == endpoint)
                .map(|(_, body)| body)
                .collect()
        }
    }

    // Pulls ("game", [1, 2]) out of "fields *;where game=(1,2);".
    fn id_filter(body: &str) -> Option<(String, Vec<u64>)> {
        let start = body.find("where ")? + "where ".len();
        let rest = &body[start..];
        let eq = rest.find("=(")?;
        let field = rest[..eq].trim().to_string();
        let close = rest.find(')')?;
        let ids = rest[eq + 2..close]
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        Some((field, ids))
    }

    fn matches(item: &Value, field: &str, ids: &[u64]) -> bool {
        match item.get(field) {
            Some(Value::Number(n)) => n.as_u64().is_some_and(|n| ids.contains(&n)),
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_u64)
                .any(|n| ids.contains(&n)),
            _ => false,
        }
    }

    #[async_trait]
    impl ApiBackend for FakeBackend {
        async fn post(&self, endpoint: &str, body: &str) -> IgdbResult<ApiResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((endpoint.to_string(), body.to_string()));

            let canned = self.responses.lock().unwrap().get(endpoint).cloned();
            let Some(canned) = canned else {
                return Ok(ApiResponse {
                    status: 404,
                    body: String::new(),
                });
            };

            let body = match (serde_json::from_str::<Value>(&canned.body), id_filter(body)) {
                (Ok(Value::Array(items)), Some((field, ids))) => {
                    let kept: Vec<Value> = items
                        .into_iter()
                        .filter(|item| matches(item, &field, &ids))
                        .collect();
                    Value::Array(kept).to_string()
                }
                _ => canned.body,
            };

            Ok(ApiResponse {
                status: canned.status,
                body,
            })
        }
    }
}
