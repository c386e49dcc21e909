// src/igdb/client.rs
// =============================================================================
// Typed requests on top of the HTTP backend.
//
// Two kinds of calls:
// - search(): the primary `games` request built from the user's command
// - fetch_by_ids(): follow-up lookups, batched 10 IDs per request because
//   that's what the enrichment cascade has always sent IGDB
// =============================================================================

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;

use super::error::{IgdbError, IgdbResult};
use super::http::{ApiBackend, ReqwestBackend};
use super::models::Game;
use crate::config::Settings;
use crate::query::ids_query;

pub const BATCH_SIZE: usize = 10;
const MAX_CONCURRENT_BATCHES: usize = 4;

pub type DefaultIgdbClient = IgdbClient<ReqwestBackend>;

pub struct IgdbClient<B: ApiBackend> {
    backend: B,
}

impl DefaultIgdbClient {
    pub fn new(settings: &Settings, api_key: &str) -> IgdbResult<Self> {
        Ok(Self::with_backend(ReqwestBackend::new(settings, api_key)?))
    }
}

impl<B: ApiBackend> IgdbClient<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    // The primary game request.
    pub async fn search(&self, query: &str) -> IgdbResult<Vec<Game>> {
        self.post_json("games", query).await
    }

    // Fetches records of `endpoint` whose `filter_field` is one of `ids`.
    //
    // IDs are made unique (first occurrence wins) and sent in batches of
    // BATCH_SIZE. Any failing batch fails the whole lookup.
    pub async fn fetch_by_ids<T>(
        &self,
        endpoint: &str,
        fields: &str,
        filter_field: &str,
        ids: &[u64],
    ) -> IgdbResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let ids = unique_ids(ids.iter().copied());
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(endpoint, ids = ids.len(), "fetching by ids");

        let batches: Vec<Vec<T>> = stream::iter(ids.chunks(BATCH_SIZE))
            .map(|chunk| {
                let body = ids_query(fields, filter_field, chunk);
                async move { self.post_json::<T>(endpoint, &body).await }
            })
            .buffer_unordered(MAX_CONCURRENT_BATCHES)
            .try_collect()
            .await?;

        Ok(batches.into_iter().flatten().collect())
    }

    async fn post_json<T>(&self, endpoint: &str, body: &str) -> IgdbResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.backend.post(endpoint, body).await?;

        match response.status {
            200..=299 => {}
            401 | 403 => {
                return Err(IgdbError::Unauthorized {
                    status: response.status,
                })
            }
            status => {
                return Err(IgdbError::ApiRequestFailed {
                    status,
                    endpoint: endpoint.to_string(),
                })
            }
        }

        if response.body.trim().is_empty() {
            return Err(IgdbError::EmptyResponse {
                endpoint: endpoint.to_string(),
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}

// Set-uniquing that keeps the first-seen order, so requests are stable.
pub fn unique_ids(ids: impl IntoIterator<Item = u64>) -> Vec<u64> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::igdb::http::testing::FakeBackend;
    use crate::igdb::models::Named;
    use serde_json::json;

    #[test]
    fn test_unique_ids_keeps_first_order() {
        assert_eq!(unique_ids(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_ids(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_search_decodes_games() {
        let backend = FakeBackend::new().with_json(
            "games",
            json!([{"id": 1, "name": "Halo"}, {"id": 2, "name": "Halo 2"}]),
        );
        let client = IgdbClient::with_backend(backend);
        let games = client.search("search \"halo\";").await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].name, "Halo 2");
    }

    #[tokio::test]
    async fn test_search_status_mapping() {
        let client = IgdbClient::with_backend(FakeBackend::new().with_status("games", 401, ""));
        assert!(matches!(
            client.search("x").await,
            Err(IgdbError::Unauthorized { status: 401 })
        ));

        let client =
            IgdbClient::with_backend(FakeBackend::new().with_status("games", 500, "oops"));
        assert!(matches!(
            client.search("x").await,
            Err(IgdbError::ApiRequestFailed { status: 500, .. })
        ));

        let client = IgdbClient::with_backend(FakeBackend::new().with_status("games", 200, " "));
        assert!(matches!(
            client.search("x").await,
            Err(IgdbError::EmptyResponse { .. })
        ));

        let client =
            IgdbClient::with_backend(FakeBackend::new().with_status("games", 200, "<html>"));
        assert!(matches!(
            client.search("x").await,
            Err(IgdbError::JsonParse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_ids_batches_of_ten() {
        let platforms: Vec<_> = (1..=25)
            .map(|id| json!({"id": id, "name": format!("Platform {}", id)}))
            .collect();
        let backend = FakeBackend::new().with_json("platforms", json!(platforms));
        let client = IgdbClient::with_backend(backend.clone());

        // 25 unique IDs plus duplicates -> 3 requests.
        let mut ids: Vec<u64> = (1..=25).collect();
        ids.extend([1, 2, 3]);

        let found: Vec<Named> = client
            .fetch_by_ids("platforms", "name", "id", &ids)
            .await
            .unwrap();

        assert_eq!(found.len(), 25);
        let requests = backend.requests_to("platforms");
        assert_eq!(requests.len(), 3);
        assert!(requests.contains(&"fields name;where id=(1,2,3,4,5,6,7,8,9,10);".to_string()));
        assert!(requests.contains(&"fields name;where id=(21,22,23,24,25);".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_by_ids_without_ids_sends_nothing() {
        let backend = FakeBackend::new();
        let client = IgdbClient::with_backend(backend.clone());
        let found: Vec<Named> = client
            .fetch_by_ids("genres", "name", "id", &[])
            .await
            .unwrap();
        assert!(found.is_empty());
        assert!(backend.requests().is_empty());
    }
}
