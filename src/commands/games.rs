// src/commands/games.rs
// =============================================================================
// `/igdb-games [QUERY]`: text search, one collapsed card per match.
// =============================================================================

use tracing::info;

use super::usage::GAMES;
use super::{IgdbApp, Reply};
use crate::igdb::ApiBackend;
use crate::message::{bad_api_key, usage, Message};
use crate::query::{games_search_query, search_text, EnrichmentOptions, QueryError};

impl<B: ApiBackend> IgdbApp<B> {
    pub async fn games(&self, args: &[String]) -> Reply<Message> {
        if !self.has_api_key() {
            return Reply::failed(bad_api_key(&self.settings));
        }

        let text = match search_text(args) {
            Ok(text) => text,
            Err(QueryError::TooShort(_)) => {
                return Reply::failed(usage(
                    &self.settings,
                    GAMES.usage,
                    Some("Search query must be at least 3 letters!"),
                ))
            }
            Err(_) => return Reply::failed(usage(&self.settings, GAMES.usage, None)),
        };

        info!(query = %text, "searching games");

        let options = EnrichmentOptions::simple(format!("Results for query \"{}\"", text));
        self.send_games(&games_search_query(&text), &options).await
    }
}
