// src/commands/game_search.rs
// =============================================================================
// `/igdb-game-search [QUERY]`: poster previews while the user types.
//
// The preview never posts a message. Problems are reported through the
// preview title instead, and picking a tile runs the detail lookup for that
// game's ID.
// =============================================================================

use tracing::info;

use super::{failure_title, IgdbApp, Reply};
use crate::igdb::{hydrate, ApiBackend};
use crate::message::{game_preview, Message, Preview};
use crate::query::{game_search_preview_query, search_text, EnrichmentOptions, QueryError};

impl<B: ApiBackend> IgdbApp<B> {
    pub async fn game_search_preview(&self, args: &[String]) -> Reply<Preview> {
        if !self.has_api_key() {
            return Reply::failed(Preview::empty("Set API Key first!"));
        }

        let text = match search_text(args) {
            Ok(text) => text,
            Err(QueryError::TooShort(_)) => {
                return Reply::failed(Preview::empty("Search query must be at least 3 letters!"))
            }
            Err(_) => return Reply::failed(Preview::empty("Type a game to search for")),
        };

        info!(query = %text, "previewing games");

        let games = match self.client.search(&game_search_preview_query(&text)).await {
            Ok(games) => games,
            Err(e) => return Reply::failed(Preview::empty(failure_title(&e))),
        };
        if games.is_empty() {
            return Reply::ok(Preview::empty("No Results!"));
        }

        let options = EnrichmentOptions {
            covers: true,
            ..EnrichmentOptions::default()
        };
        let records = hydrate(&self.client, games, &options).await;
        Reply::ok(game_preview(&records))
    }

    // A preview tile was picked; its ID is the game ID.
    pub async fn game_search_select(&self, item_id: &str) -> Reply<Message> {
        match item_id.trim().parse::<u64>() {
            Ok(id) => self.game_by_id(id).await,
            Err(_) => self.game(&[item_id.to_string()]).await,
        }
    }
}
