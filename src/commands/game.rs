// src/commands/game.rs
// =============================================================================
// `/igdb-game [ID OR SLUG] (scope)`: one game in detail.
//
// Without a scope the card gets every descriptive lookup (platforms, genres,
// companies, ...). With a scope only that sub-detail is fetched and shown as
// follow-up attachments under the card.
// =============================================================================

use tracing::info;

use super::usage::GAME;
use super::{IgdbApp, Reply};
use crate::igdb::ApiBackend;
use crate::message::{bad_api_key, usage, Message};
use crate::query::{game_details_query, EnrichmentOptions, GameLookup, QueryError, Scope};

impl<B: ApiBackend> IgdbApp<B> {
    pub async fn game(&self, args: &[String]) -> Reply<Message> {
        if !self.has_api_key() {
            return Reply::failed(bad_api_key(&self.settings));
        }

        let mut args = args.iter().map(|a| a.trim()).filter(|a| !a.is_empty());
        let Some(id_or_slug) = args.next() else {
            return Reply::failed(usage(&self.settings, GAME.usage, None));
        };

        let options = match args.next().map(str::parse::<Scope>) {
            None => EnrichmentOptions::full(),
            Some(Ok(scope)) => EnrichmentOptions::for_scope(scope),
            Some(Err(QueryError::UnknownScope(scope))) => {
                let problem = format!("Didn't understand your second argument `{}`", scope);
                return Reply::failed(usage(&self.settings, GAME.usage, Some(&problem)));
            }
            Some(Err(_)) => return Reply::failed(usage(&self.settings, GAME.usage, None)),
        };

        let lookup = GameLookup::parse(id_or_slug);
        info!(game = %lookup, "fetching game details");
        self.send_games(&game_details_query(&lookup), &options).await
    }

    // Detail card for a game picked by ID, e.g. from a preview tile.
    pub async fn game_by_id(&self, id: u64) -> Reply<Message> {
        if !self.has_api_key() {
            return Reply::failed(bad_api_key(&self.settings));
        }
        let lookup = GameLookup::Id(id);
        self.send_games(&game_details_query(&lookup), &EnrichmentOptions::full())
            .await
    }
}
