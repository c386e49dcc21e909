// src/commands/mod.rs
// =============================================================================
// The slash commands.
//
//   /igdb                         -> help card
//   /igdb-games [QUERY]           -> collapsed list of matching games
//   /igdb-game [ID OR SLUG] (..)  -> full detail card, or one sub-detail
//   /igdb-game-search [QUERY]     -> poster preview, pick one for details
//
// Each command checks for an API key first, validates its arguments, then
// runs the search + enrichment and formats whatever came back. Lookup
// failures are turned into the matching error message here, in one place.
// =============================================================================

mod game;
mod game_search;
mod games;
pub mod usage;

use tracing::warn;

use crate::config::Settings;
use crate::igdb::{hydrate, ApiBackend, GameRecord, IgdbClient, IgdbError, IgdbResult, ReqwestBackend};
use crate::message::{
    bad_api_key, game_results, no_response, no_results, parse_failure, Message,
};
use crate::query::EnrichmentOptions;

/// What a command hands back, plus whether it counts as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub body: T,
    pub failed: bool,
}

impl<T> Reply<T> {
    pub fn ok(body: T) -> Self {
        Self {
            body,
            failed: false,
        }
    }

    pub fn failed(body: T) -> Self {
        Self { body, failed: true }
    }
}

pub struct IgdbApp<B: ApiBackend> {
    settings: Settings,
    client: IgdbClient<B>,
}

impl IgdbApp<ReqwestBackend> {
    // A missing key still builds a client; every command checks the key
    // before sending anything.
    pub fn new(settings: Settings) -> IgdbResult<Self> {
        let key = settings.api_key().unwrap_or_default().to_string();
        let backend = ReqwestBackend::new(&settings, &key)?;
        Ok(Self::with_backend(settings, backend))
    }
}

impl<B: ApiBackend> IgdbApp<B> {
    pub fn with_backend(settings: Settings, backend: B) -> Self {
        Self {
            settings,
            client: IgdbClient::with_backend(backend),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // `/igdb`
    pub fn help(&self) -> Reply<Message> {
        Reply::ok(usage::help_message(&self.settings))
    }

    fn has_api_key(&self) -> bool {
        self.settings.api_key().is_some()
    }

    // Primary search followed by the enrichment cascade.
    async fn fetch_records(
        &self,
        query: &str,
        options: &EnrichmentOptions,
    ) -> IgdbResult<Vec<GameRecord>> {
        let games = self.client.search(query).await?;
        Ok(hydrate(&self.client, games, options).await)
    }

    // Search, hydrate and format, mapping every failure to its message.
    async fn send_games(&self, query: &str, options: &EnrichmentOptions) -> Reply<Message> {
        match self.fetch_records(query, options).await {
            Ok(records) if records.is_empty() => Reply::ok(no_results(&self.settings)),
            Ok(records) => Reply::ok(game_results(&self.settings, &records, options)),
            Err(e) => Reply::failed(failure_message(&self.settings, &e)),
        }
    }
}

pub fn failure_message(settings: &Settings, error: &IgdbError) -> Message {
    warn!(error = %error, "game lookup failed");
    match error {
        IgdbError::Unauthorized { .. } => bad_api_key(settings),
        IgdbError::JsonParse(_) => parse_failure(settings),
        _ => no_response(settings),
    }
}

// Short version of failure_message for preview titles.
pub fn failure_title(error: &IgdbError) -> &'static str {
    match error {
        IgdbError::Unauthorized { .. } => "No API Key!",
        IgdbError::JsonParse(_) => "Failed to parse response!",
        _ => "Failed to get a response!",
    }
}
