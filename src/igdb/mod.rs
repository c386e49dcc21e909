// src/igdb/mod.rs
// =============================================================================
// Everything that talks to the IGDB API.
//
// Submodules:
// - http: the POST transport (real reqwest backend + a fake for tests)
// - client: primary search and batched ID lookups
// - enrich: the follow-up lookup cascade that hydrates game records
// - models: decoded IGDB records and the hydrated GameRecord
// - error: IgdbError / IgdbResult
// =============================================================================

mod client;
mod enrich;
mod error;
mod http;
mod models;

pub use client::{unique_ids, DefaultIgdbClient, IgdbClient, BATCH_SIZE};
pub use enrich::hydrate;
pub use error::{IgdbError, IgdbResult};
pub use http::{ApiBackend, ApiResponse, ReqwestBackend};
pub use models::{
    Feed, Game, GameRecord, GameVideo, Image, MultiplayerMode, Named, Pulse, RelatedGame,
    ReleaseDate, TimeToBeat, Website,
};

#[cfg(test)]
pub use http::testing;
