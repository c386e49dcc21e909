// src/query/mod.rs
// =============================================================================
// Turns what the user typed into IGDB queries.
//
// Submodules:
// - parse: game IDs vs slugs, the optional detail scope, search text rules
// - builder: IGDB query strings ("fields ...;where ...;")
// - options: which enrichment lookups a command asks for
// =============================================================================

mod builder;
mod options;
mod parse;

pub use builder::{
    escape, game_details_query, game_search_preview_query, games_search_query, ids_query,
};
pub use options::EnrichmentOptions;
pub use parse::{search_text, GameLookup, QueryError, Scope, MIN_SEARCH_LEN};
