// src/lib.rs
// =============================================================================
// igdb-chat: IGDB game lookups formatted as chat messages.
//
// Modules:
// - config: bot name, avatar, API key and client tuning
// - query: argument parsing and IGDB query strings
// - igdb: HTTP transport, batched lookups and the enrichment cascade
// - message: chat message structures, formatting and terminal rendering
// - commands: the four slash commands wired together
//
// The binary in main.rs is a thin CLI over `commands::IgdbApp`.
// =============================================================================

pub mod commands;
pub mod config;
pub mod igdb;
pub mod message;
pub mod query;
