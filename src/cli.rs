// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Each slash command becomes a subcommand. The chat-style names work too:
//
//   igdb-chat games zelda breath        (or: igdb-chat igdb-games ...)
//   igdb-chat game 1942 similar         (or: igdb-chat igdb-game ...)
//   igdb-chat game-search zelda --select 1025
//
// Settings come from IGDB_* environment variables (and .env); the global
// flags below override them for a single run.
// =============================================================================

use clap::{Parser, Subcommand};
use igdb_chat::config::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "igdb-chat",
    version,
    about = "Look up games on IGDB and print them as chat messages",
    long_about = "igdb-chat runs the IGDB chat commands from a terminal. \
                  Messages are printed as readable text, or as the JSON a chat host would receive with --json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the raw message JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// IGDB API key (overrides IGDB_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Bot name shown on messages (overrides IGDB_NAME)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Avatar URL shown on messages (overrides IGDB_ICON)
    #[arg(long, global = true)]
    pub icon: Option<String>,

    /// IGDB API root (overrides IGDB_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the list of commands
    Igdb,

    /// Search for games
    ///
    /// Example: igdb-chat games zelda breath of the wild
    #[command(visible_alias = "igdb-games")]
    Games {
        /// Search text, at least 3 letters
        query: Vec<String>,
    },

    /// Get details for a game, optionally one sub-detail
    ///
    /// Example: igdb-chat game the-witcher-3-wild-hunt screenshots
    #[command(visible_alias = "igdb-game")]
    Game {
        /// Numeric game ID or slug
        id_or_slug: Option<String>,

        /// artworks, bundles, expansions, screenshots, similar, dlc,
        /// videos, feeds or pulses
        scope: Option<String>,
    },

    /// Search for games using poster previews
    ///
    /// Example: igdb-chat game-search zelda
    #[command(visible_alias = "igdb-game-search")]
    GameSearch {
        /// Search text, at least 3 letters
        query: Vec<String>,

        /// Pick a preview tile by its ID and show that game
        #[arg(long)]
        select: Option<String>,
    },
}

impl Cli {
    // Flags win over whatever the environment provided.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(key) = &self.api_key {
            settings = settings.with_api_key(key.clone());
        }
        if let Some(name) = &self.name {
            settings = settings.with_name(name.clone());
        }
        if let Some(icon) = &self.icon {
            settings = settings.with_icon(icon.clone());
        }
        if let Some(base_url) = &self.base_url {
            settings = settings.with_base_url(base_url.clone());
        }
        settings
    }
}
