// src/commands/usage.rs
// =============================================================================
// Usage strings for each slash command and the `/igdb` help card.
// =============================================================================

use crate::config::Settings;
use crate::message::{single_attachment, Attachment, Message, COLOR_HELP};

pub struct CommandUsage {
    pub command: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const HELP: CommandUsage = CommandUsage {
    command: "igdb",
    usage: "`/igdb`",
    description: "Show this help menu",
};

pub const GAMES: CommandUsage = CommandUsage {
    command: "igdb-games",
    usage: "`/igdb-games [QUERY]`",
    description: "Search for games",
};

pub const GAME: CommandUsage = CommandUsage {
    command: "igdb-game",
    usage: "`/igdb-game [ID OR SLUG] (artworks|bundles|expansions|screenshots|similar|dlc|videos|feeds|pulses)`",
    description: "Get details for a game. Second parameter is for sub-details",
};

pub const GAME_SEARCH: CommandUsage = CommandUsage {
    command: "igdb-game-search",
    usage: "`/igdb-game-search [QUERY]`",
    description: "Search for games using poster previews",
};

pub const ALL: [&CommandUsage; 4] = [&HELP, &GAMES, &GAME, &GAME_SEARCH];

// The amber "Commands" card: each usage line followed by a quoted
// description.
pub fn help_message(settings: &Settings) -> Message {
    let text = ALL
        .iter()
        .map(|c| format!("{}\n>{}", c.usage, c.description))
        .collect::<Vec<_>>()
        .join("\n");

    single_attachment(
        settings,
        Attachment::new(COLOR_HELP).title("Commands").text(text),
    )
}
