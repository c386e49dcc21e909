// src/query/parse.rs
// =============================================================================
// Parsing of slash-command arguments.
//
// `/igdb-game 1942 similar` -> GameLookup::Id(1942) + Scope::Similar
// `/igdb-game the-witcher-3-wild-hunt` -> GameLookup::Slug(...)
// `/igdb-games  zelda  breath ` -> "zelda breath"
// =============================================================================

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("no arguments given")]
    MissingArgument,

    #[error("search query must be at least {MIN_SEARCH_LEN} letters, got {0:?}")]
    TooShort(String),

    #[error("didn't understand scope `{0}`")]
    UnknownScope(String),
}

// How the user identified a single game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLookup {
    Id(u64),
    Slug(String),
}

impl GameLookup {
    // Only an all-digit argument is an ID, so slugs like "2064-read-only-memories"
    // stay slugs.
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = arg.parse::<u64>() {
                return GameLookup::Id(id);
            }
        }
        GameLookup::Slug(arg.to_string())
    }
}

impl fmt::Display for GameLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameLookup::Id(id) => write!(f, "{}", id),
            GameLookup::Slug(slug) => write!(f, "{}", slug),
        }
    }
}

/// Sub-details of a single game, the optional second `/igdb-game` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Artworks,
    Bundles,
    Expansions,
    Screenshots,
    Similar,
    Dlc,
    Videos,
    Feeds,
    Pulses,
}

impl Scope {
    pub const ALL: [Scope; 9] = [
        Scope::Artworks,
        Scope::Bundles,
        Scope::Expansions,
        Scope::Screenshots,
        Scope::Similar,
        Scope::Dlc,
        Scope::Videos,
        Scope::Feeds,
        Scope::Pulses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Artworks => "artworks",
            Scope::Bundles => "bundles",
            Scope::Expansions => "expansions",
            Scope::Screenshots => "screenshots",
            Scope::Similar => "similar",
            Scope::Dlc => "dlc",
            Scope::Videos => "videos",
            Scope::Feeds => "feeds",
            Scope::Pulses => "pulses",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Scope::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == wanted)
            .ok_or(QueryError::UnknownScope(wanted))
    }
}

// Joins the command arguments back into the search text the user meant.
pub fn search_text(args: &[String]) -> Result<String, QueryError> {
    let text = args
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(QueryError::MissingArgument);
    }
    if text.chars().count() < MIN_SEARCH_LEN {
        return Err(QueryError::TooShort(text));
    }
    Ok(text)
}
