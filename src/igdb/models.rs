// src/igdb/models.rs
// =============================================================================
// IGDB records as we decode them, plus the hydrated GameRecord the
// enrichment cascade produces.
//
// IGDB omits fields that have no value, so nearly everything is optional or
// #[serde(default)]. Reference fields on a game (platforms, genres, ...) are
// plain ID lists; the enrichment step resolves them into the types below.
// =============================================================================

use chrono::{TimeZone, Utc};
use serde::Deserialize;

// Lookup tables are keyed by the record's own ID.
pub trait Identified {
    fn id(&self) -> u64;
}

// Records fetched with `where game=(...)` instead of by their own ID.
pub trait GameLinked {
    fn game_ids(&self) -> Vec<u64>;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        })*
    };
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Game {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub storyline: Option<String>,
    pub url: Option<String>,
    pub cover: Option<u64>,

    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
    pub aggregated_rating: Option<f64>,
    pub aggregated_rating_count: Option<u64>,
    pub total_rating: Option<f64>,
    pub total_rating_count: Option<u64>,

    #[serde(default)]
    pub platforms: Vec<u64>,
    #[serde(default)]
    pub genres: Vec<u64>,
    #[serde(default)]
    pub game_modes: Vec<u64>,
    #[serde(default)]
    pub involved_companies: Vec<u64>,
    #[serde(default)]
    pub game_engines: Vec<u64>,
    #[serde(default)]
    pub player_perspectives: Vec<u64>,
    #[serde(default)]
    pub themes: Vec<u64>,
    #[serde(default)]
    pub websites: Vec<u64>,
    pub franchise: Option<u64>,
    #[serde(default)]
    pub franchises: Vec<u64>,
    #[serde(default)]
    pub alternative_names: Vec<u64>,
    #[serde(default)]
    pub keywords: Vec<u64>,
    #[serde(default)]
    pub release_dates: Vec<u64>,
    #[serde(default)]
    pub multiplayer_modes: Vec<u64>,

    #[serde(default)]
    pub similar_games: Vec<u64>,
    #[serde(default)]
    pub bundles: Vec<u64>,
    #[serde(default)]
    pub expansions: Vec<u64>,
    #[serde(default)]
    pub dlcs: Vec<u64>,
    #[serde(default)]
    pub artworks: Vec<u64>,
    #[serde(default)]
    pub screenshots: Vec<u64>,
    #[serde(default)]
    pub videos: Vec<u64>,
}

impl Game {
    // IGDB has both a main `franchise` and a `franchises` list.
    pub fn franchise_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.franchise.into_iter().collect();
        for id in &self.franchises {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

/// Anything IGDB describes with a name: platforms, genres, themes,
/// companies, alternative names, pulse sources...
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Named {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub url: Option<String>,
    pub comment: Option<String>,
}

// Game websites and pulse URLs share this shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Website {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub trusted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InvolvedCompany {
    pub id: u64,
    pub company: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseDate {
    pub id: u64,
    pub platform: Option<u64>,
    pub human: Option<String>,
    #[serde(skip)]
    pub platform_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MultiplayerMode {
    pub id: u64,
    pub game: Option<u64>,
    pub platform: Option<u64>,
    pub campaigncoop: bool,
    pub dropin: bool,
    pub lancoop: bool,
    pub offlinecoop: bool,
    pub offlinecoopmax: Option<u32>,
    pub offlinemax: Option<u32>,
    pub onlinecoop: bool,
    pub onlinecoopmax: Option<u32>,
    pub onlinemax: Option<u32>,
    pub splitscreen: bool,
    #[serde(skip)]
    pub platform_name: Option<String>,
}

/// Completion times in seconds, as IGDB stores them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimeToBeat {
    pub id: u64,
    pub game: Option<u64>,
    pub hastly: Option<u64>,
    pub normally: Option<u64>,
    pub completely: Option<u64>,
}

impl TimeToBeat {
    pub fn hastly_hours(&self) -> Option<String> {
        self.hastly.map(hours)
    }

    pub fn normally_hours(&self) -> Option<String> {
        self.normally.map(hours)
    }

    pub fn completely_hours(&self) -> Option<String> {
        self.completely.map(hours)
    }
}

// 36000 -> "10", 5400 -> "1.5"
fn hours(seconds: u64) -> String {
    let text = format!("{:.1}", seconds as f64 / 3600.0);
    text.trim_end_matches(".0").to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cover {
    pub id: u64,
    pub game: Option<u64>,
    pub url: Option<String>,
    pub image_id: Option<String>,
}

// Artworks and screenshots.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Image {
    pub id: u64,
    pub url: Option<String>,
    pub image_id: Option<String>,
}

impl Image {
    pub fn absolute_url(&self) -> Option<String> {
        self.url.as_deref().map(absolute_url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameVideo {
    pub id: u64,
    pub name: Option<String>,
    #[serde(default)]
    pub video_id: String,
}

impl GameVideo {
    // IGDB videos are YouTube IDs.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

// A similar game, bundle, expansion or DLC.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelatedGame {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub cover: Option<u64>,
    #[serde(skip)]
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Feed {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub category: Option<u8>,
    pub content: Option<String>,
    pub updated_at: Option<i64>,
    pub pulse: Option<u64>,
    #[serde(default)]
    pub games: Vec<u64>,
}

impl Feed {
    // Older feed items carry `name` instead of `title`.
    pub fn heading(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn category_label(&self) -> &'static str {
        match self.category {
            Some(1) => "Pulse Article",
            Some(2) => "Coming Soon",
            Some(3) => "New Trailer",
            Some(5) => "User Contributed Item",
            Some(6) => "User Contributions",
            Some(7) => "Page Contributed Item",
            _ => "Unknown",
        }
    }

    pub fn updated_display(&self) -> String {
        display_timestamp(self.updated_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pulse {
    pub id: u64,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub updated_at: Option<i64>,
    pub published_at: Option<i64>,
    pub pulse_source: Option<u64>,
    pub website: Option<u64>,
    #[serde(skip)]
    pub source_name: Option<String>,
    #[serde(skip)]
    pub link: Option<String>,
}

impl Pulse {
    pub fn updated_display(&self) -> String {
        display_timestamp(self.updated_at.or(self.published_at))
    }
}

identified!(
    Named,
    Website,
    InvolvedCompany,
    ReleaseDate,
    MultiplayerMode,
    TimeToBeat,
    Cover,
    Image,
    GameVideo,
    RelatedGame,
    Feed,
    Pulse,
);

impl GameLinked for Cover {
    fn game_ids(&self) -> Vec<u64> {
        self.game.into_iter().collect()
    }
}

impl GameLinked for MultiplayerMode {
    fn game_ids(&self) -> Vec<u64> {
        self.game.into_iter().collect()
    }
}

impl GameLinked for TimeToBeat {
    fn game_ids(&self) -> Vec<u64> {
        self.game.into_iter().collect()
    }
}

impl GameLinked for Feed {
    fn game_ids(&self) -> Vec<u64> {
        self.games.clone()
    }
}

// IGDB image URLs are protocol-relative ("//images.igdb.com/...").
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}

fn display_timestamp(unix: Option<i64>) -> String {
    unix.and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// A base game with every requested enrichment attached.
///
/// `None` means the lookup wasn't requested or failed; `Some(vec![])` means
/// it ran and found nothing.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub game: Game,
    pub thumb_url: Option<String>,

    pub platforms: Option<Vec<Named>>,
    pub genres: Option<Vec<Named>>,
    pub game_modes: Option<Vec<Named>>,
    pub companies: Option<Vec<Named>>,
    pub game_engines: Option<Vec<Named>>,
    pub player_perspectives: Option<Vec<Named>>,
    pub themes: Option<Vec<Named>>,
    pub franchises: Option<Vec<Named>>,
    pub alternative_names: Option<Vec<Named>>,
    pub keywords: Option<Vec<Named>>,
    pub websites: Option<Vec<Website>>,
    pub release_dates: Option<Vec<ReleaseDate>>,
    pub multiplayer_modes: Option<Vec<MultiplayerMode>>,
    pub time_to_beat: Option<Vec<TimeToBeat>>,

    pub artworks: Option<Vec<Image>>,
    pub screenshots: Option<Vec<Image>>,
    pub videos: Option<Vec<GameVideo>>,
    pub similar: Option<Vec<RelatedGame>>,
    pub bundles: Option<Vec<RelatedGame>>,
    pub expansions: Option<Vec<RelatedGame>>,
    pub dlcs: Option<Vec<RelatedGame>>,
    pub feeds: Option<Vec<Feed>>,
    pub pulses: Option<Vec<Pulse>>,
}

impl GameRecord {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }
}
