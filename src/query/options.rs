// src/query/options.rs
// =============================================================================
// Which follow-up lookups a command wants on top of the base game search.
// =============================================================================

use super::parse::Scope;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentOptions {
    /// Search-list mode: collapsed cards, no related-game counts
    pub simple: bool,
    /// Header text for multi-result messages ("Results" when unset)
    pub results_text: Option<String>,

    pub covers: bool,
    pub platforms: bool,
    pub genres: bool,
    pub game_modes: bool,
    pub companies: bool,
    pub game_engines: bool,
    pub player_perspectives: bool,
    pub themes: bool,
    pub websites: bool,
    pub franchises: bool,
    pub alternative_names: bool,
    pub keywords: bool,
    pub release_dates: bool,
    pub multiplayer_modes: bool,
    pub time_to_beat: bool,

    pub artworks: bool,
    pub bundles: bool,
    pub expansions: bool,
    pub screenshots: bool,
    pub similar: bool,
    pub dlcs: bool,
    pub videos: bool,
    pub feeds: bool,
    pub pulses: bool,
}

impl EnrichmentOptions {
    // Everything the detail card shows when no scope is given.
    pub fn full() -> Self {
        Self {
            covers: true,
            platforms: true,
            genres: true,
            game_modes: true,
            companies: true,
            game_engines: true,
            player_perspectives: true,
            themes: true,
            websites: true,
            franchises: true,
            alternative_names: true,
            keywords: true,
            release_dates: true,
            multiplayer_modes: true,
            time_to_beat: true,
            ..Self::default()
        }
    }

    pub fn for_scope(scope: Scope) -> Self {
        let mut options = Self {
            covers: true,
            ..Self::default()
        };
        match scope {
            Scope::Artworks => options.artworks = true,
            Scope::Bundles => options.bundles = true,
            Scope::Expansions => options.expansions = true,
            Scope::Screenshots => options.screenshots = true,
            Scope::Similar => options.similar = true,
            Scope::Dlc => options.dlcs = true,
            Scope::Videos => options.videos = true,
            Scope::Feeds => options.feeds = true,
            Scope::Pulses => options.pulses = true,
        }
        options
    }

    pub fn simple(results_text: impl Into<String>) -> Self {
        Self {
            simple: true,
            results_text: Some(results_text.into()),
            covers: true,
            ..Self::default()
        }
    }

    pub fn wants_related_games(&self) -> bool {
        self.similar || self.bundles || self.expansions || self.dlcs
    }
}
