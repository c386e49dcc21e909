// src/igdb/enrich.rs
// =============================================================================
// The enrichment cascade: turns base `games` results into hydrated records.
//
// How it works:
// 1. Stage 1 runs every independent lookup the options ask for at the same
//    time (covers, platforms, genres, ..., related games, feeds).
// 2. Stage 2 runs lookups that need stage 1 answers: platform names for
//    release dates and multiplayer modes, companies behind involved
//    companies, covers of related games, pulses referenced by feeds.
// 3. Stage 3 resolves pulse sources and pulse URLs.
// 4. Every game picks its own entries out of the lookup tables, in the order
//    of its own reference list.
//
// Each stage is awaited as a whole before the next one starts. A lookup that
// fails is logged and its section is left off; nothing else is affected.
// =============================================================================

use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::client::{unique_ids, IgdbClient};
use super::http::ApiBackend;
use super::models::{
    absolute_url, Cover, Feed, Game, GameLinked, GameRecord, GameVideo, Identified, Image,
    InvolvedCompany, MultiplayerMode, Named, Pulse, ReleaseDate, RelatedGame, TimeToBeat,
    Website,
};
use crate::query::EnrichmentOptions;

type ById<T> = HashMap<u64, T>;
type ByGame<T> = HashMap<u64, Vec<T>>;

const RELATED_FIELDS: &str = "name,slug,url,cover";

// Lookup tables produced by the cascade, before they are split per game.
#[derive(Default)]
struct Tables {
    covers: Option<ByGame<Cover>>,
    platforms: Option<ById<Named>>,
    genres: Option<ById<Named>>,
    game_modes: Option<ById<Named>>,
    involved_companies: Option<ById<InvolvedCompany>>,
    companies: Option<ById<Named>>,
    game_engines: Option<ById<Named>>,
    player_perspectives: Option<ById<Named>>,
    themes: Option<ById<Named>>,
    websites: Option<ById<Website>>,
    franchises: Option<ById<Named>>,
    alternative_names: Option<ById<Named>>,
    keywords: Option<ById<Named>>,
    release_dates: Option<ById<ReleaseDate>>,
    multiplayer_modes: Option<ByGame<MultiplayerMode>>,
    time_to_beat: Option<ByGame<TimeToBeat>>,
    artworks: Option<ById<Image>>,
    screenshots: Option<ById<Image>>,
    videos: Option<ById<GameVideo>>,
    related: Option<ById<RelatedGame>>,
    feeds: Option<ByGame<Feed>>,
    pulses: Option<ById<Pulse>>,
}

pub async fn hydrate<B: ApiBackend>(
    client: &IgdbClient<B>,
    games: Vec<Game>,
    options: &EnrichmentOptions,
) -> Vec<GameRecord> {
    if games.is_empty() {
        return Vec::new();
    }

    let mut tables = fetch_base_tables(client, &games, options).await;
    fetch_dependent_tables(client, &mut tables, options).await;

    games
        .into_iter()
        .map(|game| merge(game, &tables, options))
        .collect()
}

// Stage 1: lookups that only need the base games.
async fn fetch_base_tables<B: ApiBackend>(
    client: &IgdbClient<B>,
    games: &[Game],
    options: &EnrichmentOptions,
) -> Tables {
    let game_ids = unique_ids(games.iter().map(|g| g.id));

    let (
        covers,
        platforms,
        genres,
        game_modes,
        involved_companies,
        game_engines,
        player_perspectives,
        themes,
        websites,
        franchises,
        alternative_names,
        keywords,
        release_dates,
        multiplayer_modes,
        time_to_beat,
        artworks,
        screenshots,
        videos,
        related,
        feeds,
    ) = tokio::join!(
        by_game::<_, Cover>(client, options.covers, "covers", "*", "game", &game_ids),
        by_id::<_, Named>(client, options.platforms, "platforms", "name", refs(games, |g| g.platforms.clone())),
        by_id::<_, Named>(client, options.genres, "genres", "name", refs(games, |g| g.genres.clone())),
        by_id::<_, Named>(client, options.game_modes, "game_modes", "name", refs(games, |g| g.game_modes.clone())),
        by_id::<_, InvolvedCompany>(
            client,
            options.companies,
            "involved_companies",
            "company",
            refs(games, |g| g.involved_companies.clone()),
        ),
        by_id::<_, Named>(
            client,
            options.game_engines,
            "game_engines",
            "name,url",
            refs(games, |g| g.game_engines.clone()),
        ),
        by_id::<_, Named>(
            client,
            options.player_perspectives,
            "player_perspectives",
            "name",
            refs(games, |g| g.player_perspectives.clone()),
        ),
        by_id::<_, Named>(client, options.themes, "themes", "name", refs(games, |g| g.themes.clone())),
        by_id::<_, Website>(client, options.websites, "websites", "trusted,url", refs(games, |g| g.websites.clone())),
        by_id::<_, Named>(client, options.franchises, "franchises", "name", refs(games, Game::franchise_ids)),
        by_id::<_, Named>(
            client,
            options.alternative_names,
            "alternative_names",
            "name,comment",
            refs(games, |g| g.alternative_names.clone()),
        ),
        by_id::<_, Named>(client, options.keywords, "keywords", "name", refs(games, |g| g.keywords.clone())),
        by_id::<_, ReleaseDate>(
            client,
            options.release_dates,
            "release_dates",
            "platform,human",
            refs(games, |g| g.release_dates.clone()),
        ),
        by_game::<_, MultiplayerMode>(
            client,
            options.multiplayer_modes,
            "multiplayer_modes",
            "*",
            "game",
            &game_ids,
        ),
        by_game::<_, TimeToBeat>(client, options.time_to_beat, "time_to_beats", "*", "game", &game_ids),
        by_id::<_, Image>(client, options.artworks, "artworks", "url,image_id", refs(games, |g| g.artworks.clone())),
        by_id::<_, Image>(
            client,
            options.screenshots,
            "screenshots",
            "url,image_id",
            refs(games, |g| g.screenshots.clone()),
        ),
        by_id::<_, GameVideo>(client, options.videos, "game_videos", "name,video_id", refs(games, |g| g.videos.clone())),
        by_id::<_, RelatedGame>(
            client,
            options.wants_related_games(),
            "games",
            RELATED_FIELDS,
            refs(games, |g| related_refs(g, options)),
        ),
        by_game::<_, Feed>(client, options.feeds || options.pulses, "feeds", "*", "games", &game_ids),
    );

    Tables {
        covers,
        platforms,
        genres,
        game_modes,
        involved_companies,
        companies: None,
        game_engines,
        player_perspectives,
        themes,
        websites,
        franchises,
        alternative_names,
        keywords,
        release_dates,
        multiplayer_modes,
        time_to_beat,
        artworks,
        screenshots,
        videos,
        related,
        feeds,
        pulses: None,
    }
}

// Stages 2 and 3: lookups keyed by IDs found in stage 1 results.
async fn fetch_dependent_tables<B: ApiBackend>(
    client: &IgdbClient<B>,
    tables: &mut Tables,
    options: &EnrichmentOptions,
) {
    let platform_ids = missing_platform_ids(tables);
    let company_ids = ids_in(&tables.involved_companies, |ic| ic.company);
    let related_ids: Vec<u64> = tables
        .related
        .as_ref()
        .map(|related| related.keys().copied().collect())
        .unwrap_or_default();
    let pulse_ids = tables
        .feeds
        .as_ref()
        .map(|feeds| unique_ids(feeds.values().flatten().filter_map(|f| f.pulse)))
        .unwrap_or_default();

    let (platform_names, companies, related_covers, pulses) = tokio::join!(
        by_id::<_, Named>(client, !platform_ids.is_empty(), "platforms", "name", platform_ids),
        by_id::<_, Named>(client, tables.involved_companies.is_some(), "companies", "name,url", company_ids),
        by_game::<_, Cover>(client, tables.related.is_some(), "covers", "*", "game", &related_ids),
        by_id::<_, Pulse>(client, options.pulses && tables.feeds.is_some(), "pulses", "*", pulse_ids),
    );

    name_platforms(tables, platform_names);
    tables.companies = companies;
    if let (Some(related), Some(covers)) = (tables.related.as_mut(), related_covers) {
        for game in related.values_mut() {
            game.thumb_url = first_cover_url(&covers, game.id);
        }
    }

    let Some(mut pulses) = pulses else {
        return;
    };

    let source_ids = unique_ids(pulses.values().filter_map(|p| p.pulse_source));
    let url_ids = unique_ids(pulses.values().filter_map(|p| p.website));
    let (sources, urls) = tokio::join!(
        by_id::<_, Named>(client, true, "pulse_sources", "name", source_ids),
        by_id::<_, Website>(client, true, "pulse_urls", "url,trusted", url_ids),
    );

    for pulse in pulses.values_mut() {
        pulse.source_name = lookup(&sources, pulse.pulse_source).map(|s| s.name.clone());
        pulse.link = lookup(&urls, pulse.website).map(|w| w.url.clone());
    }
    tables.pulses = Some(pulses);
}

// Platform IDs referenced by release dates or multiplayer modes whose names
// the platforms lookup didn't already give us.
fn missing_platform_ids(tables: &Tables) -> Vec<u64> {
    let referenced = ids_in(&tables.release_dates, |rd| rd.platform)
        .into_iter()
        .chain(
            tables
                .multiplayer_modes
                .iter()
                .flat_map(|modes| modes.values().flatten().filter_map(|mm| mm.platform)),
        );

    let known = tables.platforms.as_ref();
    unique_ids(referenced.filter(|id| !known.is_some_and(|k| k.contains_key(id))))
}

fn name_platforms(tables: &mut Tables, fetched: Option<ById<Named>>) {
    let mut names: HashMap<u64, String> = HashMap::new();
    for table in [tables.platforms.as_ref(), fetched.as_ref()].into_iter().flatten() {
        for platform in table.values() {
            names.insert(platform.id, platform.name.clone());
        }
    }

    if let Some(release_dates) = tables.release_dates.as_mut() {
        for rd in release_dates.values_mut() {
            rd.platform_name = rd.platform.and_then(|id| names.get(&id).cloned());
        }
    }
    if let Some(modes) = tables.multiplayer_modes.as_mut() {
        for mode in modes.values_mut().flatten() {
            mode.platform_name = mode.platform.and_then(|id| names.get(&id).cloned());
        }
    }
}

// Step 4: one game's slice of every table.
fn merge(game: Game, tables: &Tables, options: &EnrichmentOptions) -> GameRecord {
    let companies = match (&tables.involved_companies, &tables.companies) {
        (Some(involved), Some(_)) => {
            let ids: Vec<u64> = game
                .involved_companies
                .iter()
                .filter_map(|id| involved.get(id).and_then(|ic| ic.company))
                .collect();
            pick(&tables.companies, &ids)
        }
        _ => None,
    };

    let feeds = tables
        .feeds
        .as_ref()
        .map(|feeds| feeds.get(&game.id).cloned().unwrap_or_default());

    let pulses = match (&feeds, &tables.pulses) {
        (Some(feeds), Some(_)) => {
            let ids = unique_ids(feeds.iter().filter_map(|f| f.pulse));
            pick(&tables.pulses, &ids)
        }
        _ => None,
    };

    let related = |wanted: bool, ids: &[u64]| {
        if wanted {
            pick(&tables.related, ids)
        } else {
            None
        }
    };

    GameRecord {
        thumb_url: tables
            .covers
            .as_ref()
            .and_then(|covers| first_cover_url(covers, game.id)),
        platforms: pick(&tables.platforms, &game.platforms),
        genres: pick(&tables.genres, &game.genres),
        game_modes: pick(&tables.game_modes, &game.game_modes),
        companies,
        game_engines: pick(&tables.game_engines, &game.game_engines),
        player_perspectives: pick(&tables.player_perspectives, &game.player_perspectives),
        themes: pick(&tables.themes, &game.themes),
        franchises: pick(&tables.franchises, &game.franchise_ids()),
        alternative_names: pick(&tables.alternative_names, &game.alternative_names),
        keywords: pick(&tables.keywords, &game.keywords),
        websites: pick(&tables.websites, &game.websites),
        release_dates: pick(&tables.release_dates, &game.release_dates),
        multiplayer_modes: tables
            .multiplayer_modes
            .as_ref()
            .map(|mm| mm.get(&game.id).cloned().unwrap_or_default()),
        time_to_beat: tables
            .time_to_beat
            .as_ref()
            .map(|ttb| ttb.get(&game.id).cloned().unwrap_or_default()),
        artworks: pick(&tables.artworks, &game.artworks),
        screenshots: pick(&tables.screenshots, &game.screenshots),
        videos: pick(&tables.videos, &game.videos),
        similar: related(options.similar, &game.similar_games),
        bundles: related(options.bundles, &game.bundles),
        expansions: related(options.expansions, &game.expansions),
        dlcs: related(options.dlcs, &game.dlcs),
        feeds: if options.feeds { feeds } else { None },
        pulses,
        game,
    }
}

// -----------------------------------------------------------------------------
// Lookup helpers
// -----------------------------------------------------------------------------

// Fetches records by their own ID. `None` when not wanted or when the lookup
// failed (after logging it).
async fn by_id<B, T>(
    client: &IgdbClient<B>,
    wanted: bool,
    endpoint: &str,
    fields: &str,
    ids: Vec<u64>,
) -> Option<ById<T>>
where
    B: ApiBackend,
    T: DeserializeOwned + Identified,
{
    if !wanted {
        return None;
    }
    match client.fetch_by_ids::<T>(endpoint, fields, "id", &ids).await {
        Ok(items) => {
            debug!(endpoint, count = items.len(), "lookup done");
            Some(items.into_iter().map(|item| (item.id(), item)).collect())
        }
        Err(e) => {
            warn!(endpoint, error = %e, "enrichment lookup failed, skipping");
            None
        }
    }
}

// Fetches records that point back at games (`where <field>=(game ids)`) and
// groups them per game.
async fn by_game<B, T>(
    client: &IgdbClient<B>,
    wanted: bool,
    endpoint: &str,
    fields: &str,
    filter_field: &str,
    game_ids: &[u64],
) -> Option<ByGame<T>>
where
    B: ApiBackend,
    T: DeserializeOwned + GameLinked + Identified + Clone,
{
    if !wanted {
        return None;
    }
    match client
        .fetch_by_ids::<T>(endpoint, fields, filter_field, game_ids)
        .await
    {
        Ok(items) => {
            debug!(endpoint, count = items.len(), "lookup done");
            // A record linked to games in two batches comes back twice.
            let mut seen = HashSet::new();
            let mut grouped: ByGame<T> = HashMap::new();
            for item in items {
                if !seen.insert(item.id()) {
                    continue;
                }
                for game_id in item.game_ids() {
                    if game_ids.contains(&game_id) {
                        grouped.entry(game_id).or_default().push(item.clone());
                    }
                }
            }
            Some(grouped)
        }
        Err(e) => {
            warn!(endpoint, error = %e, "enrichment lookup failed, skipping");
            None
        }
    }
}

// Unique references across all games.
fn refs(games: &[Game], pick: impl Fn(&Game) -> Vec<u64>) -> Vec<u64> {
    unique_ids(games.iter().flat_map(pick))
}

fn related_refs(game: &Game, options: &EnrichmentOptions) -> Vec<u64> {
    let mut ids = Vec::new();
    if options.similar {
        ids.extend(&game.similar_games);
    }
    if options.bundles {
        ids.extend(&game.bundles);
    }
    if options.expansions {
        ids.extend(&game.expansions);
    }
    if options.dlcs {
        ids.extend(&game.dlcs);
    }
    ids
}

fn ids_in<T>(table: &Option<ById<T>>, field: impl Fn(&T) -> Option<u64>) -> Vec<u64> {
    table
        .as_ref()
        .map(|t| unique_ids(t.values().filter_map(field)))
        .unwrap_or_default()
}

// Entries for `ids` in the caller's order; unknown IDs are dropped.
fn pick<T: Clone>(table: &Option<ById<T>>, ids: &[u64]) -> Option<Vec<T>> {
    table
        .as_ref()
        .map(|t| ids.iter().filter_map(|id| t.get(id).cloned()).collect())
}

fn lookup<T>(table: &Option<ById<T>>, id: Option<u64>) -> Option<&T> {
    table.as_ref().zip(id).and_then(|(t, id)| t.get(&id))
}

fn first_cover_url(covers: &ByGame<Cover>, game_id: u64) -> Option<String> {
    covers
        .get(&game_id)?
        .iter()
        .find_map(|cover| cover.url.as_deref())
        .map(absolute_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::igdb::http::testing::FakeBackend;
    use crate::query::Scope;
    use serde_json::json;

    fn game(value: serde_json::Value) -> Game {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_no_games_means_no_requests() {
        let backend = FakeBackend::new();
        let client = IgdbClient::with_backend(backend.clone());
        let records = hydrate(&client, Vec::new(), &EnrichmentOptions::full()).await;
        assert!(records.is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_covers_become_thumbnails() {
        let backend = FakeBackend::new().with_json(
            "covers",
            json!([
                {"id": 100, "game": 1, "url": "//images.igdb.com/t_thumb/a.jpg"},
                {"id": 200, "game": 2, "url": "//images.igdb.com/t_thumb/b.jpg"}
            ]),
        );
        let client = IgdbClient::with_backend(backend.clone());
        let games = vec![
            game(json!({"id": 1, "name": "One"})),
            game(json!({"id": 2, "name": "Two"})),
            game(json!({"id": 3, "name": "Three"})),
        ];

        let records = hydrate(&client, games, &EnrichmentOptions::simple("Results")).await;

        assert_eq!(
            records[0].thumb_url.as_deref(),
            Some("https://images.igdb.com/t_thumb/a.jpg")
        );
        assert_eq!(
            records[1].thumb_url.as_deref(),
            Some("https://images.igdb.com/t_thumb/b.jpg")
        );
        assert!(records[2].thumb_url.is_none());
        assert_eq!(
            backend.requests_to("covers"),
            vec!["fields *;where game=(1,2,3);".to_string()]
        );
        // simple searches ask for nothing else
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_is_merged_per_game_across_batches() {
        let genres: Vec<_> = (1..=12)
            .map(|id| json!({"id": id, "name": format!("Genre {}", id)}))
            .collect();
        let backend = FakeBackend::new().with_json("genres", json!(genres));
        let client = IgdbClient::with_backend(backend.clone());

        let games = vec![
            game(json!({"id": 1, "genres": [12, 1, 2, 3, 4, 5, 6]})),
            game(json!({"id": 2, "genres": [7, 8, 9, 10, 11, 1]})),
        ];
        let options = EnrichmentOptions {
            genres: true,
            ..EnrichmentOptions::default()
        };

        let records = hydrate(&client, games, &options).await;

        // 12 unique IDs -> two batches, and the 12th genre (second batch)
        // still lands on the first game, in that game's order.
        assert_eq!(backend.requests_to("genres").len(), 2);
        let first: Vec<u64> = records[0]
            .genres
            .as_ref()
            .unwrap()
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(first, vec![12, 1, 2, 3, 4, 5, 6]);
        assert_eq!(records[1].genres.as_ref().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_skipped() {
        let backend = FakeBackend::new()
            .with_status("genres", 500, "boom")
            .with_json("themes", json!([{"id": 4, "name": "Fantasy"}]));
        let client = IgdbClient::with_backend(backend);
        let games = vec![game(json!({"id": 1, "genres": [2], "themes": [4]}))];
        let options = EnrichmentOptions {
            genres: true,
            themes: true,
            ..EnrichmentOptions::default()
        };

        let records = hydrate(&client, games, &options).await;
        assert!(records[0].genres.is_none());
        assert_eq!(records[0].themes.as_ref().unwrap()[0].name, "Fantasy");
    }

    #[tokio::test]
    async fn test_release_dates_get_platform_names() {
        let backend = FakeBackend::new()
            .with_json(
                "release_dates",
                json!([
                    {"id": 10, "platform": 6, "human": "May 19, 2015"},
                    {"id": 11, "platform": 130, "human": "Oct 15, 2019"}
                ]),
            )
            .with_json(
                "platforms",
                json!([
                    {"id": 6, "name": "PC (Microsoft Windows)"},
                    {"id": 130, "name": "Nintendo Switch"}
                ]),
            );
        let client = IgdbClient::with_backend(backend.clone());
        let games = vec![game(json!({"id": 1942, "platforms": [6], "release_dates": [10, 11]}))];

        let records = hydrate(&client, games, &EnrichmentOptions::full()).await;
        let dates = records[0].release_dates.as_ref().unwrap();
        assert_eq!(dates[0].platform_name.as_deref(), Some("PC (Microsoft Windows)"));
        assert_eq!(dates[1].platform_name.as_deref(), Some("Nintendo Switch"));

        // platform 6 was already known from the platforms lookup
        let platform_requests = backend.requests_to("platforms");
        assert_eq!(platform_requests.len(), 2);
        assert!(platform_requests.contains(&"fields name;where id=(130);".to_string()));
    }

    #[tokio::test]
    async fn test_multiplayer_modes_and_time_to_beat() {
        let backend = FakeBackend::new()
            .with_json(
                "multiplayer_modes",
                json!([
                    {"id": 5, "game": 7, "platform": 48, "onlinecoop": true, "onlinecoopmax": 4},
                    {"id": 6, "game": 8, "splitscreen": true}
                ]),
            )
            .with_json("platforms", json!([{"id": 48, "name": "PlayStation 4"}]))
            .with_json(
                "time_to_beats",
                json!([{"id": 9, "game": 7, "normally": 180000}]),
            );
        let client = IgdbClient::with_backend(backend.clone());
        let games = vec![game(json!({"id": 7, "multiplayer_modes": [5]}))];

        let records = hydrate(&client, games, &EnrichmentOptions::full()).await;
        assert_eq!(
            backend.requests_to("multiplayer_modes"),
            vec!["fields *;where game=(7);".to_string()]
        );
        let modes = records[0].multiplayer_modes.as_ref().unwrap();
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].platform_name.as_deref(), Some("PlayStation 4"));
        assert_eq!(modes[0].onlinecoopmax, Some(4));
        let ttb = records[0].time_to_beat.as_ref().unwrap();
        assert_eq!(ttb[0].normally_hours().as_deref(), Some("50"));
    }

    #[tokio::test]
    async fn test_failed_platform_names_keep_release_dates() {
        let backend = FakeBackend::new()
            .with_json(
                "release_dates",
                json!([{"id": 10, "platform": 130, "human": "Oct 15, 2019"}]),
            )
            .with_status("platforms", 500, "boom");
        let client = IgdbClient::with_backend(backend.clone());
        let games = vec![game(json!({"id": 1942, "release_dates": [10]}))];

        let records = hydrate(&client, games, &EnrichmentOptions::full()).await;
        assert_eq!(
            backend.requests_to("platforms"),
            vec!["fields name;where id=(130);".to_string()]
        );
        let dates = records[0].release_dates.as_ref().unwrap();
        assert_eq!(dates[0].human.as_deref(), Some("Oct 15, 2019"));
        assert!(dates[0].platform_name.is_none());
    }

    #[tokio::test]
    async fn test_failed_pulse_sources_keep_pulses() {
        let backend = FakeBackend::new()
            .with_json("feeds", json!([{"id": 1, "pulse": 500, "games": [1942]}]))
            .with_json(
                "pulses",
                json!([{"id": 500, "title": "Patch 1.31", "pulse_source": 7, "website": 8}]),
            )
            .with_status("pulse_sources", 500, "boom")
            .with_json("pulse_urls", json!([{"id": 8, "url": "https://kotaku.com/x"}]));
        let client = IgdbClient::with_backend(backend);
        let games = vec![game(json!({"id": 1942}))];

        let records = hydrate(&client, games, &EnrichmentOptions::for_scope(Scope::Pulses)).await;
        let pulses = records[0].pulses.as_ref().unwrap();
        assert_eq!(pulses[0].title.as_deref(), Some("Patch 1.31"));
        assert!(pulses[0].source_name.is_none());
        assert_eq!(pulses[0].link.as_deref(), Some("https://kotaku.com/x"));
    }

    #[tokio::test]
    async fn test_companies_resolve_through_involved_companies() {
        let backend = FakeBackend::new()
            .with_json(
                "involved_companies",
                json!([{"id": 70, "company": 908}, {"id": 71, "company": 909}]),
            )
            .with_json(
                "companies",
                json!([
                    {"id": 908, "name": "CD Projekt RED", "url": "https://www.igdb.com/companies/cd-projekt-red"},
                    {"id": 909, "name": "Bandai Namco"}
                ]),
            );
        let client = IgdbClient::with_backend(backend);
        let games = vec![game(json!({"id": 1942, "involved_companies": [71, 70]}))];
        let options = EnrichmentOptions {
            companies: true,
            ..EnrichmentOptions::default()
        };

        let records = hydrate(&client, games, &options).await;
        let names: Vec<&str> = records[0]
            .companies
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bandai Namco", "CD Projekt RED"]);
    }

    #[tokio::test]
    async fn test_similar_games_with_covers() {
        let backend = FakeBackend::new()
            .with_json(
                "games",
                json!([{"id": 2, "name": "Dark Souls", "slug": "dark-souls"}]),
            )
            .with_json(
                "covers",
                json!([
                    {"id": 1, "game": 1, "url": "//img/base.jpg"},
                    {"id": 2, "game": 2, "url": "//img/ds.jpg"}
                ]),
            );
        let client = IgdbClient::with_backend(backend);
        let games = vec![
            game(json!({"id": 1, "name": "Bloodborne", "similar_games": [2]})),
            game(json!({"id": 3, "name": "Lonely"})),
        ];

        let records = hydrate(&client, games, &EnrichmentOptions::for_scope(Scope::Similar)).await;
        let similar = records[0].similar.as_ref().unwrap();
        assert_eq!(similar[0].name, "Dark Souls");
        assert_eq!(similar[0].thumb_url.as_deref(), Some("https://img/ds.jpg"));
        assert_eq!(records[0].thumb_url.as_deref(), Some("https://img/base.jpg"));
        // asked for but nothing to show
        assert_eq!(records[1].similar.as_ref().map(Vec::len), Some(0));
        assert!(records[0].bundles.is_none());
    }

    #[tokio::test]
    async fn test_pulses_cascade_through_feeds() {
        let backend = FakeBackend::new()
            .with_json(
                "feeds",
                json!([
                    {"id": 1, "category": 1, "pulse": 500, "games": [1942]},
                    {"id": 2, "category": 3, "games": [1942]}
                ]),
            )
            .with_json(
                "pulses",
                json!([{"id": 500, "title": "Patch 1.31", "pulse_source": 7, "website": 8}]),
            )
            .with_json("pulse_sources", json!([{"id": 7, "name": "Kotaku"}]))
            .with_json("pulse_urls", json!([{"id": 8, "url": "https://kotaku.com/x", "trusted": true}]));
        let client = IgdbClient::with_backend(backend);
        let games = vec![game(json!({"id": 1942, "name": "The Witcher 3"}))];

        let records = hydrate(&client, games, &EnrichmentOptions::for_scope(Scope::Pulses)).await;
        let pulses = records[0].pulses.as_ref().unwrap();
        assert_eq!(pulses.len(), 1);
        assert_eq!(pulses[0].source_name.as_deref(), Some("Kotaku"));
        assert_eq!(pulses[0].link.as_deref(), Some("https://kotaku.com/x"));
        // feeds were only a stepping stone here
        assert!(records[0].feeds.is_none());
    }

    #[tokio::test]
    async fn test_feeds_scope() {
        let backend = FakeBackend::new().with_json(
            "feeds",
            json!([{"id": 1, "title": "New trailer", "category": 3, "games": [1, 2]}]),
        );
        let client = IgdbClient::with_backend(backend);
        let games = vec![game(json!({"id": 1})), game(json!({"id": 5}))];

        let records = hydrate(&client, games, &EnrichmentOptions::for_scope(Scope::Feeds)).await;
        assert_eq!(records[0].feeds.as_ref().unwrap()[0].heading(), "New trailer");
        assert_eq!(records[1].feeds.as_ref().map(Vec::len), Some(0));
        assert!(records[0].pulses.is_none());
    }

    #[tokio::test]
    async fn test_feed_shared_across_batches_is_listed_once() {
        let backend = FakeBackend::new().with_json(
            "feeds",
            json!([{"id": 1, "title": "Crossover", "games": [1, 11]}]),
        );
        let client = IgdbClient::with_backend(backend.clone());
        let games: Vec<Game> = (1..=11).map(|id| game(json!({"id": id}))).collect();

        let records = hydrate(&client, games, &EnrichmentOptions::for_scope(Scope::Feeds)).await;
        assert_eq!(backend.requests_to("feeds").len(), 2);

        let ids = |record: &GameRecord| -> Vec<u64> {
            record.feeds.as_ref().unwrap().iter().map(|f| f.id).collect()
        };
        assert_eq!(ids(&records[0]), vec![1]);
        assert_eq!(ids(&records[10]), vec![1]);
        assert!(ids(&records[5]).is_empty());
    }
}
