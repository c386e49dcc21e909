// src/message/format.rs
// =============================================================================
// Turns hydrated game records into the chat message the user sees.
//
// Layout of a results message:
// - a green "Results (n)" header when there is more than one game
// - one card per game: title + link, cover thumbnail, short/long fields,
//   and a text body (ratings, release dates, related counts, summary,
//   websites)
// - follow-up attachments for whatever scoped lookup was requested
//   (artworks, screenshots, videos, similar games, bundles, expansions,
//   DLCs, feeds, pulses)
//
// Text uses the chat host's markdown: *bold*, _italic_, `code`.
// =============================================================================

use super::notify::multiple_attachments;
use super::types::{
    Attachment, AttachmentField, Message, Preview, PreviewItem, PreviewItemKind, COLOR_ERROR,
    COLOR_GAME, COLOR_HEADER,
};
use crate::config::Settings;
use crate::igdb::{GameRecord, MultiplayerMode, Named, RelatedGame, TimeToBeat};
use crate::query::EnrichmentOptions;

const PREVIEW_LIMIT: usize = 10;
const DEFAULT_RESULTS_TEXT: &str = "Results";

pub fn game_results(
    settings: &Settings,
    records: &[GameRecord],
    options: &EnrichmentOptions,
) -> Message {
    let mut attachments = Vec::new();

    if records.len() > 1 {
        let results_text = options
            .results_text
            .as_deref()
            .unwrap_or(DEFAULT_RESULTS_TEXT);
        attachments.push(
            Attachment::new(COLOR_HEADER).title(format!("{} ({})", results_text, records.len())),
        );
    }

    for record in records {
        attachments.push(game_card(record, options));
        attachments.extend(follow_ups(record));
    }

    multiple_attachments(settings, attachments)
}

// Poster tiles for the search preview, at most ten.
pub fn game_preview(records: &[GameRecord]) -> Preview {
    let items = records
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|record| match &record.thumb_url {
            Some(url) => PreviewItem {
                id: record.game.id.to_string(),
                kind: PreviewItemKind::Image,
                value: url.clone(),
            },
            None => PreviewItem {
                id: record.game.id.to_string(),
                kind: PreviewItemKind::Text,
                value: record.game.name.clone(),
            },
        })
        .collect();

    Preview {
        title: "Results for".to_string(),
        items,
    }
}

// -----------------------------------------------------------------------------
// Game card
// -----------------------------------------------------------------------------

fn game_card(record: &GameRecord, options: &EnrichmentOptions) -> Attachment {
    let game = &record.game;
    let mut fields = Vec::new();

    fields.push(field("Id", game.id.to_string(), true));
    if let Some(slug) = &game.slug {
        fields.push(field("Slug", slug.clone(), true));
    }

    push_named(&mut fields, "Franchise(s)", &record.franchises, Layout::Inline, true);
    push_named(&mut fields, "Genres", &record.genres, Layout::List, true);
    push_named(&mut fields, "Game Modes", &record.game_modes, Layout::List, true);
    if let Some(modes) = non_empty(&record.multiplayer_modes) {
        fields.push(field("Multiplayer Modes", multiplayer_text(modes), true));
    }
    push_named(
        &mut fields,
        "Player Perspectives",
        &record.player_perspectives,
        Layout::List,
        true,
    );
    if let Some(text) = non_empty(&record.time_to_beat).and_then(time_to_beat_text) {
        fields.push(field("Time to Beat", text, false));
    }
    push_named(
        &mut fields,
        "Alternative Names",
        &record.alternative_names,
        Layout::List,
        false,
    );
    push_named(&mut fields, "Themes", &record.themes, Layout::Inline, false);
    push_named(&mut fields, "Game Engines", &record.game_engines, Layout::Inline, false);
    push_named(&mut fields, "Companies", &record.companies, Layout::List, false);
    push_named(&mut fields, "Platforms", &record.platforms, Layout::List, false);
    push_named(&mut fields, "Keywords", &record.keywords, Layout::Inline, false);

    if let Some(storyline) = &game.storyline {
        fields.push(field("Storyline", storyline.clone(), false));
    }

    let mut card = Attachment::new(COLOR_GAME)
        .collapsed(options.simple)
        .linked_title(game.name.clone(), game.url.clone())
        .thumbnail(record.thumb_url.clone())
        .fields(fields);

    let text = card_text(record, options);
    if !text.is_empty() {
        card = card.text(text);
    }
    card
}

fn card_text(record: &GameRecord, options: &EnrichmentOptions) -> String {
    let game = &record.game;
    let mut lines: Vec<String> = Vec::new();

    if let Some(rating) = rating_line(record) {
        lines.push(rating);
    }

    if let Some(dates) = non_empty(&record.release_dates) {
        lines.push("*Release Dates: *".to_string());
        for date in dates {
            let mut line = "--".to_string();
            if let Some(platform) = &date.platform_name {
                line.push_str(&format!("*{}: *", platform));
            }
            line.push_str(date.human.as_deref().unwrap_or("TBD"));
            lines.push(line);
        }
    }

    if !options.simple {
        lines.push(count_line(record, "Similar Games", game.similar_games.len(), "similar"));
        lines.push(count_line(record, "Bundles", game.bundles.len(), "bundles"));
        lines.push(count_line(record, "Expansions", game.expansions.len(), "expansions"));
        lines.push(count_line(record, "DLCs", game.dlcs.len(), "dlc"));
        if let Some(feeds) = &record.feeds {
            lines.push(count_line(record, "Feeds", feeds.len(), "feeds"));
        }
        if let Some(pulses) = &record.pulses {
            lines.push(count_line(record, "Pulses", pulses.len(), "pulses"));
        }
    }

    if let Some(summary) = &game.summary {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("*Summary: *{}", summary));
    }

    if let Some(websites) = non_empty(&record.websites) {
        lines.push("*Websites: *".to_string());
        for site in websites {
            if site.trusted {
                lines.push(format!("--{} _(Trusted)_", site.url));
            } else {
                lines.push(format!("--{}", site.url));
            }
        }
    }

    lines.join("\n")
}

fn rating_line(record: &GameRecord) -> Option<String> {
    let game = &record.game;
    let (rating, count) = game.rating.zip(game.rating_count)?;

    let mut line = format!("*Rating: *{:.1} _(of {})_", rating, count);
    if let Some((rating, count)) = game.aggregated_rating.zip(game.aggregated_rating_count) {
        line.push_str(&format!(" *Aggregate: *{:.1} _(of {})_", rating, count));
    }
    if let Some((rating, count)) = game.total_rating.zip(game.total_rating_count) {
        line.push_str(&format!(" *Total: *{:.1} _(of {})_", rating, count));
    }
    Some(line)
}

// "*Bundles: *2 _(to see results, run `/igdb-game 1942 bundles` ...)_"
fn count_line(record: &GameRecord, label: &str, count: usize, scope: &str) -> String {
    let mut line = format!("*{}: *{}", label, count);
    if count > 0 {
        line.push_str(&format!(
            " _(to see results, run {})_",
            follow_up_commands(record.game.id, record.game.slug.as_deref(), Some(scope))
        ));
    }
    line
}

fn follow_up_commands(id: u64, slug: Option<&str>, scope: Option<&str>) -> String {
    let suffix = scope.map(|s| format!(" {}", s)).unwrap_or_default();
    match slug {
        Some(slug) => format!("`/igdb-game {}{}` or `/igdb-game {}{}`", id, suffix, slug, suffix),
        None => format!("`/igdb-game {}{}`", id, suffix),
    }
}

// -----------------------------------------------------------------------------
// Fields
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layout {
    Inline,
    List,
}

fn field(title: &str, value: String, short: bool) -> AttachmentField {
    AttachmentField {
        short,
        title: title.to_string(),
        value,
    }
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|items| !items.is_empty())
}

fn push_named(
    fields: &mut Vec<AttachmentField>,
    title: &str,
    list: &Option<Vec<Named>>,
    layout: Layout,
    short: bool,
) {
    if let Some(items) = non_empty(list) {
        fields.push(field(title, named_text(items, layout), short));
    }
}

fn named_text(items: &[Named], layout: Layout) -> String {
    let separator = match layout {
        Layout::Inline => ", ",
        Layout::List => "\n",
    };
    items
        .iter()
        .map(named_entry)
        .collect::<Vec<_>>()
        .join(separator)
}

// "CD Projekt RED _(https://...)_". Underscores in a URL would end the
// italics early, so those URLs go in plain parentheses.
fn named_entry(item: &Named) -> String {
    let mut text = item.name.clone();
    if let Some(comment) = &item.comment {
        text.push_str(&format!(" _({})_", comment));
    }
    if let Some(url) = &item.url {
        if url.contains('_') {
            text.push_str(&format!(" ({})", url));
        } else {
            text.push_str(&format!(" _({})_", url));
        }
    }
    text
}

// One "*[Platform]*" block per mode; modes without a platform come last
// under "Default".
fn multiplayer_text(modes: &[MultiplayerMode]) -> String {
    let mut ordered: Vec<&MultiplayerMode> = modes.iter().collect();
    ordered.sort_by_key(|mode| mode.platform_name.is_none());

    ordered
        .into_iter()
        .map(|mode| {
            let platform = mode.platform_name.as_deref().unwrap_or("Default");
            format!("*[{}]*\n{}", platform, multiplayer_features(mode).join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn multiplayer_features(mode: &MultiplayerMode) -> Vec<String> {
    let mut features = Vec::new();
    if mode.campaigncoop {
        features.push("Campaign Co-op".to_string());
    }
    if mode.dropin {
        features.push("Drop-in".to_string());
    }
    if mode.lancoop {
        features.push("LAN Co-op".to_string());
    } else if mode.offlinecoop {
        features.push(with_max("Offline Co-op", mode.offlinecoopmax));
    }
    if mode.onlinecoop {
        features.push(with_max("Online Co-op", mode.onlinecoopmax));
    }
    if let Some(max) = mode.onlinemax {
        features.push(format!("Online Max {}", max));
    }
    if let Some(max) = mode.offlinemax {
        features.push(format!("Offline Max {}", max));
    }
    if mode.splitscreen {
        features.push("Split-Screen".to_string());
    }
    features
}

fn with_max(label: &str, max: Option<u32>) -> String {
    match max {
        Some(max) => format!("{} (max {})", label, max),
        None => label.to_string(),
    }
}

fn time_to_beat_text(entries: &[TimeToBeat]) -> Option<String> {
    let mut parts = Vec::new();
    for entry in entries {
        if let Some(hours) = entry.normally_hours() {
            parts.push(format!("*Normally *{} hours", hours));
        }
        if let Some(hours) = entry.hastly_hours() {
            parts.push(format!("*Hastily *{} hours", hours));
        }
        if let Some(hours) = entry.completely_hours() {
            parts.push(format!("*Completely *{} hours", hours));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

// -----------------------------------------------------------------------------
// Follow-up attachments
// -----------------------------------------------------------------------------

fn follow_ups(record: &GameRecord) -> Vec<Attachment> {
    let name = &record.game.name;
    let mut out = Vec::new();

    for artwork in record.artworks.iter().flatten() {
        if let Some(url) = artwork.absolute_url() {
            out.push(
                Attachment::new(COLOR_GAME)
                    .image(url)
                    .text(format!("Artwork for {}", name)),
            );
        }
    }

    for screenshot in record.screenshots.iter().flatten() {
        if let Some(url) = screenshot.absolute_url() {
            out.push(
                Attachment::new(COLOR_GAME)
                    .image(url)
                    .text(format!("Screenshot for {}", name)),
            );
        }
    }

    for video in record.videos.iter().flatten() {
        let url = video.watch_url();
        out.push(
            Attachment::new(COLOR_GAME)
                .linked_title(video.name.clone().unwrap_or_else(|| "Video".to_string()), Some(url.clone()))
                .text(format!("Video for {}\nCan't embed this video!\n{}", name, url)),
        );
    }

    related(&mut out, record, &record.similar, "Similar Games", "Similar to");
    related(&mut out, record, &record.bundles, "Bundles", "Bundle includes");
    related(&mut out, record, &record.expansions, "Expansions", "Expansion for");
    related(&mut out, record, &record.dlcs, "DLCs", "DLC for");

    if let Some(feeds) = &record.feeds {
        if feeds.is_empty() {
            out.push(nothing_found("Feeds", name));
        } else {
            out.push(Attachment::new(COLOR_HEADER).title(format!("Feed Results ({})", feeds.len())));
            for feed in feeds {
                out.push(
                    Attachment::new(COLOR_GAME)
                        .linked_title(feed.heading(), feed.url.clone())
                        .text(format!(
                            "*Category: *{}\n*Updated: *{}\n*Content: *{}",
                            feed.category_label(),
                            feed.updated_display(),
                            feed.content.as_deref().unwrap_or("")
                        )),
                );
            }
        }
    }

    if let Some(pulses) = &record.pulses {
        if pulses.is_empty() {
            out.push(nothing_found("Pulses", name));
        } else {
            out.push(Attachment::new(COLOR_HEADER).title(format!("Pulse Results ({})", pulses.len())));
            for pulse in pulses {
                out.push(
                    Attachment::new(COLOR_GAME)
                        .linked_title(pulse.title.clone().unwrap_or_default(), pulse.link.clone())
                        .thumbnail(pulse.image.clone())
                        .text(format!(
                            "*Source: *{}\n*Updated: *{}\n*Author: *{}\n\n*Summary: *{}",
                            pulse.source_name.as_deref().unwrap_or(""),
                            pulse.updated_display(),
                            pulse.author.as_deref().unwrap_or(""),
                            pulse.summary.as_deref().unwrap_or("")
                        )),
                );
            }
        }
    }

    out
}

fn related(
    out: &mut Vec<Attachment>,
    record: &GameRecord,
    list: &Option<Vec<RelatedGame>>,
    label: &str,
    relation: &str,
) {
    let Some(games) = list else {
        return;
    };
    if games.is_empty() {
        out.push(nothing_found(label, &record.game.name));
        return;
    }
    for game in games {
        let slug = game.slug.as_deref().unwrap_or("");
        out.push(
            Attachment::new(COLOR_GAME)
                .linked_title(game.name.clone(), game.url.clone())
                .thumbnail(game.thumb_url.clone())
                .text(format!(
                    "{} *{}*\n*Id: *{}\n*Slug: *{}\n\nTo view details, run {}",
                    relation,
                    record.game.name,
                    game.id,
                    slug,
                    follow_up_commands(game.id, game.slug.as_deref(), None)
                )),
        );
    }
}

fn nothing_found(label: &str, game_name: &str) -> Attachment {
    Attachment::new(COLOR_ERROR).title(format!("No {} found for game {}!", label, game_name))
}
