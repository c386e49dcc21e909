// src/query/builder.rs
// =============================================================================
// IGDB query strings.
//
// IGDB takes its query language as the POST body, e.g.
//   search "zelda";fields name,slug;where version_parent = null;limit 50;
// User text ends up inside double quotes, so it is escaped first.
// =============================================================================

use super::parse::GameLookup;

const SEARCH_LIMIT: usize = 50;
const PREVIEW_LIMIT: usize = 10;

// Escapes text for use inside a double-quoted IGDB string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn games_search_query(text: &str) -> String {
    format!(
        "search \"{}\";fields name,slug,summary,url;where version_parent = null;limit {};",
        escape(text),
        SEARCH_LIMIT
    )
}

// Lighter query for the poster preview: only what a preview tile needs.
pub fn game_search_preview_query(text: &str) -> String {
    format!(
        "search \"{}\";fields name,slug,url,cover;where version_parent = null;limit {};",
        escape(text),
        PREVIEW_LIMIT
    )
}

pub fn game_details_query(lookup: &GameLookup) -> String {
    match lookup {
        GameLookup::Id(id) => format!("fields *;where id={};", id),
        GameLookup::Slug(slug) => format!("fields *;where slug=\"{}\";", escape(slug)),
    }
}

// `fields <fields>;where <filter_field>=(1,2,3);`
//
// Callers are expected to pass at most one batch worth of IDs.
pub fn ids_query(fields: &str, filter_field: &str, ids: &[u64]) -> String {
    let list = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("fields {};where {}=({});", fields, filter_field, list)
}
