// src/config.rs
// =============================================================================
// Settings the chat host would normally store for us.
//
// A chat host exposes three settings (display name, avatar icon and
// the IGDB API key). We read them from the environment (optionally through a
// .env file) and let CLI flags override them. Client tuning (base URL and
// request timeout) lives here too so tests can point the client anywhere.
// =============================================================================

use std::env;
use std::time::Duration;

pub const DEFAULT_NAME: &str = "IGDB";
pub const DEFAULT_ICON: &str =
    "https://github.com/tgardner851/Rocket.Chat.App-IGDB/raw/master/icon.png";
pub const DEFAULT_BASE_URL: &str = "https://api-v3.igdb.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Name the bot posts under (the message alias)
    pub name: String,
    /// Avatar URL shown next to every message
    pub icon: String,
    /// IGDB `user-key`; `None` when unset or blank
    pub api_key: Option<String>,
    /// Root of the IGDB API, endpoints are joined onto it
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            icon: DEFAULT_ICON.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    // Builds settings from IGDB_* environment variables.
    //
    // Call dotenv::dotenv() before this if a .env file should be honoured.
    // Unparseable timeouts fall back to the default instead of failing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Same as from_env but with an injectable lookup, so tests don't have to
    // mutate the real process environment.
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = lookup("IGDB_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            name: non_blank(lookup("IGDB_NAME")).unwrap_or(defaults.name),
            icon: non_blank(lookup("IGDB_ICON")).unwrap_or(defaults.icon),
            api_key: non_blank(lookup("IGDB_KEY")),
            base_url: non_blank(lookup("IGDB_BASE_URL")).unwrap_or(defaults.base_url),
            timeout,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    // A blank key counts as "not set", same as the host's empty default.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_blank(Some(key.into()));
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let settings = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(settings.name, "IGDB");
        assert_eq!(settings.icon, DEFAULT_ICON);
        assert!(settings.api_key().is_none());
        assert_eq!(settings.base_url, "https://api-v3.igdb.com/");
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_values_are_used() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("IGDB_NAME", "GameBot"),
            ("IGDB_KEY", " abc123 "),
            ("IGDB_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(settings.name, "GameBot");
        assert_eq!(settings.api_key(), Some("abc123"));
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_key_is_not_set() {
        let settings = Settings::from_lookup(lookup_from(&[("IGDB_KEY", "   ")]));
        assert!(settings.api_key().is_none());

        let settings = Settings::default().with_api_key("");
        assert!(settings.api_key().is_none());
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let settings = Settings::from_lookup(lookup_from(&[("IGDB_TIMEOUT_SECS", "soon")]));
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_overrides() {
        let settings = Settings::default()
            .with_name("Bot")
            .with_icon("https://example.com/i.png")
            .with_api_key("k")
            .with_base_url("http://localhost:9000/")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(settings.name, "Bot");
        assert_eq!(settings.icon, "https://example.com/i.png");
        assert_eq!(settings.api_key(), Some("k"));
        assert_eq!(settings.base_url, "http://localhost:9000/");
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }
}
