//! Settings infrastructure for embedding editors.
//!
//! Editors that host the engine can ship a `highlight.toml` with their
//! preferred defaults (style classes, live updates, matching toggles).
//! A missing or malformed file degrades to built-in defaults; settings
//! must never keep an editor from starting.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::search::SearchConfig;

/// Root settings structure loaded from highlight.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Search highlighting defaults.
    pub search: Option<SearchDefaults>,
}

/// Defaults for new highlighting sessions. Every field is optional; unset
/// fields fall back to the engine's built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SearchDefaults {
    /// Style class painted on ordinary matches.
    pub highlight_class: Option<String>,

    /// Style class for matches inside the selected container.
    pub individual_highlight_class: Option<String>,

    /// Whether edits trigger incremental rescans.
    pub live_updates: Option<bool>,

    /// Whole-word matching.
    pub match_whole_words_only: Option<bool>,

    /// Case-sensitive matching.
    pub case_sensitive: Option<bool>,
}

/// Load settings from the given path. Returns defaults if the file is
/// missing or cannot be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(%err, path = %path.display(), "failed to parse highlight settings");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

impl Settings {
    /// Build a session configuration from these defaults, with no active
    /// search term.
    pub fn into_config(self) -> SearchConfig {
        let base = SearchConfig::default();
        let Some(search) = self.search else {
            return base;
        };
        SearchConfig {
            search_term: None,
            highlight_class: search.highlight_class.unwrap_or(base.highlight_class),
            individual_highlight_class: search
                .individual_highlight_class
                .or(base.individual_highlight_class),
            live_updates: search.live_updates.unwrap_or(base.live_updates),
            match_whole_words_only: search
                .match_whole_words_only
                .unwrap_or(base.match_whole_words_only),
            case_sensitive: search.case_sensitive.unwrap_or(base.case_sensitive),
            selected_highlight: None,
        }
    }
}
