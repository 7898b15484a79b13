use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use ens_search_core::HISTORY_FILE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub history: History,
    pub search: Search,
    /// Translation overrides keyed like `search.emptyText`
    pub strings: BTreeMap<String, String>,
    pub tui: Option<Tui>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct History {
    /// History file; defaults to `<state dir>/search-history-v2.json`
    pub path: Option<String>,
    /// Oldest entries beyond this are dropped after each selection
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Search {
    /// Quiet period before suggestions stop counting as provisional (default: 250)
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tui {
    pub highlight_fg: Option<String>,
    pub highlight_bg: Option<String>,
    pub border_fg: Option<String>,
    pub error_fg: Option<String>,
    pub help_fg: Option<String>,
    /// Whether to use the alternate screen
    pub alt_screen: Option<bool>,
}

impl Settings {
    pub fn debounce(&self) -> std::time::Duration {
        self.search
            .debounce_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or(ens_search_core::DEFAULT_DEBOUNCE)
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(bd) = directories::BaseDirs::new() {
        bd.config_dir().join("ens-search")
    } else {
        PathBuf::from("./.config/ens-search")
    }
}

pub fn state_dir() -> PathBuf {
    // Prefer XDG state dir when available; fall back to config dir
    if let Some(bd) = directories::BaseDirs::new() {
        if let Some(sd) = bd.state_dir() {
            return sd.join("ens-search");
        }
    }
    config_dir()
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

pub fn history_path(settings: &Settings) -> PathBuf {
    if let Some(p) = &settings.history.path {
        if !p.trim().is_empty() {
            return PathBuf::from(shellexpand::tilde(p).to_string());
        }
    }
    state_dir().join(HISTORY_FILE_NAME)
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}
