//! DocSearch core — the search-as-you-type widget without a UI toolkit attached.
//!
//! Front ends (the Dioxus desktop app, the `ds` CLI) feed keystrokes in and render
//! the [`SuggestionPanel`](types::SuggestionPanel) that comes out. Everything between
//! those two points lives here.
//!
//! # Modules
//!
//! - [`types`] — Field values, wire request, suggestion panel, widget config
//! - [`query`] — Trimming and the minimum-length gate that decides whether to search
//! - [`render`] — Turning an arbitrary JSON response into suggestions
//! - [`debounce`] — Trailing-edge coalescing scheduler on tokio timers
//! - [`sequence`] — Request sequencing so stale responses can be dropped
//! - [`client`] — `SearchBackend` trait and the reqwest-backed HTTP client
//! - [`widget`] — `SearchWidget`, tying the above together
//! - [`error`] — Error type shared by the client and config loader

pub mod client;
pub mod debounce;
pub mod error;
pub mod query;
pub mod render;
pub mod sequence;
pub mod types;
pub mod widget;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use error::{Error, Result};
use types::WidgetConfig;

// ---------------------------------------------------------------------------
// Cross-platform path helpers
// ---------------------------------------------------------------------------

/// Platform-aware home directory: `HOME` on Unix, `USERPROFILE` on Windows.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")).ok().map(PathBuf::from)
}

/// Platform-aware config directory: `~/.docsearch` on Unix, `%APPDATA%/docsearch` on Windows.
pub fn config_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var("APPDATA").ok().map(|a| PathBuf::from(a).join("docsearch"))
    } else {
        home_dir().map(|h| h.join(".docsearch"))
    }
}

// ---------------------------------------------------------------------------
// .docsearch.toml config loading
// ---------------------------------------------------------------------------

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".docsearch.toml";

/// Known keys in `.docsearch.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["endpoint", "debounce_ms", "min_query_chars", "discard_stale_responses", "request_timeout_ms"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Find the config file to use: `./.docsearch.toml`, then `<config_dir>/config.toml`.
pub fn discover_config_path(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    config_dir().map(|d| d.join("config.toml")).filter(|p| p.exists())
}

/// Load the widget configuration.
///
/// An explicit `path` must exist and parse. Without one, the discovered file (if any)
/// is used, and a missing file yields [`WidgetConfig::default`]. Unknown keys trigger
/// a warning with a typo suggestion rather than an error.
pub fn load_config(path: Option<&Path>) -> Result<WidgetConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().unwrap_or_default();
            match discover_config_path(&cwd) {
                Some(p) => p,
                None => return Ok(WidgetConfig::default()),
            }
        }
    };

    debug!(path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("could not read {}: {e}", path.display())))?;
    parse_config(&content)
}

/// Parse TOML config text over the defaults.
pub fn parse_config(content: &str) -> Result<WidgetConfig> {
    let table: toml::Table =
        content.parse().map_err(|e: toml::de::Error| Error::Config(e.message().to_string()))?;

    // Validate keys — warn on unknown
    for key in table.keys() {
        if !KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            let suggestion = KNOWN_CONFIG_KEYS
                .iter()
                .min_by_key(|k| edit_distance(key, k))
                .copied()
                .unwrap_or_default();
            if edit_distance(key, suggestion) <= 3 {
                warn!(
                    key = key.as_str(),
                    suggestion = suggestion,
                    "Unknown config key — did you mean '{suggestion}'?"
                );
            } else {
                warn!(
                    key = key.as_str(),
                    "Unknown config key (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }

    let mut config = WidgetConfig::default();

    if let Some(v) = table.get("endpoint") {
        let endpoint = v
            .as_str()
            .ok_or_else(|| Error::Config("endpoint must be a string".to_string()))?;
        config.endpoint = endpoint.to_string();
    }
    if let Some(v) = table.get("debounce_ms") {
        config.debounce_ms = non_negative(v, "debounce_ms")?;
    }
    if let Some(v) = table.get("min_query_chars") {
        config.min_query_chars = usize::try_from(non_negative(v, "min_query_chars")?)
            .map_err(|_| Error::Config("min_query_chars is too large".to_string()))?;
    }
    if let Some(v) = table.get("discard_stale_responses") {
        config.discard_stale_responses = v
            .as_bool()
            .ok_or_else(|| Error::Config("discard_stale_responses must be a boolean".to_string()))?;
    }
    if let Some(v) = table.get("request_timeout_ms") {
        config.request_timeout_ms = Some(non_negative(v, "request_timeout_ms")?);
    }

    config.validate()?;
    Ok(config)
}

fn non_negative(value: &toml::Value, key: &str) -> Result<u64> {
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| Error::Config(format!("{key} must be a non-negative integer")))
}
