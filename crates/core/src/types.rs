//! Core types shared across DocSearch: the four input field values, the wire request,
//! interpreted suggestions, the suggestion panel, and widget configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Endpoint the widget posts to when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/search/";

/// Idle window before a keystroke burst turns into a search.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Minimum trimmed query length (in chars) that triggers a search.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;

/// Text of the single placeholder entry shown when a response has no titles.
pub const NO_DATA_MESSAGE: &str = "No data found.";

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// Raw values of the four input elements, exactly as typed (untrimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFields {
    pub query: String,
    pub topic: String,
    pub author: String,
    pub location: String,
}

impl SearchFields {
    /// Fields with only the primary query set.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }

    pub fn set_filter(&mut self, filter: Filter, value: impl Into<String>) {
        let slot = match filter {
            Filter::Topic => &mut self.topic,
            Filter::Author => &mut self.author,
            Filter::Location => &mut self.location,
        };
        *slot = value.into();
    }
}

/// The three optional filter inputs. Editing them never triggers a search by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Topic,
    Author,
    Location,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::Topic, Filter::Author, Filter::Location];

    /// DOM id of the input element bound to this filter.
    pub fn element_id(self) -> &'static str {
        match self {
            Filter::Topic => "topic",
            Filter::Author => "author",
            Filter::Location => "location",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::Topic => "Topic",
            Filter::Author => "Author",
            Filter::Location => "Location",
        }
    }
}

/// DOM id of the primary query input.
pub const SEARCH_BOX_ID: &str = "search-box";

/// DOM id of the results container.
pub const SUGGESTIONS_ID: &str = "suggestions";

// ---------------------------------------------------------------------------
// Wire request
// ---------------------------------------------------------------------------

/// JSON body posted to the search endpoint.
///
/// All four values are trimmed. Unset filters are sent as empty strings, which the
/// backend treats as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "specific_location", default)]
    pub location: String,
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// What a search response means for the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// Titles to offer, in response order. Never empty.
    Titles(Vec<String>),
    /// Anything that isn't a non-empty list of titled items.
    NoData,
}

/// One row in the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEntry {
    /// Clickable title.
    Suggestion(String),
    /// Non-interactive "no results" row.
    Placeholder(&'static str),
}

impl PanelEntry {
    pub fn text(&self) -> &str {
        match self {
            PanelEntry::Suggestion(title) => title,
            PanelEntry::Placeholder(msg) => msg,
        }
    }
}

/// State of the results container: its entries and whether it is displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    pub visible: bool,
    pub entries: Vec<PanelEntry>,
}

impl SuggestionPanel {
    /// Empty the panel and hide it.
    pub fn clear_and_hide(&mut self) {
        self.entries.clear();
        self.visible = false;
    }

    /// Replace the panel's content with `suggestions` and show it.
    ///
    /// `NoData` still shows the panel, with a single placeholder row.
    pub fn show(&mut self, suggestions: Suggestions) {
        self.entries = match suggestions {
            Suggestions::Titles(titles) => titles.into_iter().map(PanelEntry::Suggestion).collect(),
            Suggestions::NoData => vec![PanelEntry::Placeholder(NO_DATA_MESSAGE)],
        };
        self.visible = true;
    }

    /// Hide without clearing, as a click on a suggestion does.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Title of the clickable entry at `index`, if there is one.
    pub fn suggestion_at(&self, index: usize) -> Option<&str> {
        match self.entries.get(index) {
            Some(PanelEntry::Suggestion(title)) => Some(title),
            _ => None,
        }
    }

    /// Titles of all clickable entries, in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                PanelEntry::Suggestion(t) => Some(t.as_str()),
                PanelEntry::Placeholder(_) => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Widget configuration, loaded from `.docsearch.toml` over these defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetConfig {
    /// URL the search request is posted to.
    pub endpoint: String,
    pub debounce_ms: u64,
    /// Minimum trimmed query length, counted in chars.
    pub min_query_chars: usize,
    /// Drop responses that arrive after a newer one has been rendered.
    pub discard_stale_responses: bool,
    /// No timeout when unset; the transport's own defaults apply.
    pub request_timeout_ms: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            discard_stale_responses: true,
            request_timeout_ms: None,
        }
    }
}

impl WidgetConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Reject configurations the widget cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.min_query_chars == 0 {
            return Err(Error::Config("min_query_chars must be at least 1".to_string()));
        }
        Ok(())
    }
}
