//! Global application state using Dioxus signals.

use docsearch_core::client::HttpSearchClient;
use docsearch_core::error::Result;
use docsearch_core::types::{Filter, SuggestionPanel, WidgetConfig};
use docsearch_core::widget::SearchWidget;
use docsearch_core::load_config;
use dioxus::prelude::*;

pub type DesktopWidget = SearchWidget<HttpSearchClient>;

/// Config plus the widget driving the search box, created once at startup.
#[derive(Clone)]
pub struct DesktopState {
    pub config: WidgetConfig,
    pub widget: DesktopWidget,
}

impl DesktopState {
    /// Load `.docsearch.toml` (or defaults) and build the search widget.
    pub fn load() -> Result<Self> {
        let config = load_config(None)?;
        let client = HttpSearchClient::from_config(&config)?;
        let widget = SearchWidget::new(client, config.clone());
        Ok(Self { config, widget })
    }
}

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Config and widget, set once on first render
pub static CORE: GlobalSignal<Option<DesktopState>> = Signal::global(|| None);

/// `#search-box` value
pub static QUERY: GlobalSignal<String> = Signal::global(String::new);

/// `#topic` value
pub static TOPIC: GlobalSignal<String> = Signal::global(String::new);

/// `#author` value
pub static AUTHOR: GlobalSignal<String> = Signal::global(String::new);

/// `#location` value
pub static LOCATION: GlobalSignal<String> = Signal::global(String::new);

/// `#suggestions` content and visibility, mirrored from the widget
pub static PANEL: GlobalSignal<SuggestionPanel> = Signal::global(SuggestionPanel::default);

/// Handle to the shared widget, if startup has finished.
pub fn widget() -> Option<DesktopWidget> {
    CORE.read().as_ref().map(|s| s.widget.clone())
}

/// Signal backing a filter input.
pub fn filter_signal(filter: Filter) -> &'static GlobalSignal<String> {
    match filter {
        Filter::Topic => &TOPIC,
        Filter::Author => &AUTHOR,
        Filter::Location => &LOCATION,
    }
}
