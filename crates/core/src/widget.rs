//! `SearchWidget` — keystrokes in, suggestion panel out.
//!
//! The widget owns the four field values and the panel. Keystrokes on the primary
//! field go through a [`Debouncer`]; when it fires, [`SearchWidget::perform_search`]
//! either dismisses the panel or posts a request and renders the response. Front ends
//! observe the panel through [`SearchWidget::subscribe`].

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::client::SearchBackend;
use crate::debounce::Debouncer;
use crate::query::{prepare_search, SearchIntent};
use crate::render::interpret_response;
use crate::sequence::SearchSequence;
use crate::types::{Filter, SearchFields, SuggestionPanel, WidgetConfig};

/// What a single `perform_search` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query below the minimum length; panel cleared and hidden, nothing sent.
    Dismissed,
    /// Response rendered into the panel.
    Rendered { seq: u64, entries: usize },
    /// Response arrived after a newer one (or after a dismissal) and was dropped.
    Stale { seq: u64 },
    /// Transport or decode failure; logged, panel untouched.
    Failed { seq: u64 },
}

struct WidgetState {
    fields: SearchFields,
    panel: SuggestionPanel,
    sequence: SearchSequence,
}

struct Inner<B> {
    backend: B,
    config: WidgetConfig,
    debouncer: Debouncer,
    state: Mutex<WidgetState>,
    panel_tx: watch::Sender<SuggestionPanel>,
}

/// Cheap to clone; clones share the same fields, panel and timer.
pub struct SearchWidget<B: SearchBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: SearchBackend> Clone for SearchWidget<B> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B: SearchBackend> SearchWidget<B> {
    pub fn new(backend: B, config: WidgetConfig) -> Self {
        let (panel_tx, _) = watch::channel(SuggestionPanel::default());
        let inner = Inner {
            backend,
            debouncer: Debouncer::new(config.debounce()),
            config,
            state: Mutex::new(WidgetState {
                fields: SearchFields::default(),
                panel: SuggestionPanel::default(),
                sequence: SearchSequence::new(),
            }),
            panel_tx,
        };
        Self { inner: Arc::new(inner) }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    /// Keystroke on the primary field: record the new value and re-arm the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input_change(&self, query: impl Into<String>) {
        self.lock_state().fields.query = query.into();

        let widget = self.clone();
        self.inner.debouncer.schedule(async move {
            widget.perform_search().await;
        });
    }

    /// Edit one of the filter fields. Read on the next search; never triggers one.
    pub fn set_filter(&self, filter: Filter, value: impl Into<String>) {
        self.lock_state().fields.set_filter(filter, value);
    }

    /// Run one search cycle against the current field values, bypassing the debouncer.
    pub async fn perform_search(&self) -> SearchOutcome {
        let (request, seq) = {
            let mut state = self.lock_state();
            match prepare_search(&state.fields, self.inner.config.min_query_chars) {
                SearchIntent::Dismiss => {
                    debug!("Query below minimum length, hiding suggestions");
                    if self.inner.config.discard_stale_responses {
                        state.sequence.invalidate_in_flight();
                    }
                    state.panel.clear_and_hide();
                    self.publish(&state.panel);
                    return SearchOutcome::Dismissed;
                }
                SearchIntent::Search(request) => {
                    let seq = state.sequence.next();
                    (request, seq)
                }
            }
        };

        debug!(seq = seq, query = request.query.as_str(), "Issuing search");
        match self.inner.backend.search(&request).await {
            Ok(data) => self.apply_response(seq, &data),
            Err(e) => {
                error!(seq = seq, error = %e, "Error fetching data");
                SearchOutcome::Failed { seq }
            }
        }
    }

    /// Replace the panel with the suggestions in `data` and show it.
    pub fn render_results(&self, data: &Value) {
        let mut state = self.lock_state();
        self.render_into(&mut state, data);
    }

    /// Click on the suggestion at `index`: commit its title to the query field and
    /// hide the panel. Returns the title, or `None` if `index` is not a suggestion.
    ///
    /// Disarms any pending debounce timer, so the selection itself never searches.
    pub fn select_suggestion(&self, index: usize) -> Option<String> {
        let mut state = self.lock_state();
        let title = state.panel.suggestion_at(index)?.to_string();

        self.inner.debouncer.cancel();
        state.fields.query = title.clone();
        state.panel.hide();
        if self.inner.config.discard_stale_responses {
            state.sequence.invalidate_in_flight();
        }
        self.publish(&state.panel);

        debug!(title = title.as_str(), "Suggestion selected");
        Some(title)
    }

    pub fn fields(&self) -> SearchFields {
        self.lock_state().fields.clone()
    }

    pub fn panel(&self) -> SuggestionPanel {
        self.lock_state().panel.clone()
    }

    /// Receiver that wakes whenever the panel's content or visibility changes.
    pub fn subscribe(&self) -> watch::Receiver<SuggestionPanel> {
        self.inner.panel_tx.subscribe()
    }

    /// Whether a debounced search is armed but has not fired.
    pub fn search_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Resolve once no debounced search is armed or in flight.
    ///
    /// Covers searches started by [`on_input_change`](Self::on_input_change), including
    /// ones that end without touching the panel (dismissing a hidden panel, a fetch
    /// error, an unchanged result). Direct `perform_search` calls are not tracked.
    pub async fn settled(&self) {
        self.inner.debouncer.idle().await;
    }

    fn apply_response(&self, seq: u64, data: &Value) -> SearchOutcome {
        let mut state = self.lock_state();
        if !state.sequence.try_apply(seq) && self.inner.config.discard_stale_responses {
            debug!(seq = seq, latest = state.sequence.last_issued(), "Dropping stale response");
            return SearchOutcome::Stale { seq };
        }

        self.render_into(&mut state, data);
        SearchOutcome::Rendered { seq, entries: state.panel.entries.len() }
    }

    fn render_into(&self, state: &mut WidgetState, data: &Value) {
        debug!(data = %data, "Rendering search response");
        state.panel.show(interpret_response(data));
        self.publish(&state.panel);
    }

    fn publish(&self, panel: &SuggestionPanel) {
        self.inner.panel_tx.send_if_modified(|current| {
            if current == panel {
                false
            } else {
                *current = panel.clone();
                true
            }
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, WidgetState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
