//! End-to-end widget behavior against a scripted in-memory backend.
//!
//! All tests run on tokio's paused clock, so debounce windows and slow responses
//! are simulated deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use docsearch_core::client::SearchBackend;
use docsearch_core::error::{Error, Result};
use docsearch_core::types::{Filter, PanelEntry, SearchRequest, SuggestionPanel, WidgetConfig};
use docsearch_core::widget::{SearchOutcome, SearchWidget};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Reply {
    Json(Value),
    NotJson,
}

#[derive(Clone, Default)]
struct FakeBackend {
    requests: Arc<Mutex<Vec<SearchRequest>>>,
    script: Arc<Mutex<HashMap<String, (Duration, Reply)>>>,
}

impl FakeBackend {
    fn reply(&self, query: &str, body: Value) -> &Self {
        self.reply_after(query, Duration::ZERO, body)
    }

    fn reply_after(&self, query: &str, delay: Duration, body: Value) -> &Self {
        self.script.lock().unwrap().insert(query.to_string(), (delay, Reply::Json(body)));
        self
    }

    fn fail(&self, query: &str) -> &Self {
        self.script.lock().unwrap().insert(query.to_string(), (Duration::ZERO, Reply::NotJson));
        self
    }

    fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SearchBackend for FakeBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let (delay, reply) = self
            .script
            .lock()
            .unwrap()
            .get(&request.query)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Json(json!([]))));

        tokio::time::sleep(delay).await;
        match reply {
            Reply::Json(body) => Ok(body),
            Reply::NotJson => Err(Error::from(serde_json::from_str::<Value>("<html>").unwrap_err())),
        }
    }
}

fn widget_with(backend: &FakeBackend) -> SearchWidget<FakeBackend> {
    SearchWidget::new(backend.clone(), WidgetConfig::default())
}

/// Long enough for any pending debounce to fire and an instant reply to land.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(400)).await;
}

fn titles(panel: &SuggestionPanel) -> Vec<&str> {
    panel.entries.iter().map(PanelEntry::text).collect()
}

// ---------------------------------------------------------------------------
// Minimum length gate
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_short_query_sends_nothing_and_hides_panel() {
    let backend = FakeBackend::default();
    backend.reply("oil", json!([{ "title": "Oil prices" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("oil");
    settle().await;
    assert!(widget.panel().visible);

    widget.on_input_change("oi");
    settle().await;

    assert_eq!(backend.requests().len(), 1);
    assert_eq!(widget.panel(), SuggestionPanel::default());
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_query_treated_as_short() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.on_input_change("   ab   ");
    settle().await;
    assert!(backend.requests().is_empty());
    assert_eq!(widget.perform_search().await, SearchOutcome::Dismissed);
}

#[tokio::test(start_paused = true)]
async fn test_request_carries_four_trimmed_fields() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.set_filter(Filter::Topic, "  crude ");
    widget.set_filter(Filter::Location, " kuwait");
    widget.on_input_change(" oil ");
    settle().await;

    assert_eq!(
        backend.requests(),
        vec![SearchRequest {
            query: "oil".to_string(),
            topic: "crude".to_string(),
            author: String::new(),
            location: "kuwait".to_string(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_filter_edits_do_not_search() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.set_filter(Filter::Author, "reuter");
    settle().await;
    assert!(backend.requests().is_empty());
    assert!(!widget.search_pending());
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_sends_one_request_with_final_value() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    for prefix in ["c", "co", "cof", "coff", "coffe", "coffee"] {
        widget.on_input_change(prefix);
        tokio::time::sleep(Duration::from_millis(120)).await;
    }
    assert!(backend.requests().is_empty());

    settle().await;
    let sent: Vec<String> = backend.requests().into_iter().map(|r| r.query).collect();
    assert_eq!(sent, vec!["coffee"]);
}

#[tokio::test(start_paused = true)]
async fn test_no_request_before_idle_window_elapses() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.on_input_change("grain");
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(backend.requests().is_empty());
    assert!(widget.search_pending());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retyped_identical_query_searches_again() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.on_input_change("sugar");
    settle().await;
    widget.on_input_change("sugar");
    settle().await;

    assert_eq!(backend.requests().len(), 2);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_titles_rendered_in_order_and_visible() {
    let backend = FakeBackend::default();
    backend.reply("abc", json!([{ "title": "A" }, { "title": "B" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("abc");
    settle().await;

    let panel = widget.panel();
    assert!(panel.visible);
    assert_eq!(
        panel.entries,
        vec![PanelEntry::Suggestion("A".to_string()), PanelEntry::Suggestion("B".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_shapes_render_placeholder() {
    for body in [json!([]), json!({}), Value::Null] {
        let backend = FakeBackend::default();
        backend.reply("abc", body);
        let widget = widget_with(&backend);

        widget.on_input_change("abc");
        settle().await;

        let panel = widget.panel();
        assert!(panel.visible);
        assert_eq!(titles(&panel), vec!["No data found."]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_fetch_error_leaves_panel_unchanged() {
    let backend = FakeBackend::default();
    backend.reply("wheat", json!([{ "title": "Wheat exports" }])).fail("wheat futures");
    let widget = widget_with(&backend);

    widget.on_input_change("wheat");
    settle().await;
    let before = widget.panel();

    widget.on_input_change("wheat futures");
    tokio::time::sleep(Duration::from_millis(300)).await;
    let outcome = widget.perform_search().await;

    assert!(matches!(outcome, SearchOutcome::Failed { .. }));
    assert_eq!(widget.panel(), before);
}

#[tokio::test(start_paused = true)]
async fn test_render_results_directly() {
    let widget = widget_with(&FakeBackend::default());
    widget.render_results(&json!([{ "title": "direct" }]));
    assert_eq!(titles(&widget.panel()), vec!["direct"]);

    widget.render_results(&json!({ "detail": "validation error" }));
    assert_eq!(titles(&widget.panel()), vec!["No data found."]);
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_click_commits_title_and_hides_panel() {
    let backend = FakeBackend::default();
    backend.reply("cocoa", json!([{ "title": "Cocoa buffer stock" }, { "title": "Cocoa talks" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("cocoa");
    settle().await;

    assert_eq!(widget.select_suggestion(1), Some("Cocoa talks".to_string()));
    assert_eq!(widget.fields().query, "Cocoa talks");
    assert!(!widget.panel().visible);

    // Selection does not search on its own
    settle().await;
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_click_on_placeholder_is_ignored() {
    let backend = FakeBackend::default();
    let widget = widget_with(&backend);

    widget.on_input_change("zinc");
    settle().await;
    assert_eq!(widget.select_suggestion(0), None);
    assert!(widget.panel().visible);
    assert_eq!(widget.fields().query, "zinc");
}

// ---------------------------------------------------------------------------
// Out-of-order responses
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let backend = FakeBackend::default();
    backend
        .reply_after("gold", Duration::from_millis(2000), json!([{ "title": "old gold" }]))
        .reply("gold mine", json!([{ "title": "fresh mine" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("gold");
    tokio::time::sleep(Duration::from_millis(400)).await;
    widget.on_input_change("gold mine");
    tokio::time::sleep(Duration::from_millis(3000)).await;

    assert_eq!(backend.requests().len(), 2);
    assert_eq!(titles(&widget.panel()), vec!["fresh mine"]);
}

#[tokio::test(start_paused = true)]
async fn test_last_arrival_wins_when_discard_disabled() {
    let backend = FakeBackend::default();
    backend
        .reply_after("gold", Duration::from_millis(2000), json!([{ "title": "old gold" }]))
        .reply("gold mine", json!([{ "title": "fresh mine" }]));
    let config = WidgetConfig { discard_stale_responses: false, ..WidgetConfig::default() };
    let widget = SearchWidget::new(backend.clone(), config);

    widget.on_input_change("gold");
    tokio::time::sleep(Duration::from_millis(400)).await;
    widget.on_input_change("gold mine");
    tokio::time::sleep(Duration::from_millis(3000)).await;

    assert_eq!(titles(&widget.panel()), vec!["old gold"]);
}

#[tokio::test(start_paused = true)]
async fn test_late_response_does_not_reopen_dismissed_panel() {
    let backend = FakeBackend::default();
    backend.reply_after("lead", Duration::from_millis(1000), json!([{ "title": "Lead output" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("lead");
    tokio::time::sleep(Duration::from_millis(400)).await;
    widget.on_input_change("le");
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert!(!widget.panel().visible);
    assert!(widget.panel().entries.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_late_response_after_dismissal_lands_when_discard_disabled() {
    let backend = FakeBackend::default();
    backend.reply_after("lead", Duration::from_millis(1000), json!([{ "title": "Lead output" }]));
    let config = WidgetConfig { discard_stale_responses: false, ..WidgetConfig::default() };
    let widget = SearchWidget::new(backend.clone(), config);

    widget.on_input_change("lead");
    tokio::time::sleep(Duration::from_millis(400)).await;
    widget.on_input_change("le");
    tokio::time::sleep(Duration::from_millis(2000)).await;

    assert_eq!(titles(&widget.panel()), vec!["Lead output"]);
}

// ---------------------------------------------------------------------------
// Settling
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_settled_waits_for_request_in_flight() {
    let backend = FakeBackend::default();
    backend.reply_after("coffee", Duration::from_millis(1000), json!([{ "title": "Coffee talks" }]));
    let widget = widget_with(&backend);

    widget.on_input_change("coffee");
    tokio::time::sleep(Duration::from_millis(400)).await;
    // Timer has fired; only the request is outstanding
    assert!(!widget.search_pending());
    assert!(!widget.panel().visible);

    widget.settled().await;
    assert_eq!(titles(&widget.panel()), vec!["Coffee talks"]);
}

#[tokio::test(start_paused = true)]
async fn test_settled_returns_when_last_search_changes_nothing() {
    let backend = FakeBackend::default();
    backend.fail("wheat");
    let widget = widget_with(&backend);
    let rx = widget.subscribe();

    // Short query on an already hidden panel
    let start = tokio::time::Instant::now();
    widget.on_input_change("ab");
    widget.settled().await;
    assert!(start.elapsed() < Duration::from_millis(400));
    assert!(!rx.has_changed().unwrap());

    // Fetch error
    let start = tokio::time::Instant::now();
    widget.on_input_change("wheat");
    widget.settled().await;
    assert!(start.elapsed() < Duration::from_millis(400));
    assert_eq!(backend.requests().len(), 1);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_settled_with_nothing_scheduled_is_immediate() {
    let widget = widget_with(&FakeBackend::default());
    let start = tokio::time::Instant::now();
    widget.settled().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_panel_changes() {
    let backend = FakeBackend::default();
    backend.reply("copper", json!([{ "title": "Copper price cut" }]));
    let widget = widget_with(&backend);
    let mut rx = widget.subscribe();

    widget.on_input_change("copper");
    rx.changed().await.unwrap();
    assert_eq!(titles(&rx.borrow_and_update()), vec!["Copper price cut"]);

    widget.select_suggestion(0);
    rx.changed().await.unwrap();
    assert!(!rx.borrow_and_update().visible);
}
