//! Suggestion list under the search box.

use dioxus::prelude::*;
use docsearch_core::types::{PanelEntry, SUGGESTIONS_ID};

use crate::state::*;

#[component]
pub fn SuggestionList() -> Element {
    let panel = PANEL.read();

    rsx! {
        div {
            id: SUGGESTIONS_ID,
            class: "suggestions",
            style: if panel.visible { "display: block;" } else { "display: none;" },
            for (i, entry) in panel.entries.iter().enumerate() {
                {match entry {
                    PanelEntry::Suggestion(title) => rsx! {
                        p {
                            key: "{i}",
                            class: "suggestion-item",
                            onclick: move |_| select_suggestion(i),
                            "{title}"
                        }
                    },
                    PanelEntry::Placeholder(msg) => rsx! {
                        p { key: "{i}", class: "suggestion-empty", "{msg}" }
                    },
                }}
            }
        }
    }
}

/// Commit the clicked title to the search box. The widget hides the list and
/// disarms any pending search.
fn select_suggestion(index: usize) {
    let Some(widget) = widget() else {
        return;
    };
    if let Some(title) = widget.select_suggestion(index) {
        *QUERY.write() = title;
    }
}
