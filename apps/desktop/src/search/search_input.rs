//! Primary search input. Every keystroke goes to the widget's debouncer.

use dioxus::prelude::*;

use docsearch_core::types::SEARCH_BOX_ID;

use crate::state::*;

#[component]
pub fn SearchInput() -> Element {
    let query = QUERY.read();

    rsx! {
        div {
            class: "search-field",

            span { class: "search-label", "SEARCH" }

            input {
                id: SEARCH_BOX_ID,
                class: "search-input",
                r#type: "text",
                placeholder: "Search documents...",
                autocomplete: "off",
                value: "{query}",
                autofocus: true,
                oninput: move |e: Event<FormData>| {
                    let value = e.value();
                    *QUERY.write() = value.clone();
                    if let Some(widget) = widget() {
                        widget.on_input_change(value);
                    }
                },
            }
        }
    }
}
