//! Optional filter inputs. Their values ride along with the next search.

use dioxus::prelude::*;
use docsearch_core::types::Filter;

use crate::state::{filter_signal, widget};

#[component]
pub fn FilterFields() -> Element {
    rsx! {
        div {
            class: "filter-row",
            for filter in Filter::ALL {
                FilterInput { key: "{filter.element_id()}", filter }
            }
        }
    }
}

#[component]
fn FilterInput(filter: Filter) -> Element {
    let signal = filter_signal(filter);
    let value = signal.read();

    rsx! {
        label {
            class: "filter-field",
            r#for: filter.element_id(),
            span { class: "filter-label", "{filter.label()}" }
            input {
                id: filter.element_id(),
                class: "filter-input",
                r#type: "text",
                placeholder: "any",
                value: "{value}",
                oninput: move |e: Event<FormData>| {
                    let value = e.value();
                    *filter_signal(filter).write() = value.clone();
                    if let Some(widget) = widget() {
                        widget.set_filter(filter, value);
                    }
                },
            }
        }
    }
}
