//! Search panel — query input, filter inputs, suggestion list.

mod filters;
mod search_input;
mod suggestions;

use dioxus::prelude::*;
use filters::FilterFields;
use search_input::SearchInput;
use suggestions::SuggestionList;

#[component]
pub fn SearchPanel() -> Element {
    rsx! {
        div {
            class: "search-panel",
            div {
                class: "search-anchor",
                SearchInput {}
                SuggestionList {}
            }
            FilterFields {}
        }
    }
}
