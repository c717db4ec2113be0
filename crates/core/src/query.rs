//! Decides, from the current field values, whether a debounce firing should search.

use crate::types::{SearchFields, SearchRequest};

/// Outcome of inspecting the fields when the debounce timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    /// Query too short after trimming: clear and hide the panel, send nothing.
    Dismiss,
    /// Send this request.
    Search(SearchRequest),
}

/// Trim all four fields and apply the minimum-length gate to the query.
///
/// The bound is inclusive and counted in chars, so `"abc"` searches, `"ab"` and
/// `"   "` do not, and `"héé"` searches like any other three-character query.
pub fn prepare_search(fields: &SearchFields, min_query_chars: usize) -> SearchIntent {
    let query = fields.query.trim();
    if query.chars().count() < min_query_chars {
        return SearchIntent::Dismiss;
    }

    SearchIntent::Search(SearchRequest {
        query: query.to_string(),
        topic: fields.topic.trim().to_string(),
        author: fields.author.trim().to_string(),
        location: fields.location.trim().to_string(),
    })
}
