//! Interprets whatever JSON the endpoint returned as suggestions.
//!
//! The endpoint is expected to return an array of objects with a `title`, but any
//! other shape is legal and simply means "no results".

use serde_json::Value;

use crate::types::Suggestions;

/// Extract suggestion titles from a response body.
///
/// Items whose `title` is missing or not a string are skipped. A body that is not an
/// array, an empty array, or an array with no titled items yields [`Suggestions::NoData`].
pub fn interpret_response(data: &Value) -> Suggestions {
    let Some(items) = data.as_array() else {
        return Suggestions::NoData;
    };

    let titles: Vec<String> = items
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    if titles.is_empty() {
        Suggestions::NoData
    } else {
        Suggestions::Titles(titles)
    }
}
