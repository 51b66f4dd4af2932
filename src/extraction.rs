//! Field extraction from decoded API responses
//!
//! Responses are inspected by key presence, not against a fixed schema. A
//! field that exists but is not a string counts as absent.
//!
//! ```rust
//! use serde_json::json;
//! use wikibot_api::extraction::field_str;
//! let response = json!({"tokens": {"edittoken": "abc+\\"}});
//! assert_eq!(field_str(&response, "/tokens/edittoken").as_deref(), Some("abc+\\"));
//! ```
use serde_json::Value;

/// Gets the string at a JSON pointer such as `/login/result`
pub fn field_str(response: &Value, pointer: &str) -> Option<String> {
    response
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Iterates a list-shaped value
///
/// The API answers with either a JSON array or, for PHP-decoded keyed
/// arrays, an object; both are walked in order.
fn entries(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => Box::new(std::iter::empty()),
    }
}

/// Gets the content of the first revision of the first page in a
/// `prop=revisions` query
///
/// Only the first entry of `query.pages` is looked at, even when the server
/// returns several.
///
/// # Returns
/// * `None` when there are no pages or the first page has no revision content
pub fn first_page_content(response: &Value) -> Option<String> {
    let page = entries(response.pointer("/query/pages")?).next()?;
    let revision = page.pointer("/revisions/0")?;
    revision
        .get("*")
        .or_else(|| revision.get("content"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Gets the page titles of a `list=recentchanges` query, in server order
///
/// # Arguments
/// * `response` - decoded response
/// * `limit` - the most titles returned
pub fn recent_change_titles(response: &Value, limit: usize) -> Vec<String> {
    let Some(changes) = response.pointer("/query/recentchanges") else {
        return Vec::new();
    };
    entries(changes)
        .filter_map(|change| change.get("title").and_then(Value::as_str))
        .take(limit)
        .map(ToString::to_string)
        .collect()
}
