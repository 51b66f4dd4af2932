//! Utility functions for query construction and shared helpers

use chrono::Utc;
use url::form_urlencoded;

/// Builds a `?`-prefixed, form-urlencoded query string from key/value pairs
///
/// Internal utility function; pairs are emitted in the order given.
#[inline(always)]
pub(crate) fn build_query(params: &[(&str, &str)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(params);
    format!("?{}", serializer.finish())
}

/// Creates the identifier used to name a cookie file
///
/// Millisecond timestamp followed by a random integer in `0..1000`.
pub(crate) fn cookie_file_id() -> String {
    format!(
        "{}{}",
        Utc::now().timestamp_millis(),
        rand::random_range(0..1000u32)
    )
}
