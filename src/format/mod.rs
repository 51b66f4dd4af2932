//! Response serialization formats understood by the client
//!
//! The API is asked for a format with the `format=<name>` query parameter
//! and the body is decoded into a [`serde_json::Value`] whatever the wire
//! format was, so the rest of the crate inspects one shape.

mod php;

pub use php::{PhpFormat, unserialize};

use crate::errors::WikiError;
use serde_json::Value;

/// A wire format the API can answer in
pub trait ResponseFormat: Send + Sync {
    /// Value passed as the `format` query parameter
    fn name(&self) -> &'static str;

    /// Decode a raw response body
    fn decode(&self, body: &str) -> Result<Value, WikiError>;
}

/// `format=json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ResponseFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, body: &str) -> Result<Value, WikiError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_decode() {
        let value = JsonFormat
            .decode(r#"{"login":{"result":"Success"}}"#)
            .unwrap();
        assert_eq!(value["login"]["result"], "Success");
    }

    #[test]
    fn test_json_decode_malformed() {
        let err = JsonFormat.decode("<html>").unwrap_err();
        assert!(matches!(err, WikiError::SerdeError(_)));
    }
}
