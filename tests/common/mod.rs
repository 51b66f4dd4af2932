// Common utilities for integration tests
#![allow(dead_code)]

use mockito::{Matcher, ServerGuard};
use wikibot_api::{WikiClient, WikiConfig};

pub const API_PATH: &str = "/w/api.php";

/// Installs a logger once; later calls are no-ops
pub fn setup_logger() {
    let _ = pretty_env_logger::try_init();
}

/// Matches the API path whatever the query string
pub fn api_path() -> Matcher {
    Matcher::Regex(r"^/w/api\.php".to_string())
}

pub fn param(key: &str, value: &str) -> Matcher {
    Matcher::UrlEncoded(key.to_string(), value.to_string())
}

pub fn test_config(server: &ServerGuard) -> WikiConfig {
    WikiConfig {
        endpoint: format!("{}{}", server.url(), API_PATH),
        ..WikiConfig::default()
    }
}

/// Creates a JSON client pointed at the mock server
pub fn create_test_client(server: &ServerGuard) -> WikiClient {
    setup_logger();
    WikiClient::with_config(test_config(server)).expect("Failed to create client")
}
