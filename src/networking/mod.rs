//! # networking
//!
//! HTTP plumbing for talking to a wiki API.
//!
//! This module provides:
//! - A blocking transport with a persistent cookie session
//! - A cookie store mirrored to a per-session temporary file
//! - API authentication (login, edit token retrieval)
//!
//! ## Usage
//!
//! ```no_run
//! use wikibot_api::networking::Transport;
//!
//! // Open a session
//! let transport = Transport::new("test").expect("Failed to create transport");
//!
//! // Fetch a URL
//! let body = transport
//!     .get("https://en.wikipedia.org/w/api.php?action=query&meta=siteinfo&format=json")
//!     .expect("Failed to fetch page");
//!
//! // The cookie file is removed when the transport goes out of scope
//! println!("cookies kept in {}", transport.cookie_path().display());
//! ```

// Module declarations
pub mod auth;
pub mod client;
pub mod cookies;

// Re-export commonly used items for convenience
pub use auth::LoginInfo;
pub use auth::blocking::NEED_TOKEN;
pub use client::blocking::{
    CONNECT_TIMEOUT, MAX_CONNECTIONS, MAX_REDIRECTS, TIMEOUT, Transport, create_client,
};
pub use cookies::FileCookieStore;

// Re-export types from dependencies for convenience
pub use reqwest::Error as NetworkError;
pub use reqwest::blocking::Client;
