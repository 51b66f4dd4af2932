//! # wikibot-api
//!
//! A small blocking client for MediaWiki-style web APIs.
//!
//! A [`WikiClient`] owns one HTTP session whose cookies are mirrored to a
//! temporary file for as long as the client lives. On top of it the client
//! offers login, edit token retrieval, page fetching, page creation and the
//! list of newest pages.
//!
//! ## Usage
//!
//! ```no_run
//! use wikibot_api::WikiClient;
//!
//! let mut client = WikiClient::new(Some("https://test.wikipedia.org/w/api.php"))
//!     .expect("Failed to create client");
//! client.login("ExampleBot", "hunter2").expect("Login failed");
//!
//! for title in client.get_new_pages(0, 5).expect("Listing failed") {
//!     println!("new page: {}", title);
//! }
//!
//! let result = client
//!     .create_page("Sandbox/Example", "Hello, wiki!", None)
//!     .expect("Edit failed");
//! println!("{:?}", result);
//! ```
pub mod client;
pub mod errors;
pub mod extraction;
pub mod format;
pub mod networking;
mod utils;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_SUMMARY, WikiClient, WikiConfig};
pub use errors::WikiError;
pub use format::{JsonFormat, PhpFormat, ResponseFormat};
