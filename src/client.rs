//! The wiki API client

use crate::errors::WikiError;
use crate::extraction::{field_str, first_page_content, recent_change_titles};
use crate::format::{JsonFormat, ResponseFormat};
use crate::networking::Transport;
use crate::utils::build_query;
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// English Wikipedia
pub const DEFAULT_ENDPOINT: &str = "http://en.wikipedia.org/w/api.php";
pub const DEFAULT_SUMMARY: &str = "Creating new page";

/// Construction-time settings for a [`WikiClient`]
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// API endpoint the query strings are appended to
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        WikiConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("wikibot-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Edit form fields for `action=edit`
#[derive(Serialize, Debug)]
struct EditForm<'a> {
    title: &'a str,
    text: &'a str,
    token: &'a str,
    summary: &'a str,
    createonly: &'a str,
}

/// Client for one wiki session
///
/// Owns its HTTP session (and with it the cookie file) and the edit token
/// once fetched. The token is kept for the life of the client.
pub struct WikiClient {
    endpoint: String,
    transport: Transport,
    format: Box<dyn ResponseFormat>,
    edit_token: Option<String>,
}

impl fmt::Debug for WikiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiClient")
            .field("endpoint", &self.endpoint)
            .field("format", &self.format.name())
            .field("cookie_path", &self.transport.cookie_path())
            .finish_non_exhaustive()
    }
}

impl WikiClient {
    /// Create a client for `endpoint`, or for English Wikipedia when `None`
    ///
    /// # Example
    /// ```no_run
    /// use wikibot_api::WikiClient;
    /// let client = WikiClient::new(Some("https://test.wikipedia.org/w/api.php"))
    ///     .expect("Failed to create client");
    /// let text = client.get_page("Main Page").expect("Request failed");
    /// ```
    pub fn new(endpoint: Option<&str>) -> Result<Self, WikiError> {
        let mut config = WikiConfig::default();
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint.to_string();
        }
        Self::with_config(config)
    }

    pub fn with_config(config: WikiConfig) -> Result<Self, WikiError> {
        Self::with_format(config, JsonFormat)
    }

    /// Create a client that asks for, and decodes, the given format
    pub fn with_format<F: ResponseFormat + 'static>(
        config: WikiConfig,
        format: F,
    ) -> Result<Self, WikiError> {
        let transport = Transport::new(&config.user_agent)?;
        Ok(WikiClient {
            endpoint: config.endpoint,
            transport,
            format: Box::new(format),
            edit_token: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn cookie_path(&self) -> &Path {
        self.transport.cookie_path()
    }

    pub fn has_edit_token(&self) -> bool {
        self.edit_token.is_some()
    }

    /// Send a GET query to the API
    ///
    /// # Arguments
    /// * `query` - query string appended to the endpoint, starting with `?`
    pub fn get(&self, query: &str) -> Result<Value, WikiError> {
        let body = self.transport.get(&format!("{}{}", self.endpoint, query))?;
        self.format.decode(&body)
    }

    /// Send a POST query to the API with form-encoded fields
    pub fn post<F: Serialize + ?Sized>(&self, query: &str, fields: &F) -> Result<Value, WikiError> {
        let body = self
            .transport
            .post(&format!("{}{}", self.endpoint, query), fields)?;
        self.format.decode(&body)
    }

    /// `?action=<action>&format=<format>`
    pub(crate) fn action_query(&self, action: &str) -> String {
        build_query(&[("action", action), ("format", self.format.name())])
    }

    /// Get the wikitext of a page
    ///
    /// Only the first page of the response is looked at.
    ///
    /// # Returns
    /// * The content of the latest revision, or `None` if there is none
    pub fn get_page(&self, title: &str) -> Result<Option<String>, WikiError> {
        let query = build_query(&[
            ("action", "query"),
            ("format", self.format.name()),
            ("prop", "revisions"),
            ("titles", title),
            ("rvlimit", "1"),
            ("rvprop", "content"),
        ]);
        let response = self.get(&query)?;
        Ok(first_page_content(&response))
    }

    /// Get the titles of the newest pages, newest first
    ///
    /// # Arguments
    /// * `namespace` - namespace number to search
    /// * `limit` - the most titles to return
    pub fn get_new_pages(&self, namespace: i32, limit: u32) -> Result<Vec<String>, WikiError> {
        let namespace = namespace.to_string();
        let rclimit = limit.to_string();
        let query = build_query(&[
            ("action", "query"),
            ("list", "recentchanges"),
            ("format", self.format.name()),
            ("rctype", "new"),
            ("rcprop", "title"),
            ("rcnamespace", &namespace),
            ("rclimit", &rclimit),
        ]);
        let response = self.get(&query)?;
        Ok(recent_change_titles(&response, limit as usize))
    }

    /// [`get_new_pages`](Self::get_new_pages) for the main namespace, 10 titles
    pub fn get_new_pages_default(&self) -> Result<Vec<String>, WikiError> {
        self.get_new_pages(0, 10)
    }

    /// Create a page; fails on the server side if the page already exists
    ///
    /// Fetches an edit token on first use and keeps it for later calls.
    ///
    /// # Arguments
    /// * `title` - title of the new page
    /// * `text` - wikitext of the new page
    /// * `summary` - edit summary, `"Creating new page"` when `None` or empty
    ///
    /// # Returns
    /// * `edit.result`, or `None` if the response has none
    pub fn create_page(
        &mut self,
        title: &str,
        text: &str,
        summary: Option<&str>,
    ) -> Result<Option<String>, WikiError> {
        let token = match self.edit_token.clone() {
            Some(token) => token,
            None => {
                let token = self
                    .get_edit_token()?
                    .ok_or_else(|| WikiError::MissingField("tokens.edittoken".to_string()))?;
                self.edit_token = Some(token.clone());
                token
            }
        };

        let form = EditForm {
            title,
            text,
            token: &token,
            summary: summary.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SUMMARY),
            createonly: "1",
        };
        let response = self.post(&self.action_query("edit"), &form)?;
        let result = field_str(&response, "/edit/result");
        info!(
            "Create page {}: {}",
            title,
            result.as_deref().unwrap_or("<no result>")
        );
        Ok(result)
    }
}
