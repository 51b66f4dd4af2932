//! Blocking HTTP transport with a persistent cookie session

use crate::errors::WikiError;
use crate::networking::cookies::FileCookieStore;
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::redirect;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Total time allowed for one request, including the body
pub const TIMEOUT: Duration = Duration::from_secs(60);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Idle connections kept per host
pub const MAX_CONNECTIONS: usize = 10;
/// Redirect hops followed by GET requests; POST requests follow none
pub const MAX_REDIRECTS: usize = 5;

/// Create a configured HTTP client sharing the given cookie store
///
/// # Arguments
/// * `useragent` - User-Agent header sent with every request
/// * `cookies` - cookie store shared by every client of the session
/// * `policy` - redirect policy for this client
///
/// # Returns
/// * Returns a configured reqwest Client
pub fn create_client(
    useragent: &str,
    cookies: Arc<FileCookieStore>,
    policy: redirect::Policy,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .redirect(policy)
        .cookie_provider(cookies)
        .timeout(TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(MAX_CONNECTIONS)
        .user_agent(useragent)
        .build()
}

/// One HTTP session: two clients over a single cookie store
///
/// GET requests go through a client that follows redirects, POST requests
/// through one that does not. Both see the same cookies. The cookie file is
/// removed when the transport is dropped.
#[derive(Debug)]
pub struct Transport {
    follow: Client,
    no_follow: Client,
    cookies: Arc<FileCookieStore>,
}

impl Transport {
    /// Open a new session
    ///
    /// # Example
    /// ```no_run
    /// use wikibot_api::networking::Transport;
    /// let transport = Transport::new("test").expect("Failed to create transport");
    /// let body = transport.get("https://en.wikipedia.org/w/api.php?action=query&format=json");
    /// ```
    pub fn new(useragent: &str) -> Result<Self, WikiError> {
        let cookies = Arc::new(FileCookieStore::new()?);
        let follow = create_client(
            useragent,
            Arc::clone(&cookies),
            redirect::Policy::limited(MAX_REDIRECTS),
        )?;
        let no_follow = create_client(useragent, Arc::clone(&cookies), redirect::Policy::none())?;
        Ok(Transport {
            follow,
            no_follow,
            cookies,
        })
    }

    /// Issue a GET and return the body as text
    pub fn get(&self, url: &str) -> Result<String, WikiError> {
        debug!("GET {}", url);
        let response = self.follow.get(url).send()?;
        read_body(response)
    }

    /// Issue a form-encoded POST and return the body as text
    ///
    /// reqwest never sends `Expect: 100-continue`, so the body goes out with
    /// the headers.
    pub fn post<F: Serialize + ?Sized>(&self, url: &str, fields: &F) -> Result<String, WikiError> {
        debug!("POST {}", url);
        let response = self.no_follow.post(url).form(fields).send()?;
        read_body(response)
    }

    pub fn cookie_path(&self) -> &Path {
        self.cookies.path()
    }
}

fn read_body(response: Response) -> Result<String, WikiError> {
    debug!("{} {}", response.status(), response.url());
    let response = response.error_for_status()?;
    Ok(response.text_with_charset("utf-8")?)
}
