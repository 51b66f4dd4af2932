//! File-mirrored cookie store for a single client session

use crate::errors::WikiError;
use crate::utils::cookie_file_id;
use log::{debug, warn};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Cookie store that keeps cookies in memory and mirrors them to a temp file
///
/// Every `Set-Cookie` header the session receives is appended to the file as
/// `<host>\t<header>`. The file lives in the system temp directory and is
/// deleted when the store is dropped.
#[derive(Debug)]
pub struct FileCookieStore {
    jar: Jar,
    path: PathBuf,
    file: Mutex<NamedTempFile>,
}

impl FileCookieStore {
    /// Create a store backed by a freshly created, uniquely named file
    ///
    /// # Example
    /// ```no_run
    /// use wikibot_api::networking::FileCookieStore;
    /// let store = FileCookieStore::new().expect("Failed to create cookie store");
    /// assert!(store.path().exists());
    /// ```
    pub fn new() -> Result<Self, WikiError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("cookies{}", cookie_file_id()))
            .suffix(".dat")
            .tempfile()?;
        let path = file.path().to_path_buf();
        debug!("Created cookie file {}", path.display());
        Ok(FileCookieStore {
            jar: Jar::default(),
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CookieStore for FileCookieStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        let mut file = self.file.lock().unwrap_or_else(|poisoned| {
            warn!("Cookie file lock poisoned, recovering {}", self.path.display());
            poisoned.into_inner()
        });
        let host = url.host_str().unwrap_or_default();
        for header in &headers {
            let Ok(value) = header.to_str() else {
                continue;
            };
            if let Err(e) = writeln!(file, "{}\t{}", host, value) {
                warn!("Failed to write cookie file {}: {}", self.path.display(), e);
            }
        }
        drop(file);
        self.jar.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

impl Drop for FileCookieStore {
    fn drop(&mut self) {
        debug!("Releasing cookie file {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_file_name_uses_cookie_prefix() {
        let store = FileCookieStore::new().unwrap();
        let name = store.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("cookies"));
        assert!(name.ends_with(".dat"));
    }

    #[test]
    fn test_file_removed_on_drop() {
        let store = FileCookieStore::new().unwrap();
        let path = store.path().to_path_buf();
        assert!(path.exists());
        drop(store);
        assert!(!path.exists());
    }

    #[test]
    fn test_set_cookies_mirrors_to_file_and_jar() {
        let store = FileCookieStore::new().unwrap();
        let url = Url::parse("http://wiki.example.org/w/api.php").unwrap();
        let header = HeaderValue::from_static("wikisession=abc123; Path=/");
        store.set_cookies(&mut std::iter::once(&header), &url);

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "wiki.example.org\twikisession=abc123; Path=/\n");

        let sent = store.cookies(&url).unwrap();
        assert_eq!(sent.to_str().unwrap(), "wikisession=abc123");
    }

    #[test]
    fn test_set_cookies_after_poisoned_lock() {
        let store = Arc::new(FileCookieStore::new().unwrap());
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.file.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(store.file.is_poisoned());

        let url = Url::parse("http://wiki.example.org/w/api.php").unwrap();
        let header = HeaderValue::from_static("wikisession=def456; Path=/");
        store.set_cookies(&mut std::iter::once(&header), &url);

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("wikisession=def456"));
        assert!(store.cookies(&url).is_some());
    }

    #[test]
    fn test_paths_unique_across_instances() {
        let first = FileCookieStore::new().unwrap();
        let second = FileCookieStore::new().unwrap();
        assert_ne!(first.path(), second.path());
    }
}
