//! Blocking authentication against the wiki API
use crate::client::WikiClient;
use crate::errors::WikiError;
use crate::extraction::field_str;
use crate::networking::auth::LoginInfo;
use log::{debug, info};

/// `login.result` value asking the caller to repeat the login with a token
pub const NEED_TOKEN: &str = "NeedToken";

impl WikiClient {
    /// Log into the wiki
    ///
    /// Posts the credentials once; when the server answers `NeedToken` the
    /// same credentials are posted again together with the returned token.
    ///
    /// # Arguments
    /// * `username` - account name
    /// * `password` - account or bot password
    ///
    /// # Returns
    /// * `login.result` of the last response, or `None` if it has none
    ///
    /// # Example
    /// ```no_run
    /// use wikibot_api::WikiClient;
    /// let client = WikiClient::new(None).expect("Failed to create client");
    /// let result = client.login("ExampleBot", "hunter2").expect("Login request failed");
    /// assert_eq!(result.as_deref(), Some("Success"));
    /// ```
    pub fn login(&self, username: &str, password: &str) -> Result<Option<String>, WikiError> {
        let query = self.action_query("login");
        let mut form = LoginInfo {
            lgname: username,
            lgpassword: password,
            lgtoken: None,
        };
        let mut response = self.post(&query, &form)?;

        if field_str(&response, "/login/result").as_deref() == Some(NEED_TOKEN) {
            let token = field_str(&response, "/login/token")
                .ok_or_else(|| WikiError::MissingField("login.token".to_string()))?;
            debug!("Login needs token, retrying");
            form.lgtoken = Some(token);
            response = self.post(&query, &form)?;
        }

        let result = field_str(&response, "/login/result");
        info!("Login as {}: {}", username, result.as_deref().unwrap_or("<no result>"));
        Ok(result)
    }

    /// Get an edit token for the session
    ///
    /// # Returns
    /// * `tokens.edittoken`, or `None` if the response has none
    pub fn get_edit_token(&self) -> Result<Option<String>, WikiError> {
        let response = self.get(&self.action_query("tokens"))?;
        Ok(field_str(&response, "/tokens/edittoken"))
    }
}
