pub mod blocking;

use serde::Serialize;

/// Login form fields for `action=login`
#[derive(Serialize, Debug, Clone)]
pub struct LoginInfo<'a> {
    pub lgname: &'a str,
    pub lgpassword: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lgtoken: Option<String>,
}
