use crate::users::DEFAULT_ACCOUNT_TYPE;
use serde_derive::Deserialize;
use std::fmt::{Debug, Formatter};

/// Desired state of the user account.
#[derive(Deserialize, Clone, PartialEq)]
pub struct UserSpec {
    /// Username, can only be changed by replacing the user.
    pub username: String,
    /// Password, only sent when the user is created.
    #[serde(default)]
    pub password: Option<String>,
    /// Numeric permissions level.
    pub permissions: i64,
    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Account type, can only be changed by replacing the user.
    #[serde(default = "default_account_type")]
    pub account_type: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl UserSpec {
    /// Creates spec for the enabled local user.
    pub fn new<U: Into<String>>(username: U, permissions: i64) -> Self {
        Self {
            username: username.into(),
            password: None,
            permissions,
            name: None,
            email: None,
            account_type: default_account_type(),
            enabled: default_enabled(),
        }
    }
}

impl Debug for UserSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSpec")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("permissions", &self.permissions)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn default_account_type() -> String {
    DEFAULT_ACCOUNT_TYPE.to_string()
}

const fn default_enabled() -> bool {
    true
}
