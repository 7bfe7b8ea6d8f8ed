use serde_derive::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Raw API credentials, any of the keys may be missing until the configuration is validated.
#[derive(Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CredentialsConfig {
    /// API access key, falls back to `TENABLE_ACCESS_KEY` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    /// API secret key, falls back to `TENABLE_SECRET_KEY` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl Debug for CredentialsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("access_key", &self.access_key.as_ref().map(|_| "***"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .finish()
    }
}
