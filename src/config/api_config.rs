use serde_derive::{Deserialize, Serialize};
use url::Url;

/// Configuration for the remote vulnerability management API.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// The origin all API requests are sent to.
    pub base_url: Url,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://cloud.tenable.com")
                .expect("Cannot parse API base URL parameter."),
        }
    }
}
