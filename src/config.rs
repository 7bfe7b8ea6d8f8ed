mod api_config;
mod credentials_config;
mod http_config;
mod raw_config;

use crate::{client::Credentials, error::Error as TenableError};
use anyhow::bail;

pub use self::{
    api_config::ApiConfig,
    credentials_config::CredentialsConfig,
    http_config::{HttpClientConfig, HttpConfig},
    raw_config::RawConfig,
};

/// Validated client config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Remote API configuration.
    pub api: ApiConfig,
    /// Credentials attached to every request.
    pub credentials: Credentials,
    /// Configuration for the HTTP functionality.
    pub http: HttpConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        let access_key = match raw_config.credentials.access_key {
            Some(access_key) if !access_key.is_empty() => access_key,
            _ => bail!(TenableError::invalid_input(
                "An access key must be provided either in the configuration (credentials.access_key) or via the TENABLE_ACCESS_KEY environment variable."
            )),
        };
        let secret_key = match raw_config.credentials.secret_key {
            Some(secret_key) if !secret_key.is_empty() => secret_key,
            _ => bail!(TenableError::invalid_input(
                "A secret key must be provided either in the configuration (credentials.secret_key) or via the TENABLE_SECRET_KEY environment variable."
            )),
        };

        Ok(Self {
            api: raw_config.api,
            credentials: Credentials::new(access_key, secret_key),
            http: raw_config.http,
        })
    }
}
