use crate::config::{ApiConfig, CredentialsConfig, HttpConfig};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};

/// Environment variables that provide credentials when they aren't set explicitly.
const CREDENTIALS_ENV_VARS: [&str; 2] = ["TENABLE_ACCESS_KEY", "TENABLE_SECRET_KEY"];

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RawConfig {
    /// Remote API configuration.
    pub api: ApiConfig,
    /// API credentials, validated when the raw config is converted to `Config`.
    pub credentials: CredentialsConfig,
    /// Configuration for the HTTP functionality.
    pub http: HttpConfig,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values. Plain
    /// `TENABLE_*` credential variables have the lowest precedence, `TENABLEVM_` prefixed
    /// variables have the highest.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(
                providers::Env::raw()
                    .only(&CREDENTIALS_ENV_VARS)
                    .map(|key| {
                        key.as_str()
                            .to_ascii_lowercase()
                            .replacen("tenable_", "credentials.", 1)
                            .into()
                    }),
            )
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("TENABLEVM_").split("__"))
            .extract()?)
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("tenablevm main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}
