//! # Environment-Based Configuration
//!
//! Gateway settings are read once at process start. A missing api key is
//! fatal: the server must refuse to start rather than serve calls that can
//! only fail.
//!
//! ## Environment Variables
//!
//! - `EVOLUTION_API_KEY` - Gateway token sent in the `apikey` header (required)
//! - `EVOLUTION_API_URL` - Gateway base address (default: `http://localhost:8080`)

use crate::api_key::ApiKey;
use std::env;
use url::Url;

/// Environment variable holding the gateway token
pub const API_KEY_ENV: &str = "EVOLUTION_API_KEY";

/// Environment variable overriding the gateway base address
pub const API_URL_ENV: &str = "EVOLUTION_API_URL";

/// Gateway base address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable '{key}'")]
    MissingEnvVar { key: String },

    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },
}

/// Settings needed to reach the gateway
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub api_key: ApiKey,
}

impl ApiConfig {
    /// Create a configuration from explicit values
    pub fn new(base_url: Url, api_key: ApiKey) -> Self {
        Self { base_url, api_key }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when `EVOLUTION_API_KEY` is unset
    /// or empty, and `ConfigError::InvalidEnvVar` when the key cannot be sent
    /// as a header or `EVOLUTION_API_URL` is not a usable base URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the api key from the environment with an already resolved base
    /// address
    ///
    /// `base_url` goes through the same validation as `EVOLUTION_API_URL`;
    /// `None` selects the default address.
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_raw(env::var(API_KEY_ENV).ok(), base_url)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_ENV);
        Self::from_raw(lookup(API_KEY_ENV), base_url.as_deref())
    }

    fn from_raw(api_key: Option<String>, base_url: Option<&str>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .filter(|value| !value.is_empty())
            .map(ApiKey::new)
            .ok_or_else(|| ConfigError::MissingEnvVar {
                key: API_KEY_ENV.to_string(),
            })?;

        if api_key.header_value().is_err() {
            return Err(ConfigError::InvalidEnvVar {
                key: API_KEY_ENV.to_string(),
                message: "contains characters not allowed in an HTTP header".to_string(),
            });
        }

        let raw_url = base_url
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        Ok(Self {
            base_url: parse_base_url(raw_url)?,
            api_key,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar {
        key: API_URL_ENV.to_string(),
        message: format!("invalid URL '{raw}': {e}"),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar {
            key: API_URL_ENV.to_string(),
            message: format!("'{raw}' cannot be used as a base URL"),
        });
    }

    Ok(url)
}
