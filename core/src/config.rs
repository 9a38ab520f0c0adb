//! Declarative client configuration.
//!
//! `ClientConfig` holds the same knobs as `ClientBuilder` in a form that can
//! be embedded in a host application's own config file (every field is
//! optional) or read from `TCGDEX_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::enums::Language;
use crate::error::ConfigError;

pub const ENV_BASE_URL: &str = "TCGDEX_BASE_URL";
pub const ENV_LANGUAGE: &str = "TCGDEX_LANGUAGE";
pub const ENV_USER_AGENT: &str = "TCGDEX_USER_AGENT";
pub const ENV_CACHE_TTL_SECS: &str = "TCGDEX_CACHE_TTL_SECS";
pub const ENV_TIMEOUT_SECS: &str = "TCGDEX_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub language: Option<Language>,
    pub user_agent: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Read the `TCGDEX_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let language = get(ENV_LANGUAGE)
            .map(|v| v.parse::<Language>())
            .transpose()?;
        let cache_ttl_secs = get(ENV_CACHE_TTL_SECS)
            .map(|v| parse_seconds(ENV_CACHE_TTL_SECS, v))
            .transpose()?;
        let timeout_secs = get(ENV_TIMEOUT_SECS)
            .map(|v| parse_seconds(ENV_TIMEOUT_SECS, v))
            .transpose()?;

        Ok(Self {
            base_url: get(ENV_BASE_URL),
            language,
            user_agent: get(ENV_USER_AGENT),
            cache_ttl_secs,
            timeout_secs,
        })
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_seconds(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidSeconds { var, value, source })
}
