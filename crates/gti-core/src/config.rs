//! Configuration management for the GTI tools.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`GTI__` prefix, `__` separator, e.g. `GTI__API__TIMEOUT_SECS`)
//! 2. Config file (`gti.toml`, optional)
//! 3. Defaults
//!
//! The API key is additionally read from `VT_APIKEY` when neither source sets it.

use serde::Deserialize;

use crate::error::GtiError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VT_APIKEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GtiConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Connection settings for the upstream graph API.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent in the `x-apikey` header.
    #[serde(default)]
    pub key: Option<String>,

    /// Upper bound on a single HTTP round trip.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// The configured API key, or [`GtiError::MissingApiKey`].
    pub fn require_key(&self) -> Result<&str, GtiError> {
        match self.key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(GtiError::MissingApiKey),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://www.virustotal.com/api/v3".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("gti-tools/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Load configuration from `{file_prefix}.toml` (if present) and `GTI__` env vars.
pub fn load(file_prefix: &str) -> Result<GtiConfig, GtiError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("GTI")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut gti: GtiConfig = cfg.try_deserialize()?;

    if gti.api.key.is_none() {
        gti.api.key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
    }

    tracing::debug!(
        base_url = %gti.api.base_url,
        timeout_secs = gti.api.timeout_secs,
        has_key = gti.api.key.is_some(),
        "Configuration loaded"
    );

    Ok(gti)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GtiConfig::default();
        assert_eq!(config.api.base_url, "https://www.virustotal.com/api/v3");
        assert_eq!(config.api.timeout_secs, 60);
        assert!(config.api.user_agent.starts_with("gti-tools/"));
        assert!(config.api.key.is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load("does-not-exist-gti-config").unwrap();
        assert_eq!(config.api.timeout_secs, 60);
    }

    #[test]
    fn test_partial_api_section_keeps_defaults() {
        let config: GtiConfig =
            serde_json::from_value(serde_json::json!({"api": {"timeout_secs": 5}})).unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url, "https://www.virustotal.com/api/v3");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let mut api = ApiConfig::default();
        assert!(matches!(api.require_key(), Err(GtiError::MissingApiKey)));

        api.key = Some("  ".to_string());
        assert!(api.require_key().is_err());

        api.key = Some("secret".to_string());
        assert_eq!(api.require_key().unwrap(), "secret");
    }

    #[test]
    fn test_debug_redacts_key() {
        let api = ApiConfig {
            key: Some("secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{api:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
