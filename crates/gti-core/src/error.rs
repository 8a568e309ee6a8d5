use thiserror::Error;

/// Top-level error type for configuration and shared plumbing.
#[derive(Error, Debug)]
pub enum GtiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("API key missing: set VT_APIKEY or api.key in the config file")]
    MissingApiKey,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
