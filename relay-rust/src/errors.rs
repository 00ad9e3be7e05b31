use savecast_sdk::SavecastError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required values are absent or empty.
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<&'static str>),
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Fetching saves failed; nothing was published.
    #[error("Failed to fetch saves: {0}")]
    Fetch(#[source] SavecastError),
    #[error("Failed to set up HTTP client: {0}")]
    Client(#[source] SavecastError),
}
