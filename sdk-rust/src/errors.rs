use crate::mastodon::MastodonApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SavecastError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request could not be sent or the connection failed before a
    /// response arrived (including timeouts).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The source service answered with a non-success status code
    #[error("Source unavailable: {1} (Status {0})")]
    SourceUnavailable(reqwest::StatusCode, String),
    /// The source service answered 2xx but the body could not be decoded.
    #[error("Source response invalid: {0}")]
    SourceResponseInvalid(String),
    /// The destination server refused the status. `error` carries the
    /// server's structured payload when it could be decoded.
    #[error("Destination rejected status (Status {status}){}", format_api_error(.error.as_ref()))]
    DestinationRejected {
        status: reqwest::StatusCode,
        error: Option<MastodonApiError>,
    },
}

fn format_api_error(error: Option<&MastodonApiError>) -> String {
    error.map_or_else(String::new, |error| format!(": {error}"))
}

impl SavecastError {
    /// Status code reported by the remote service, if any.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::SourceUnavailable(status, _) | Self::DestinationRejected { status, .. } => {
                Some(*status)
            }
            Self::Transport(error) => error.status(),
            Self::InvalidInput(_) | Self::SourceResponseInvalid(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, SavecastError>;
