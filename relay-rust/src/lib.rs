mod config;
mod errors;
mod message;
mod params;
mod relay;

pub use config::*;
pub use errors::{ConfigError, RelayError};
pub use message::{StatusTemplate, DEFAULT_TEMPLATE, MAX_STATUS_CHARS};
pub use params::{RelayParams, DEFAULT_POST_DELAY};
pub use relay::{PublishFailure, PublishedItem, Relay, RelayReport};

use std::{process::ExitCode, sync::Arc};

/// Exit status for a configuration error.
pub const EXIT_CONFIG: u8 = 2;
/// Exit status for a pass that could not fetch saves or build its clients.
pub const EXIT_FAILURE: u8 = 1;

/// Process exit status for the outcome of a pass. A completed pass exits
/// successfully even when some posts failed; those are in the report.
#[must_use]
pub fn exit_status(result: &Result<RelayReport, RelayError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(RelayError::Config(_)) => EXIT_CONFIG,
        Err(RelayError::Fetch(_) | RelayError::Client(_)) => EXIT_FAILURE,
    }
}

#[must_use]
pub fn exit_code(result: &Result<RelayReport, RelayError>) -> ExitCode {
    ExitCode::from(exit_status(result))
}

/// Load configuration from the environment and run one pass.
pub async fn run_from_env() -> Result<RelayReport, RelayError> {
    let config = Config::from_env()?;
    run_once(&config).await
}

/// Run one pass against Pocket and Mastodon as described by `config`.
pub async fn run_once(config: &Config) -> Result<RelayReport, RelayError> {
    let source = Arc::new(config.pocket_source()?);
    let publisher = Arc::new(config.mastodon_publisher()?);

    Relay::builder(source, publisher)
        .post_delay(config.settings.post_delay)
        .template(config.settings.template.clone())
        .visibility(config.settings.visibility)
        .build()
        .run()
        .await
}
