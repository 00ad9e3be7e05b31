use savecast_relay::{exit_code, run_from_env, RelayError};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let result = run_from_env().await;
    // Per-save failures and the run summary are logged by the relay.
    match &result {
        Ok(_) => {}
        Err(err @ RelayError::Config(_)) => error!("Error loading configuration: {err}"),
        Err(err) => error!("{err}"),
    }
    exit_code(&result)
}
