use crate::{
    api,
    gate::{Exclusions, GatePolicy, Gatekeeper},
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_base_url: String,
    pub protected_paths: Vec<String>,
    pub excluded_paths: Vec<String>,
    pub fetch_timeout_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the exclusion list does not compile, the HTTP client
/// cannot be built, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let exclusions =
        Exclusions::new(&args.excluded_paths).context("Invalid excluded path list")?;
    let gatekeeper = Gatekeeper::new(GatePolicy::new(args.protected_paths), exclusions);

    let state = api::AppState::new(
        &args.api_base_url,
        Duration::from_secs(args.fetch_timeout_seconds),
    )?;

    let result = api::new(args.port, state, gatekeeper).await;

    crate::cli::telemetry::shutdown_tracer();

    result
}
