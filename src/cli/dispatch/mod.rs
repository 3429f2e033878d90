//! Command-line argument dispatch.
//!
//! Maps validated CLI arguments to the action to run.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{gate, upstream};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let gate_opts = gate::Options::parse(matches);
    let upstream_opts = upstream::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_base_url: upstream_opts.api_base_url,
        protected_paths: gate_opts.protected_paths,
        excluded_paths: gate_opts.excluded_paths,
        fetch_timeout_seconds: upstream_opts.timeout_seconds,
    }))
}
