use anyhow::{Context, anyhow};
use clap::{Arg, ArgMatches, Command};
use url::Url;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_FETCH_TIMEOUT: &str = "fetch-timeout-seconds";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

impl Options {
    /// Parse and validate the external backend arguments.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing, unparsable, or not HTTP(S).
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let raw = matches
            .get_one::<String>(ARG_API_BASE_URL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| anyhow!("missing required argument: --{ARG_API_BASE_URL}"))?;

        let parsed =
            Url::parse(&raw).with_context(|| format!("invalid --{ARG_API_BASE_URL}: {raw}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "invalid --{ARG_API_BASE_URL}: {raw} (expected http or https)"
            ));
        }

        Ok(Self {
            api_base_url: raw.trim_end_matches('/').to_string(),
            timeout_seconds: matches
                .get_one::<u64>(ARG_FETCH_TIMEOUT)
                .copied()
                .unwrap_or(10),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .short('a')
                .long(ARG_API_BASE_URL)
                .help("Base URL of the external auth/API backend, example: https://api.tld")
                .env("TOLLGATE_API_BASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_FETCH_TIMEOUT)
                .long(ARG_FETCH_TIMEOUT)
                .help("Timeout for requests to the backend, in seconds")
                .default_value("10")
                .env("TOLLGATE_FETCH_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
