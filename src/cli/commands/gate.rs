use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{gate::DEFAULT_EXCLUSIONS, paths};

pub const ARG_PROTECTED_PATH: &str = "protected-path";
pub const ARG_EXCLUDED_PATH: &str = "excluded-path";

#[derive(Debug, Clone)]
pub struct Options {
    pub protected_paths: Vec<String>,
    pub excluded_paths: Vec<String>,
}

impl Options {
    /// Parse gatekeeper arguments from matches. Both lists have defaults.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let read_many = |id: &str| -> Vec<String> {
            matches
                .get_many::<String>(id)
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        };

        Self {
            protected_paths: read_many(ARG_PROTECTED_PATH),
            excluded_paths: read_many(ARG_EXCLUDED_PATH),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PROTECTED_PATH)
                .long(ARG_PROTECTED_PATH)
                .help("Path prefix that requires a token (repeat or comma-separate)")
                .env("TOLLGATE_PROTECTED_PATHS")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_values(paths::DEFAULT_PROTECTED),
        )
        .arg(
            Arg::new(ARG_EXCLUDED_PATH)
                .long(ARG_EXCLUDED_PATH)
                .help("Path prefix that bypasses the gatekeeper (repeat or comma-separate)")
                .env("TOLLGATE_EXCLUDED_PATHS")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_values(DEFAULT_EXCLUSIONS),
        )
}
