//! Path matcher for requests that bypass the gatekeeper.

use regex::Regex;

/// Auth service endpoints, static assets, favicon and the health probe.
pub const DEFAULT_EXCLUSIONS: [&str; 6] = [
    "/api/auth",
    "/_next/static",
    "/_next/image",
    "/favicon.ico",
    "/static",
    "/health",
];

/// Compiled exclusion list. A path is excluded when it starts with any entry.
#[derive(Clone, Debug)]
pub struct Exclusions {
    entries: Vec<String>,
    pattern: Option<Regex>,
}

impl Default for Exclusions {
    fn default() -> Self {
        // The default entries are escaped literals and always compile.
        Self::new(DEFAULT_EXCLUSIONS).unwrap_or_else(|_| Self::none())
    }
}

impl Exclusions {
    /// Compile the entries into a single anchored alternation.
    ///
    /// # Errors
    /// Returns an error if the resulting pattern cannot be compiled.
    pub fn new<I, S>(entries: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().trim_start_matches('/').to_string())
            .filter(|entry| !entry.is_empty())
            .collect();

        if entries.is_empty() {
            return Ok(Self::none());
        }

        let alternation = entries
            .iter()
            .map(|entry| regex::escape(entry))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("^/(?:{alternation})"))?;

        Ok(Self {
            entries,
            pattern: Some(pattern),
        })
    }

    /// Exclude nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            entries: Vec::new(),
            pattern: None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(path))
    }
}
