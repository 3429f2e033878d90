//! # Tollgate (Edge Gatekeeper & Profile Dashboard)
//!
//! `tollgate` sits in front of a token-based web front-end. It decides, per
//! request, whether to redirect, forward, or forward with an injected bearer
//! credential, and it serves the dashboard page that loads the signed-in
//! user's profile from an external authentication backend.
//!
//! ## Trust Boundary
//!
//! The gatekeeper only checks that a token is *present*. Any non-empty string
//! counts as "signed in" at this layer. Token validity is decided by the
//! external backend and is only observed when the dashboard fetches the
//! profile (a non-2xx answer clears the token and sends the user to `/login`).
//! Every other protected route is guarded by presence alone.
//!
//! ## Token Sources
//!
//! - Cookie `jwt_token` (checked first).
//! - `Authorization: Bearer <token>` header (fallback).
//!
//! Tokens are wrapped in `secrecy::SecretString` as soon as they are read and
//! must never be logged.

pub mod api;
pub mod cli;
pub mod gate;
pub mod paths;
pub mod profile;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Storage key and cookie name holding the bearer token.
pub const TOKEN_KEY: &str = "jwt_token";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
