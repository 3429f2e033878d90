//! HTTP client for the external profile endpoint.

use reqwest::{Client, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use std::{future::Future, time::Duration};
use thiserror::Error;
use tracing::{debug, instrument};

use super::types::ProfileResponse;
use crate::APP_USER_AGENT;

pub const PROFILE_PATH: &str = "/api/profile";

#[derive(Debug, Error)]
pub enum ProfileError {
    /// Any non-2xx answer; the backend documents 401 for expired tokens.
    #[error("profile request rejected with status {status}")]
    AuthExpired { status: u16 },
    /// Transport failure or an undecodable body.
    #[error("{0}")]
    Transient(String),
}

/// Fetches the current user's profile with a bearer token.
pub trait ProfileFetcher: Send + Sync {
    fn fetch_profile(
        &self,
        token: &SecretString,
    ) -> impl Future<Output = Result<ProfileResponse, ProfileError>> + Send;
}

/// `reqwest` implementation talking to `{API_BASE}/api/profile`.
#[derive(Clone, Debug)]
pub struct HttpProfileFetcher {
    client: Client,
    profile_url: String,
}

impl HttpProfileFetcher {
    /// Build a fetcher with its own client and request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, api_base_url))
    }

    /// Build a fetcher sharing an existing client.
    #[must_use]
    pub fn with_client(client: Client, api_base_url: &str) -> Self {
        Self {
            client,
            profile_url: build_url_with_base(api_base_url, PROFILE_PATH),
        }
    }

    #[must_use]
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl ProfileFetcher for HttpProfileFetcher {
    #[instrument(skip(self, token), fields(url = %self.profile_url))]
    async fn fetch_profile(&self, token: &SecretString) -> Result<ProfileResponse, ProfileError> {
        let response = self
            .client
            .get(&self.profile_url)
            .bearer_auth(token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| ProfileError::Transient(format!("Unable to reach the server: {err}")))?;

        let status = response.status();
        debug!(status = status.as_u16(), "profile response");

        if !status.is_success() {
            return Err(ProfileError::AuthExpired {
                status: status.as_u16(),
            });
        }

        response
            .json::<ProfileResponse>()
            .await
            .map_err(|err| ProfileError::Transient(format!("Failed to decode response: {err}")))
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
