//! Dashboard view state machine.

use std::future::{Future, pending};
use tracing::{debug, error, info, warn};

use super::{
    client::{ProfileError, ProfileFetcher},
    navigator::Navigator,
    store::{TokenStore, read_token},
    types::UserProfile,
};
use crate::{TOKEN_KEY, paths};

pub const SESSION_EXPIRED_MESSAGE: &str = "Failed to fetch user profile or session expired.";
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching profile.";

/// Render state of the dashboard. `Loading` until the first resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Loading,
    /// `None` when the backend answered 2xx without a `user` object.
    Ready(Option<UserProfile>),
    Errored(String),
}

impl ViewState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Ready(profile) => profile.as_ref(),
            _ => None,
        }
    }

    /// HTML fragment for the current state.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Loading => "<p>Loading...</p>".to_string(),
            Self::Errored(message) => format!("<p>Error: {}</p>", escape_html(message)),
            Self::Ready(None) => dashboard_shell("<p>No user data available.</p>"),
            Self::Ready(Some(user)) => dashboard_shell(&format!(
                concat!(
                    "<div>",
                    "<h2>Welcome, {name}!</h2>",
                    "<p>Email: {email}</p>",
                    "<p>User ID: {id}</p>",
                    "<form method=\"post\" action=\"{logout}\">",
                    "<button type=\"submit\">Logout</button>",
                    "</form>",
                    "</div>"
                ),
                name = escape_html(&user.name),
                email = escape_html(&user.email),
                id = user.id,
                logout = paths::LOGOUT,
            )),
        }
    }
}

/// How an activation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// No stored token; navigation to `/login` was requested, no request sent.
    MissingToken,
    /// The fetch completed and the state is `Ready` or `Errored`.
    Settled,
    /// The view was torn down first; state and token are untouched.
    Cancelled,
}

/// Dashboard loader bound to an injected store, fetcher and navigator.
pub struct ProfileView<'a, S: ?Sized, F, N: ?Sized> {
    store: &'a S,
    fetcher: &'a F,
    navigator: &'a N,
    state: ViewState,
}

impl<'a, S, F, N> ProfileView<'a, S, F, N>
where
    S: TokenStore + ?Sized,
    F: ProfileFetcher,
    N: Navigator + ?Sized,
{
    #[must_use]
    pub fn new(store: &'a S, fetcher: &'a F, navigator: &'a N) -> Self {
        Self {
            store,
            fetcher,
            navigator,
            state: ViewState::Loading,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Load the profile once.
    pub async fn activate(&mut self) -> Activation {
        self.activate_until(pending::<()>()).await
    }

    /// Load the profile once, abandoning the in-flight request if `teardown`
    /// resolves first.
    pub async fn activate_until<T>(&mut self, teardown: T) -> Activation
    where
        T: Future<Output = ()>,
    {
        let Some(token) = read_token(self.store) else {
            info!("no stored token, redirecting to login");
            self.navigator.push(paths::LOGIN);
            return Activation::MissingToken;
        };

        let result = tokio::select! {
            biased;
            () = teardown => {
                debug!("profile view torn down before the fetch completed");
                return Activation::Cancelled;
            }
            result = self.fetcher.fetch_profile(&token) => result,
        };

        match result {
            Ok(response) => {
                self.state = ViewState::Ready(response.user);
            }
            Err(ProfileError::AuthExpired { status }) => {
                warn!(status, "profile request rejected, clearing stored token");
                self.store.remove(TOKEN_KEY);
                self.state = ViewState::Errored(SESSION_EXPIRED_MESSAGE.to_string());
                self.navigator.push(paths::LOGIN);
            }
            Err(err @ ProfileError::Transient(_)) => {
                error!("Profile fetch error: {err}");
                self.state = ViewState::Errored(FETCH_FAILED_MESSAGE.to_string());
            }
        }

        Activation::Settled
    }

    /// Drop the stored token and go to `/login`, whatever the current state.
    pub fn logout(&self) {
        logout(self.store, self.navigator);
    }
}

/// Client-local logout; the token is not invalidated remotely.
pub fn logout<S, N>(store: &S, navigator: &N)
where
    S: TokenStore + ?Sized,
    N: Navigator + ?Sized,
{
    store.remove(TOKEN_KEY);
    navigator.push(paths::LOGIN);
    info!("logged out");
}

fn dashboard_shell(content: &str) -> String {
    format!("<div class=\"dashboard\"><h1>Dashboard</h1>{content}</div>")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
