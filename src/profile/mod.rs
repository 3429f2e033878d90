//! Profile view loader for the dashboard page.
//!
//! Flow Overview: read the token from the injected [`TokenStore`]; without one,
//! navigate to `/login` and skip the network entirely. With one, issue a single
//! `GET {API_BASE}/api/profile` and settle into `Ready` or `Errored`.
//!
//! Error kinds:
//! - **Auth expired** (any non-2xx): the stored token is removed and the user is
//!   sent to `/login`.
//! - **Transient** (transport or decode failure): a message is shown and the
//!   token is kept.
//!
//! Nothing is retried. The fetch is tied to the view's lifetime through
//! [`ProfileView::activate_until`] so a torn-down view never receives a late
//! completion.

mod client;
mod navigator;
mod store;
mod types;
mod view;

pub(crate) use client::build_url_with_base;
pub use client::{HttpProfileFetcher, PROFILE_PATH, ProfileError, ProfileFetcher};
pub use navigator::{Navigator, PendingNavigation};
pub use store::{MemoryTokenStore, TokenStore, read_token};
pub use types::{ProfileResponse, UserProfile};
pub use view::{
    Activation, FETCH_FAILED_MESSAGE, ProfileView, SESSION_EXPIRED_MESSAGE, ViewState, logout,
};
