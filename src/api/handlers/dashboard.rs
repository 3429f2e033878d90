//! Dashboard and logout routes.
//!
//! The browser-side token store is the `jwt_token` cookie, so each request gets
//! a fresh [`MemoryTokenStore`] seeded from it. When the view removes the
//! token, the response expires the cookie; when the view navigates, the
//! response is a redirect.

use axum::{
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;

use super::{clear_token_cookie, page};
use crate::{
    TOKEN_KEY,
    api::AppState,
    gate::extract_token,
    paths,
    profile::{self, MemoryTokenStore, PendingNavigation, ProfileView, TokenStore},
};

fn seeded_store(headers: &HeaderMap) -> MemoryTokenStore {
    let store = MemoryTokenStore::new();
    if let Some(token) = extract_token(headers) {
        store.set(TOKEN_KEY, token.expose_secret().to_string());
    }
    store
}

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let store = seeded_store(&headers);
    let had_token = store.contains(TOKEN_KEY);
    let navigation = PendingNavigation::new();

    let mut view = ProfileView::new(&store, state.fetcher(), &navigation);
    view.activate().await;

    let mut response = match navigation.take() {
        Some(target) => Redirect::to(&target).into_response(),
        None => Html(page("Dashboard", &view.state().render())).into_response(),
    };

    if had_token && !store.contains(TOKEN_KEY) {
        response
            .headers_mut()
            .append(SET_COOKIE, clear_token_cookie());
    }

    response
}

pub async fn logout(headers: HeaderMap) -> Response {
    let store = seeded_store(&headers);
    let navigation = PendingNavigation::new();

    profile::logout(&store, &navigation);

    let target = navigation
        .take()
        .unwrap_or_else(|| paths::LOGIN.to_string());
    let mut response = Redirect::to(&target).into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, clear_token_cookie());
    response
}
