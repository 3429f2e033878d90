//! Edge server: the gatekeeper middleware in front of the dashboard pages and
//! an `/api/*` forwarder to the external backend.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware::from_fn_with_state,
    routing::{any, get},
};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use ulid::Ulid;

use crate::{
    gate::{Gatekeeper, gate},
    paths,
    profile::HttpProfileFetcher,
};

pub(crate) mod handlers;

use handlers::{dashboard, health, pages, proxy};

/// State shared by the route handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    fetcher: HttpProfileFetcher,
    api_base_url: String,
}

impl AppState {
    /// Build the shared HTTP client and profile fetcher for `api_base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            fetcher: HttpProfileFetcher::with_client(client, api_base_url),
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn fetcher(&self) -> &HttpProfileFetcher {
        &self.fetcher
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        self.fetcher.client()
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

/// Build the router with the gatekeeper and request-id/trace layers installed.
#[must_use]
pub fn router(state: AppState, gatekeeper: Gatekeeper) -> Router {
    Router::new()
        .route(paths::HEALTH, get(health::health).options(health::health))
        .route(paths::LOGIN, get(pages::login))
        .route(paths::REGISTER, get(pages::register))
        .route(paths::DASHBOARD, get(dashboard::dashboard))
        .route(paths::LOGOUT, get(dashboard::logout).post(dashboard::logout))
        .route("/api/{*path}", any(proxy::forward))
        .with_state(state)
        .layer(from_fn_with_state(gatekeeper, gate))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Start the server and serve until Ctrl-C.
/// # Errors
/// Return error if failed to bind or serve
pub async fn new(port: u16, state: AppState, gatekeeper: Gatekeeper) -> Result<()> {
    info!(
        api_base_url = state.api_base_url(),
        protected = ?gatekeeper.policy().protected_prefixes(),
        excluded = ?gatekeeper.exclusions().entries(),
        "gatekeeper configured"
    );

    let app = router(state, gatekeeper);

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
