//! Axum middleware that applies the gatekeeper decision.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    decision::{Decision, GatePolicy, decide},
    matcher::Exclusions,
    token::{bearer_header, extract_token},
};
use crate::paths;

/// Shared, immutable gatekeeper configuration.
#[derive(Clone, Debug, Default)]
pub struct Gatekeeper {
    policy: Arc<GatePolicy>,
    exclusions: Arc<Exclusions>,
}

impl Gatekeeper {
    #[must_use]
    pub fn new(policy: GatePolicy, exclusions: Exclusions) -> Self {
        Self {
            policy: Arc::new(policy),
            exclusions: Arc::new(exclusions),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    #[must_use]
    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }
}

/// Gatekeeper middleware, install with `axum::middleware::from_fn_with_state`.
pub async fn gate(
    State(gatekeeper): State<Gatekeeper>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if gatekeeper.exclusions.is_excluded(&path) {
        return next.run(request).await;
    }

    let token = extract_token(request.headers());

    match decide(&gatekeeper.policy, &path, token.is_some()) {
        Decision::RedirectToDashboard => {
            debug!(path, "token present on auth-entry page, redirecting");
            Redirect::temporary(paths::DASHBOARD).into_response()
        }
        Decision::RedirectToLogin => {
            debug!(path, "no token for protected path, redirecting");
            Redirect::temporary(paths::LOGIN).into_response()
        }
        Decision::Forward => next.run(request).await,
        Decision::ForwardWithAuthorization => {
            if let Some(token) = token {
                match bearer_header(&token) {
                    Ok(value) => {
                        request.headers_mut().insert(AUTHORIZATION, value);
                    }
                    Err(err) => {
                        warn!(path, "token is not a valid header value, forwarding as-is: {err}");
                    }
                }
            }
            next.run(request).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{
            HeaderMap, Request, StatusCode,
            header::{COOKIE, LOCATION},
        },
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;

    async fn echo_authorization(headers: HeaderMap) -> String {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("none")
            .to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/login", get(|| async { "login" }))
            .route("/api/auth/login", get(|| async { "auth" }))
            .route("/api/{*rest}", get(echo_authorization))
            .route("/", get(|| async { "home" }))
            .layer(from_fn_with_state(Gatekeeper::default(), gate))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_to_login() {
        let request = Request::get("/dashboard").body(Body::empty()).unwrap();
        let (status, location, _) = send(request).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/login"));
    }

    #[tokio::test]
    async fn signed_in_login_redirects_to_dashboard() {
        let request = Request::get("/login")
            .header(COOKIE, "jwt_token=abc")
            .body(Body::empty())
            .unwrap();
        let (status, location, _) = send(request).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn signed_in_dashboard_is_forwarded() {
        let request = Request::get("/dashboard")
            .header(AUTHORIZATION, "Bearer abc")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "dashboard");
    }

    #[tokio::test]
    async fn cookie_token_is_injected_into_api_requests() {
        let request = Request::get("/api/orders")
            .header(COOKIE, "jwt_token=cookie-token")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Bearer cookie-token");
    }

    #[tokio::test]
    async fn raw_header_token_is_normalized() {
        let request = Request::get("/api/orders")
            .header(AUTHORIZATION, "raw-token")
            .body(Body::empty())
            .unwrap();
        let (_, _, body) = send(request).await;
        assert_eq!(body, "Bearer raw-token");
    }

    #[tokio::test]
    async fn anonymous_api_request_is_untouched() {
        let request = Request::get("/api/orders").body(Body::empty()).unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "none");
    }

    #[tokio::test]
    async fn excluded_paths_bypass_the_gatekeeper() {
        // /api/auth is excluded, so the header is not normalized
        let request = Request::get("/api/auth/login")
            .header(COOKIE, "jwt_token=abc")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "auth");
    }

    #[tokio::test]
    async fn other_paths_are_forwarded() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, _, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "home");
    }
}
