pub mod dashboard;
pub mod health;
pub mod pages;
pub mod proxy;

use axum::http::HeaderValue;

use crate::TOKEN_KEY;

/// Expires the token cookie on the client.
pub(crate) fn clear_token_cookie() -> HeaderValue {
    // TOKEN_KEY is ASCII, so the value is always a valid header.
    HeaderValue::from_str(&format!("{TOKEN_KEY}=; Path=/; Max-Age=0; SameSite=Lax"))
        .unwrap_or_else(|_| HeaderValue::from_static("jwt_token=; Path=/; Max-Age=0"))
}

/// Wrap a body fragment in a minimal HTML document.
pub(crate) fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>{body}</body></html>"
    )
}
