//! Forwarder for `/api/*` to the external backend. The gatekeeper has already
//! normalized the credential into the `Authorization` header by the time a
//! request gets here.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{
        HeaderMap, StatusCode,
        header::{CONNECTION, CONTENT_LENGTH, HOST, TE, TRAILER, TRANSFER_ENCODING, UPGRADE},
        uri::PathAndQuery,
    },
    response::{IntoResponse, Response},
};
use tracing::{debug, error, instrument, warn};

use crate::api::AppState;
use crate::profile::build_url_with_base;

/// Largest request body forwarded upstream.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in [CONNECTION, CONTENT_LENGTH, HOST, TE, TRAILER, TRANSFER_ENCODING, UPGRADE] {
        headers.remove(name);
    }
}

#[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), PathAndQuery::as_str);
    let url = build_url_with_base(state.api_base_url(), path_and_query);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(err) => {
            warn!("Failed to read request body: {err}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);

    let upstream = state
        .client()
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(err) => {
            error!("Upstream request failed: {err}");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);
    debug!(status = status.as_u16(), "upstream response");

    match upstream.bytes().await {
        Ok(bytes) => (status, headers, bytes).into_response(),
        Err(err) => {
            error!("Failed to read upstream body: {err}");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
