//! Token lookup for incoming requests.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{AUTHORIZATION, COOKIE, InvalidHeaderValue},
};
use secrecy::{ExposeSecret, SecretString};

use crate::TOKEN_KEY;

/// Read the bearer token from the `jwt_token` cookie, falling back to the
/// `Authorization` header. Empty values count as absent.
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<SecretString> {
    cookie_token(headers)
        .or_else(|| header_token(headers))
        .map(SecretString::from)
}

/// Build a sensitive `Authorization: Bearer <token>` header value.
///
/// # Errors
/// Returns an error if the token contains bytes that are not valid in a header.
pub fn bearer_header(token: &SecretString) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
    value.set_sensitive(true);
    Ok(value)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((key, val)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == TOKEN_KEY {
                let val = val.trim();
                if !val.is_empty() {
                    return Some(val.to_string());
                }
            }
        }
    }
    None
}

// A header without the `Bearer` scheme is taken verbatim.
fn header_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = match trimmed.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim(),
        // "Bearer " with nothing after it, once trimmed
        _ if trimmed.eq_ignore_ascii_case("bearer") => "",
        _ => trimmed,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    fn exposed(token: Option<SecretString>) -> Option<String> {
        token.map(|t| t.expose_secret().to_string())
    }

    #[test]
    fn cookie_token_is_found_among_other_cookies() {
        let map = headers(&[("cookie", "theme=dark; jwt_token=abc123; lang=en")]);
        assert_eq!(exposed(extract_token(&map)), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_wins_over_header() {
        let map = headers(&[
            ("cookie", "jwt_token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(exposed(extract_token(&map)), Some("from-cookie".to_string()));
    }

    #[test]
    fn header_is_used_when_cookie_is_missing_or_empty() {
        let map = headers(&[
            ("cookie", "jwt_token=; theme=dark"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(exposed(extract_token(&map)), Some("from-header".to_string()));
    }

    #[test]
    fn header_without_scheme_is_taken_verbatim() {
        let map = headers(&[("authorization", "raw-token")]);
        assert_eq!(exposed(extract_token(&map)), Some("raw-token".to_string()));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let map = headers(&[("authorization", "BEARER shouty")]);
        assert_eq!(exposed(extract_token(&map)), Some("shouty".to_string()));
    }

    #[test]
    fn empty_bearer_is_absent() {
        let map = headers(&[("authorization", "Bearer ")]);
        assert!(extract_token(&map).is_none());
        assert!(extract_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn malformed_cookie_pairs_are_skipped() {
        let map = headers(&[("cookie", "garbage; jwt_token=ok")]);
        assert_eq!(exposed(extract_token(&map)), Some("ok".to_string()));
    }

    #[test]
    fn bearer_header_is_sensitive() {
        let value = bearer_header(&SecretString::from("tok".to_string())).unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer tok");
        assert!(value.is_sensitive());
    }
}
