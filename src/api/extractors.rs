//! Custom Axum extractors.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::domain::Credentials;

/// Name of the session cookie accepted when no `Authorization` header is
/// present.
pub const SESSION_COOKIE: &str = "ouat";

/// Extracts caller [`Credentials`] from the request.
///
/// Reads `Authorization: Bearer <token>` first, then the [`SESSION_COOKIE`]
/// cookie. Never rejects: a request without either yields anonymous
/// credentials and the service decides whether that is acceptable.
impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(bearer_token(&parts.headers)
            .or_else(|| session_cookie(&parts.headers))
            .map_or_else(Credentials::anonymous, Credentials::bearer))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
