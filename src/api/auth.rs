//! Bearer authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use super::error::ApiErrorResponse;
use super::handlers::AppState;
use crate::domain::OwnerId;

/// The verified identity of the caller.
///
/// Extraction fails with the uniform 401 response when the `Authorization`
/// header is missing, uses another scheme, or carries an invalid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub OwnerId);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::debug!("Request without usable bearer credentials");
            ApiErrorResponse::unauthenticated()
        })?;

        let owner = state.verifier.verify(token)?;
        Ok(Self(owner))
    }
}

/// Returns the token of a `Bearer` authorization header. The scheme is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
