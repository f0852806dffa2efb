//! Bearer token verification.
//!
//! Tokens are HS256 JWTs signed with a shared secret and issued elsewhere.
//! Verification yields the token subject as the caller's [`OwnerId`]; every
//! failure collapses into [`AuthError::Unauthenticated`].

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::OwnerId;

/// Authentication failure. The cause is logged, never returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The token is missing, malformed, expired, or signed with another key.
    #[error("Not authenticated")]
    Unauthenticated,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TokenVerifier")
            .field("algorithm", &Algorithm::HS256)
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Creates a verifier for HS256 tokens signed with `secret`.
    ///
    /// `exp` and `sub` are required. When `issuer` is given, `iss` is required
    /// and must match it.
    #[must_use]
    pub fn new(secret: &[u8], issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            validation.set_issuer(&[issuer]);
        } else {
            validation.set_required_spec_claims(&["exp", "sub"]);
        }

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verifies the token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthenticated` on any verification failure,
    /// including a subject that is empty or too long to be an owner id.
    pub fn verify(&self, token: &str) -> Result<OwnerId, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|error| {
            tracing::debug!(error = %error, "Rejected bearer token");
            AuthError::Unauthenticated
        })?;

        OwnerId::parse(data.claims.sub).ok_or_else(|| {
            tracing::debug!("Rejected bearer token with unusable subject");
            AuthError::Unauthenticated
        })
    }
}
