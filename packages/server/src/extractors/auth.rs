use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::identity::Identity;
use crate::utils::jwt::Claims;

/// Caller authenticated by an `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. The token is
/// checked against the identity provider's keys, audience and issuer.
pub struct AuthUser {
    /// Subject id (`sub` claim).
    pub subject: String,
    pub claims: Claims,
}

impl AuthUser {
    /// Profile fields carried by the token, for the identity bridge.
    pub fn identity(&self, audience: &str) -> Identity {
        Identity {
            subject: self.subject.clone(),
            email: self.claims.profile_claim(audience, "email"),
            name: self.claims.profile_claim(audience, "name"),
        }
    }

    /// Returns `Err(PermissionDenied)` when `enforce` is on and the caller is
    /// not `owner`. With `enforce` off any authenticated caller passes.
    pub fn require_owner(&self, owner: &str, enforce: bool) -> Result<(), AppError> {
        if !enforce || self.subject == owner {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::TokenInvalid)?;

        let claims = state.verifier.verify(token).await?;

        Ok(AuthUser {
            subject: claims.sub.clone(),
            claims,
        })
    }
}
