//! Authenticated-user extraction and role guards.
//!
//! Protected handlers take an [`AuthUser`] parameter; the extractor
//! validates the `Authorization: Bearer` access token against the
//! authentication manager and rejects with a `401` envelope before the
//! handler runs.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use arena::user::Role;

use super::AppState;
use super::error::ApiError;

/// The authenticated caller, decoded from the access token claims.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Reject unless the caller holds one of `roles`.
    pub fn require_role(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.contains(&self.role) {
            return Ok(());
        }
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        Err(ApiError::Forbidden(format!(
            "Access denied. Required role: {}",
            names.join(" or ")
        )))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError::Unauthorized("Access denied. No token provided.".to_string())
            })?;

        let claims = state
            .auth
            .verify_access_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token.".to_string()))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Hash the caller's User-Agent into a session fingerprint. Refresh
/// tokens are bound to it, so a stolen token replayed from a different
/// client shape is rejected.
pub fn device_fingerprint(headers: &axum::http::HeaderMap) -> String {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");
    let digest = Sha256::digest(user_agent.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn role_guard_accepts_listed_roles() {
        let user = AuthUser {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Organizer,
        };
        assert!(user.require_role(&[Role::Organizer, Role::Admin]).is_ok());
        assert!(matches!(
            user.require_role(&[Role::Admin]),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn fingerprint_is_stable_per_agent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("curl/8.0"));
        let first = device_fingerprint(&headers);
        let second = device_fingerprint(&headers);
        assert_eq!(first, second);

        headers.insert(USER_AGENT, HeaderValue::from_static("other/1.0"));
        assert_ne!(device_fingerprint(&headers), first);
    }
}
