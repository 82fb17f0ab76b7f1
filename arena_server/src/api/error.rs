//! API error envelope.
//!
//! Every failure surfaces as `{ "success": false, "message": ... }` with
//! the matching status code: 400 validation, 401/403 authorization,
//! 404 miss, 500 internal.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use arena::auth::AuthError;
use arena::query::QueryError;
use arena::store::StoreError;

/// The API failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request parameters or body
    #[error("{0}")]
    Validation(String),

    /// Id lookup miss
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected failure in the store or elsewhere
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(message = %self, "Internal error");
        }
        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Store failure");
        ApiError::Internal("Internal server error".to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.client_message();
        match err {
            AuthError::EmailTaken | AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => {
                ApiError::Validation(message)
            }
            AuthError::Store(_) | AuthError::HashingFailed => ApiError::Internal(message),
            AuthError::UserNotFound
            | AuthError::InvalidPassword
            | AuthError::SessionExpired
            | AuthError::InvalidRefreshToken
            | AuthError::AccountInactive
            | AuthError::Jwt(_) => ApiError::Unauthorized(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_errors_classify() {
        assert!(matches!(
            ApiError::from(AuthError::EmailTaken),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidPassword),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::HashingFailed),
            ApiError::Internal(_)
        ));
    }
}
