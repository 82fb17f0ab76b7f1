//! Authentication API handlers.
//!
//! Registration logs the new account in immediately, so both endpoints
//! return the same token envelope. Refresh tokens rotate on every use
//! and are bound to a device fingerprint derived from the User-Agent.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use arena::auth::{LoginRequest, RegisterRequest};
use arena::user::User;

use super::AppState;
use super::error::ApiError;
use super::middleware::{AuthUser, device_fingerprint};
use super::response::ItemEnvelope;

/// Token envelope returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: User,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `POST /api/auth/register`
///
/// Create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = payload.email.clone();
    let password = payload.password.clone();

    state.auth.register(payload).await?;

    let (user, tokens) = state
        .auth
        .login(LoginRequest { email, password }, device_fingerprint(&headers))
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful",
        user,
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, tokens) = state
        .auth
        .login(payload, device_fingerprint(&headers))
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful",
        user,
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// `GET /api/auth/profile`
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemEnvelope<User>>, ApiError> {
    let user = state.auth.profile(&auth.id).await?;
    Ok(Json(ItemEnvelope::new(user)))
}

/// `POST /api/auth/logout`
///
/// Invalidates the presented refresh token.
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.logout(&payload.refresh_token).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Logout successful",
    }))
}

/// `POST /api/auth/refresh`
///
/// Rotate the refresh token and mint a new access token.
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let tokens = state
        .auth
        .refresh_token(payload.refresh_token, device_fingerprint(&headers))
        .await?;

    Ok(Json(RefreshResponse {
        success: true,
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}
