//! HTTP API for the tournament/news content-management server.
//!
//! Built with Axum and Tower: CORS is permissive (demo deployment),
//! every request gets a correlation id, and protected handlers pull an
//! [`middleware::AuthUser`] out of the bearer token. Handlers stay thin;
//! the query engine and stores in the `arena` library do the work.
//!
//! # Endpoints
//!
//! ```text
//! GET  /api/health                    - Health check (public)
//! POST /api/auth/register             - Register and log in (public)
//! POST /api/auth/login                - Login (public)
//! GET  /api/auth/profile              - Current user (auth)
//! POST /api/auth/logout               - Invalidate refresh token (auth)
//! POST /api/auth/refresh              - Rotate tokens (public, token-bound)
//! GET  /api/tournaments               - List with query surface (public)
//! GET  /api/tournaments/search        - Quick search (public)
//! GET  /api/tournaments/upcoming      - Upcoming tournaments (public)
//! GET  /api/tournaments/ongoing       - Ongoing tournaments (public)
//! GET  /api/tournaments/{id}          - Single tournament (public)
//! POST /api/tournaments               - Create (organizer/admin)
//! PUT  /api/tournaments/{id}          - Update (organizer/admin)
//! DEL  /api/tournaments/{id}          - Delete (organizer/admin)
//! GET  /api/news                      - List with query surface (public)
//! GET  /api/news/search               - Quick search (public)
//! GET  /api/news/featured             - Featured articles (public)
//! GET  /api/news/categories           - Distinct categories (public)
//! GET  /api/news/{id}                 - Single article, counts a view (public)
//! POST /api/news                      - Publish (auth)
//! PUT  /api/news/{id}                 - Edit (auth)
//! DEL  /api/news/{id}                 - Delete (auth)
//! GET  /api/users                     - List users (admin)
//! GET  /api/users/stats               - User statistics (admin)
//! GET  /api/users/{id}                - Single user (admin)
//! GET  /api/analytics/news            - News statistics (admin)
//! GET  /api/analytics/tournaments     - Tournament statistics (admin)
//! GET  /api/admin/stats               - Dashboard aggregate (admin)
//! GET  /api/admin/status              - Backend status (admin)
//! ```

pub mod admin;
pub mod auth;
pub mod error;
pub mod middleware;
pub mod news;
pub mod request_id;
pub mod response;
pub mod tournaments;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tower_http::cors::CorsLayer;

use arena::auth::AuthManager;
use arena::store::Stores;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the store and auth handles are `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub auth: Arc<AuthManager>,
    /// Which store backend is serving (`memory` or `json`).
    pub backend_label: &'static str,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(stores: Stores, auth: Arc<AuthManager>, backend_label: &'static str) -> Self {
        AppState {
            stores,
            auth,
            backend_label,
            started_at: Utc::now(),
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", get(auth::profile))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/refresh", post(auth::refresh_token))
        .route(
            "/api/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/api/tournaments/search", get(tournaments::quick_search))
        .route("/api/tournaments/upcoming", get(tournaments::upcoming))
        .route("/api/tournaments/ongoing", get(tournaments::ongoing))
        .route(
            "/api/tournaments/{id}",
            get(tournaments::get_tournament)
                .put(tournaments::update_tournament)
                .delete(tournaments::delete_tournament),
        )
        .route("/api/news", get(news::list_news).post(news::create_news))
        .route("/api/news/search", get(news::quick_search))
        .route("/api/news/featured", get(news::featured))
        .route("/api/news/categories", get(news::categories))
        .route(
            "/api/news/{id}",
            get(news::get_news).put(news::update_news).delete(news::delete_news),
        )
        .route("/api/users", get(users::list_users))
        .route("/api/users/stats", get(users::user_stats))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/analytics/news", get(admin::news_stats))
        .route("/api/analytics/tournaments", get(admin::tournament_stats))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/status", get(admin::status))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Probes the store with a cheap read; an unreachable backend turns the
/// response into `503`.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_healthy = state.stores.tournaments.list().await.is_ok();

    let status_code = if store_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "success": store_healthy,
        "status": if store_healthy { "ok" } else { "unhealthy" },
        "message": "Server is running",
        "version": env!("CARGO_PKG_VERSION"),
        "store": {
            "backend": state.backend_label,
            "healthy": store_healthy,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
