//! Admin analytics and status handlers. Admin only.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use arena::analytics::{
    NewsAnalytics, TournamentAnalytics, news_analytics, tournament_analytics, user_analytics,
};
use arena::user::Role;

use super::AppState;
use super::error::ApiError;
use super::middleware::AuthUser;
use super::response::ItemEnvelope;

/// `GET /api/analytics/news`
pub async fn news_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemEnvelope<NewsAnalytics>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let articles = state.stores.news.list().await?;
    Ok(Json(ItemEnvelope::new(news_analytics(&articles))))
}

/// `GET /api/analytics/tournaments`
pub async fn tournament_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemEnvelope<TournamentAnalytics>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let tournaments = state.stores.tournaments.list().await?;
    Ok(Json(ItemEnvelope::new(tournament_analytics(&tournaments))))
}

/// `GET /api/admin/stats`
///
/// Cross-collection dashboard aggregate.
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let tournaments = state.stores.tournaments.list().await?;
    let articles = state.stores.news.list().await?;
    let users = state.stores.users.list().await?;

    let tournament_stats = tournament_analytics(&tournaments);
    let news_stats = news_analytics(&articles);
    let user_stats = user_analytics(&users);

    Ok(Json(json!({
        "success": true,
        "data": {
            "users": {
                "total": user_stats.total_users,
                "active": user_stats.active_users,
                "inactive": user_stats.inactive_users,
                "roles": user_stats.roles,
            },
            "tournaments": {
                "total": tournament_stats.total_tournaments,
                "ongoing": tournament_stats.ongoing_tournaments,
                "upcoming": tournament_stats.upcoming_tournaments,
                "completed": tournament_stats.completed_tournaments,
            },
            "news": {
                "total": news_stats.total_news,
                "featured": news_stats.featured_news,
                "totalViews": news_stats.total_views,
            },
        },
    })))
}

/// `GET /api/admin/status`
///
/// Backend identity, uptime, and collection sizes.
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let tournaments = state.stores.tournaments.list().await?.len();
    let news = state.stores.news.list().await?.len();
    let users = state.stores.users.list().await?.len();

    Ok(Json(json!({
        "success": true,
        "data": {
            "backend": state.backend_label,
            "uptimeSeconds": (chrono::Utc::now() - state.started_at).num_seconds(),
            "collections": {
                "tournaments": tournaments,
                "news": news,
                "users": users,
            },
        },
    })))
}
