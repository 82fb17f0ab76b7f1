//! User management API handlers. Admin only.

use axum::Json;
use axum::extract::Query as Params;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use arena::analytics::{UserAnalytics, user_analytics};
use arena::query::{Query, Queryable, RawQuery, execute};
use arena::user::{Role, User};

use super::AppState;
use super::error::ApiError;
use super::middleware::AuthUser;
use super::response::{ItemEnvelope, ListEnvelope, Sorting};

/// Raw list-request parameters, validated through `Query::parse`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Echo of the filter parameters the caller supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<String>,
}

impl UserListParams {
    fn to_raw(&self) -> RawQuery {
        let mut filters = Vec::new();
        if let Some(role) = &self.role {
            filters.push(("role".to_string(), role.clone()));
        }
        if let Some(is_active) = &self.is_active {
            filters.push(("isActive".to_string(), is_active.clone()));
        }
        RawQuery {
            search: self.search.clone(),
            filters,
            page: self.page.clone(),
            limit: self.limit.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            ..RawQuery::default()
        }
    }

    fn into_echo(self) -> UserFilters {
        UserFilters {
            search: self.search,
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// `GET /api/users`
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Params(params): Params<UserListParams>,
) -> Result<Json<ListEnvelope<User, UserFilters>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let query = Query::parse(User::table(), params.to_raw())?;
    let users = state.stores.users.list().await?;
    let result = execute(&users, &query);

    Ok(Json(ListEnvelope {
        success: true,
        data: result.data,
        pagination: result.pagination,
        filters: params.into_echo(),
        sorting: Sorting {
            sort_by: query.sort_by,
            sort_order: query.sort_order,
        },
    }))
}

/// `GET /api/users/stats`
pub async fn user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemEnvelope<UserAnalytics>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let users = state.stores.users.list().await?;
    Ok(Json(ItemEnvelope::new(user_analytics(&users))))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ItemEnvelope<User>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let user = state
        .stores
        .users
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(ItemEnvelope::new(user)))
}
