//! Tournament API handlers.
//!
//! List requests go through the shared query engine; the declarative
//! field table on [`Tournament`] decides what is searchable, filterable,
//! and sortable. Mutations require the organizer or admin role.

use axum::Json;
use axum::extract::{Path, State};
use axum::extract::Query as Params;
use serde::{Deserialize, Serialize};

use arena::query::{Query, Queryable, RawQuery, execute, suggest, text_contains};
use arena::tournament::{CreateTournament, Tournament, TournamentStatus, UpdateTournament};
use arena::user::Role;

use super::AppState;
use super::error::ApiError;
use super::middleware::AuthUser;
use super::response::{
    CollectionEnvelope, ItemEnvelope, ListEnvelope, MutationEnvelope, SearchEnvelope, Sorting,
};

/// Suggestions served when the quick-search query is too short.
const DEFAULT_SUGGESTIONS: [&str; 4] = ["League of Legends", "CS:GO", "Valorant", "Dota 2"];

/// Cap on quick-search hits.
const QUICK_SEARCH_CAP: usize = 10;

/// Raw list-request parameters, validated through `Query::parse`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListParams {
    pub search: Option<String>,
    pub game: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Echo of the filter parameters the caller supplied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickSearchParams {
    pub q: Option<String>,
}

impl TournamentListParams {
    fn to_raw(&self) -> RawQuery {
        let mut filters = Vec::new();
        for (name, value) in [
            ("game", &self.game),
            ("status", &self.status),
            ("category", &self.category),
            ("organizer", &self.organizer),
        ] {
            if let Some(value) = value {
                filters.push((name.to_string(), value.clone()));
            }
        }
        RawQuery {
            search: self.search.clone(),
            filters,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            page: self.page.clone(),
            limit: self.limit.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        }
    }

    fn into_echo(self) -> TournamentFilters {
        TournamentFilters {
            search: self.search,
            game: self.game,
            status: self.status,
            category: self.category,
            organizer: self.organizer,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// `GET /api/tournaments`
///
/// Full query surface: free-text search, game/status/category/organizer
/// filters, startDate range, sorting, pagination.
pub async fn list_tournaments(
    State(state): State<AppState>,
    Params(params): Params<TournamentListParams>,
) -> Result<Json<ListEnvelope<Tournament, TournamentFilters>>, ApiError> {
    let query = Query::parse(Tournament::table(), params.to_raw())?;
    let tournaments = state.stores.tournaments.list().await?;
    let result = execute(&tournaments, &query);

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

/// `GET /api/tournaments/search?q=`
///
/// Quick search over names, games, and tags. Queries shorter than two
/// characters return no matches, only the canned suggestions.
pub async fn quick_search(
    State(state): State<AppState>,
    Params(params): Params<QuickSearchParams>,
) -> Result<Json<SearchEnvelope<Tournament>>, ApiError> {
    let q = params.q.unwrap_or_default();
    if q.chars().count() < 2 {
        return Ok(Json(SearchEnvelope {
            success: true,
            data: Vec::new(),
            count: 0,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }));
    }

    let tournaments = state.stores.tournaments.list().await?;
    let hits: Vec<&Tournament> = tournaments
        .iter()
        .filter(|t| {
            text_contains(&t.name, &q)
                || text_contains(&t.game, &q)
                || t.tags.iter().any(|tag| text_contains(tag, &q))
        })
        .collect();
    let count = hits.len();

    let candidates = tournaments
        .iter()
        .map(|t| t.game.as_str())
        .chain(tournaments.iter().map(|t| t.category.as_str()))
        .chain(tournaments.iter().flat_map(|t| t.tags.iter().map(String::as_str)));
    let suggestions = suggest(candidates, &q, 5);

    Ok(Json(SearchEnvelope {
        success: true,
        data: hits.into_iter().take(QUICK_SEARCH_CAP).cloned().collect(),
        count,
        suggestions,
    }))
}

/// `GET /api/tournaments/upcoming`
pub async fn upcoming(
    State(state): State<AppState>,
) -> Result<Json<CollectionEnvelope<Tournament>>, ApiError> {
    by_status(state, TournamentStatus::Upcoming).await
}

/// `GET /api/tournaments/ongoing`
pub async fn ongoing(
    State(state): State<AppState>,
) -> Result<Json<CollectionEnvelope<Tournament>>, ApiError> {
    by_status(state, TournamentStatus::Ongoing).await
}

async fn by_status(
    state: AppState,
    status: TournamentStatus,
) -> Result<Json<CollectionEnvelope<Tournament>>, ApiError> {
    let tournaments = state.stores.tournaments.list().await?;
    let matching: Vec<Tournament> = tournaments
        .into_iter()
        .filter(|t| t.status == status)
        .collect();
    Ok(Json(CollectionEnvelope::new(matching)))
}

/// `GET /api/tournaments/{id}`
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemEnvelope<Tournament>>, ApiError> {
    let tournament = state
        .stores
        .tournaments
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;
    Ok(Json(ItemEnvelope::new(tournament)))
}

/// `POST /api/tournaments`
///
/// Requires the organizer or admin role. The organizer name is taken
/// from the caller's profile, never from the body.
pub async fn create_tournament(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTournament>,
) -> Result<Json<MutationEnvelope<Tournament>>, ApiError> {
    auth.require_role(&[Role::Organizer, Role::Admin])?;

    let profile = state.auth.profile(&auth.id).await?;
    let tournament = Tournament::create(payload, profile.full_name);
    let created = state.stores.tournaments.insert(tournament).await?;

    Ok(Json(MutationEnvelope::new(
        "Tournament created successfully",
        created,
    )))
}

/// `PUT /api/tournaments/{id}`
pub async fn update_tournament(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<UpdateTournament>,
) -> Result<Json<MutationEnvelope<Tournament>>, ApiError> {
    auth.require_role(&[Role::Organizer, Role::Admin])?;

    let updated = state
        .stores
        .tournaments
        .update(&id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;

    Ok(Json(MutationEnvelope::new(
        "Tournament updated successfully",
        updated,
    )))
}

/// `DELETE /api/tournaments/{id}`
pub async fn delete_tournament(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MutationEnvelope<Tournament>>, ApiError> {
    auth.require_role(&[Role::Organizer, Role::Admin])?;

    let deleted = state
        .stores
        .tournaments
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;

    Ok(Json(MutationEnvelope::new(
        "Tournament deleted successfully",
        deleted,
    )))
}
