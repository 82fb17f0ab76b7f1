//! News API handlers.
//!
//! Reads are public; publishing, editing, and deleting require a login.
//! Fetching a single article records a view.

use axum::Json;
use axum::extract::Query as Params;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use arena::news::{CreateNews, NewsArticle, UpdateNews};
use arena::query::{Query, Queryable, RawQuery, execute, suggest, text_contains};

use super::AppState;
use super::error::ApiError;
use super::middleware::AuthUser;
use super::response::{
    CollectionEnvelope, ItemEnvelope, ListEnvelope, MutationEnvelope, SearchEnvelope, Sorting,
};

const DEFAULT_SUGGESTIONS: [&str; 4] = ["tournament", "registration", "update", "schedule"];

const QUICK_SEARCH_CAP: usize = 10;

/// Raw list-request parameters, validated through `Query::parse`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
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
pub struct NewsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickSearchParams {
    pub q: Option<String>,
}

impl NewsListParams {
    fn to_raw(&self) -> RawQuery {
        let mut filters = Vec::new();
        for (name, value) in [
            ("category", &self.category),
            ("author", &self.author),
            ("featured", &self.featured),
            ("status", &self.status),
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

    fn into_echo(self) -> NewsFilters {
        NewsFilters {
            search: self.search,
            category: self.category,
            author: self.author,
            featured: self.featured,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// `GET /api/news`
pub async fn list_news(
    State(state): State<AppState>,
    Params(params): Params<NewsListParams>,
) -> Result<Json<ListEnvelope<NewsArticle, NewsFilters>>, ApiError> {
    let query = Query::parse(NewsArticle::table(), params.to_raw())?;
    let articles = state.stores.news.list().await?;
    let result = execute(&articles, &query);

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

/// `GET /api/news/search?q=`
pub async fn quick_search(
    State(state): State<AppState>,
    Params(params): Params<QuickSearchParams>,
) -> Result<Json<SearchEnvelope<NewsArticle>>, ApiError> {
    let q = params.q.unwrap_or_default();
    if q.chars().count() < 2 {
        return Ok(Json(SearchEnvelope {
            success: true,
            data: Vec::new(),
            count: 0,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }));
    }

    let articles = state.stores.news.list().await?;
    let hits: Vec<&NewsArticle> = articles
        .iter()
        .filter(|n| {
            text_contains(&n.title, &q)
                || text_contains(&n.content, &q)
                || n.tags.iter().any(|tag| text_contains(tag, &q))
        })
        .collect();
    let count = hits.len();

    let candidates = articles
        .iter()
        .map(|n| n.category.as_str())
        .chain(articles.iter().flat_map(|n| n.tags.iter().map(String::as_str)));
    let suggestions = suggest(candidates, &q, 5);

    Ok(Json(SearchEnvelope {
        success: true,
        data: hits.into_iter().take(QUICK_SEARCH_CAP).cloned().collect(),
        count,
        suggestions,
    }))
}

/// `GET /api/news/featured`
pub async fn featured(
    State(state): State<AppState>,
) -> Result<Json<CollectionEnvelope<NewsArticle>>, ApiError> {
    let articles = state.stores.news.list().await?;
    let featured: Vec<NewsArticle> = articles.into_iter().filter(|n| n.featured).collect();
    Ok(Json(CollectionEnvelope::new(featured)))
}

/// `GET /api/news/categories`
///
/// Distinct categories in first-seen order.
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<ItemEnvelope<Vec<String>>>, ApiError> {
    let articles = state.stores.news.list().await?;
    let mut categories: Vec<String> = Vec::new();
    for article in &articles {
        if !categories.contains(&article.category) {
            categories.push(article.category.clone());
        }
    }
    Ok(Json(ItemEnvelope::new(categories)))
}

/// `GET /api/news/{id}`
///
/// Records a view on every fetch.
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemEnvelope<NewsArticle>>, ApiError> {
    let article = state
        .stores
        .news
        .get_and_record_view(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("News not found".to_string()))?;
    Ok(Json(ItemEnvelope::new(article)))
}

/// `POST /api/news`
///
/// Any authenticated user may publish; author fields come from the
/// caller's profile.
pub async fn create_news(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateNews>,
) -> Result<Json<MutationEnvelope<NewsArticle>>, ApiError> {
    let profile = state.auth.profile(&auth.id).await?;
    let article = NewsArticle::create(payload, profile.full_name, profile.id);
    let created = state.stores.news.insert(article).await?;

    Ok(Json(MutationEnvelope::new(
        "News created successfully",
        created,
    )))
}

/// `PUT /api/news/{id}`
pub async fn update_news(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<UpdateNews>,
) -> Result<Json<MutationEnvelope<NewsArticle>>, ApiError> {
    let updated = state
        .stores
        .news
        .update(&id, patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("News not found".to_string()))?;

    Ok(Json(MutationEnvelope::new(
        "News updated successfully",
        updated,
    )))
}

/// `DELETE /api/news/{id}`
pub async fn delete_news(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MutationEnvelope<NewsArticle>>, ApiError> {
    let deleted = state
        .stores
        .news
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("News not found".to_string()))?;

    Ok(Json(MutationEnvelope::new(
        "News deleted successfully",
        deleted,
    )))
}
