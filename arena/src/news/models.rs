//! News article data models.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldTable, FieldValue, FilterableField, MatchKind, Queryable};

/// Placeholder image applied when a create payload names none.
pub const DEFAULT_IMAGE_URL: &str = "https://api.builder.io/api/v1/image/assets/TEMP/default.jpg";

/// Length of the auto-generated excerpt prefix.
const EXCERPT_LEN: usize = 150;

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    Published,
    Draft,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Published => "published",
            NewsStatus::Draft => "draft",
        }
    }
}

/// A news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub author_id: String,
    pub published_at: NaiveDate,
    pub featured: bool,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub views: u64,
    pub status: NewsStatus,
}

/// Payload for publishing an article. Author fields come from the
/// authenticated session, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub image_url: Option<String>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNews {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

impl NewsArticle {
    /// Build a new article from a create payload. A missing excerpt falls
    /// back to a truncated content prefix, matching the original service.
    pub fn create(payload: CreateNews, author: String, author_id: String) -> Self {
        let excerpt = payload
            .excerpt
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| truncated_excerpt(&payload.content));
        NewsArticle {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            content: payload.content,
            excerpt,
            author,
            author_id,
            published_at: Utc::now().date_naive(),
            featured: payload.featured,
            category: payload.category.unwrap_or_else(|| "general".to_string()),
            tags: payload.tags,
            image_url: payload
                .image_url
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            views: 0,
            status: NewsStatus::Published,
        }
    }
}

impl UpdateNews {
    /// Apply the present fields.
    pub fn apply(self, article: &mut NewsArticle) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(category) = self.category {
            article.category = category;
        }
        if let Some(tags) = self.tags {
            article.tags = tags;
        }
        if let Some(featured) = self.featured {
            article.featured = featured;
        }
        if let Some(image_url) = self.image_url {
            article.image_url = image_url;
        }
    }
}

fn truncated_excerpt(content: &str) -> String {
    if content.chars().count() <= EXCERPT_LEN {
        return content.to_string();
    }
    let prefix: String = content.chars().take(EXCERPT_LEN).collect();
    format!("{prefix}...")
}

const NEWS_TABLE: FieldTable = FieldTable {
    searchable: &["title", "content", "excerpt", "tags"],
    filterable: &[
        FilterableField {
            name: "category",
            matching: MatchKind::Exact,
        },
        FilterableField {
            name: "author",
            matching: MatchKind::Substring,
        },
        FilterableField {
            name: "featured",
            matching: MatchKind::Flag,
        },
        FilterableField {
            name: "status",
            matching: MatchKind::Exact,
        },
    ],
    date_field: Some("publishedAt"),
    sortable: &["title", "publishedAt", "views", "category"],
    default_sort: "publishedAt",
};

impl Queryable for NewsArticle {
    fn table() -> &'static FieldTable {
        &NEWS_TABLE
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some(FieldValue::Text(&self.title)),
            "content" => Some(FieldValue::Text(&self.content)),
            "excerpt" => Some(FieldValue::Text(&self.excerpt)),
            "author" => Some(FieldValue::Text(&self.author)),
            "authorId" => Some(FieldValue::Text(&self.author_id)),
            "publishedAt" => Some(FieldValue::Date(self.published_at)),
            "featured" => Some(FieldValue::Bool(self.featured)),
            "category" => Some(FieldValue::Text(&self.category)),
            "tags" => Some(FieldValue::Tags(&self.tags)),
            "imageUrl" => Some(FieldValue::Text(&self.image_url)),
            "views" => Some(FieldValue::Number(self.views as i64)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(content: &str) -> CreateNews {
        CreateNews {
            title: "Patch Notes".to_string(),
            content: content.to_string(),
            excerpt: None,
            category: None,
            tags: vec!["update".to_string()],
            featured: false,
            image_url: None,
        }
    }

    #[test]
    fn short_content_is_its_own_excerpt() {
        let article = NewsArticle::create(payload("Short body."), "Admin".to_string(), "1".to_string());
        assert_eq!(article.excerpt, "Short body.");
        assert_eq!(article.category, "general");
        assert_eq!(article.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(article.views, 0);
        assert_eq!(article.status, NewsStatus::Published);
    }

    #[test]
    fn long_content_gets_truncated_excerpt() {
        let long = "x".repeat(400);
        let article = NewsArticle::create(payload(&long), "Admin".to_string(), "1".to_string());
        assert_eq!(article.excerpt.chars().count(), 153);
        assert!(article.excerpt.ends_with("..."));
    }

    #[test]
    fn explicit_excerpt_wins() {
        let mut p = payload("Body text here.");
        p.excerpt = Some("Hand-written summary".to_string());
        let article = NewsArticle::create(p, "Admin".to_string(), "1".to_string());
        assert_eq!(article.excerpt, "Hand-written summary");
    }

    #[test]
    fn update_toggles_featured_only() {
        let mut article =
            NewsArticle::create(payload("Body."), "Admin".to_string(), "1".to_string());
        let patch = UpdateNews {
            featured: Some(true),
            ..UpdateNews::default()
        };
        patch.apply(&mut article);
        assert!(article.featured);
        assert_eq!(article.title, "Patch Notes");
    }
}
