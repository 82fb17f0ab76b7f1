//! News articles and their query field roles.

pub mod models;

pub use models::{CreateNews, NewsArticle, NewsStatus, UpdateNews};
