//! Swappable resource stores.
//!
//! The query engine and HTTP handlers depend only on these traits; the
//! concrete backend (in-memory collections or flat JSON files) is chosen
//! at startup and injected through [`Stores`]. No process-wide mutable
//! singletons: every handler reaches its collections through the handle
//! it was given.

pub mod errors;
pub mod json;
pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::news::{NewsArticle, UpdateNews};
use crate::tournament::{Tournament, UpdateTournament};
use crate::user::{StoredUser, User};

pub use errors::{StoreError, StoreResult};
pub use json::JsonStore;
pub use memory::MemoryStore;

/// Tournament collection access.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Snapshot of every tournament, in storage order.
    async fn list(&self) -> StoreResult<Vec<Tournament>>;
    async fn get(&self, id: &str) -> StoreResult<Option<Tournament>>;
    async fn insert(&self, tournament: Tournament) -> StoreResult<Tournament>;
    /// Apply a partial update; `None` when the id is unknown.
    async fn update(&self, id: &str, patch: UpdateTournament) -> StoreResult<Option<Tournament>>;
    /// Remove and return the record; `None` when the id is unknown.
    async fn delete(&self, id: &str) -> StoreResult<Option<Tournament>>;
}

/// News collection access.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<NewsArticle>>;
    async fn get(&self, id: &str) -> StoreResult<Option<NewsArticle>>;
    /// Fetch one article and record the view, returning the bumped count.
    async fn get_and_record_view(&self, id: &str) -> StoreResult<Option<NewsArticle>>;
    /// New articles go to the front of the collection.
    async fn insert(&self, article: NewsArticle) -> StoreResult<NewsArticle>;
    async fn update(&self, id: &str, patch: UpdateNews) -> StoreResult<Option<NewsArticle>>;
    async fn delete(&self, id: &str) -> StoreResult<Option<NewsArticle>>;
}

/// User account access.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Public profiles only; password hashes never leave the store here.
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn get(&self, id: &str) -> StoreResult<Option<User>>;
    /// Credential lookup for the authentication manager.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<StoredUser>>;
    async fn insert(&self, user: StoredUser) -> StoreResult<User>;
    async fn touch_last_login(&self, id: &str, when: DateTime<Utc>) -> StoreResult<()>;
}

/// The bundle of collection handles injected into the HTTP layer.
#[derive(Clone)]
pub struct Stores {
    pub tournaments: Arc<dyn TournamentStore>,
    pub news: Arc<dyn NewsStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// In-memory backend, optionally pre-populated with the demo data set.
    pub fn memory(seeded: bool) -> Self {
        let store = Arc::new(if seeded {
            MemoryStore::seeded()
        } else {
            MemoryStore::empty()
        });
        Stores {
            tournaments: store.clone(),
            news: store.clone(),
            users: store,
        }
    }

    /// Flat-file JSON backend rooted at `dir`. Missing collection files
    /// bootstrap from the demo data when `seed_if_missing` is set.
    pub async fn json(dir: &std::path::Path, seed_if_missing: bool) -> StoreResult<Self> {
        let store = Arc::new(JsonStore::open(dir, seed_if_missing).await?);
        Ok(Stores {
            tournaments: store.clone(),
            news: store.clone(),
            users: store,
        })
    }
}
