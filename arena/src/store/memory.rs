//! In-memory store backend.
//!
//! Collections live in `RwLock`-guarded vectors; concurrent writers
//! serialize through the lock, so two simultaneous creates cannot
//! interleave a partial state. This backend doubles as the mock dataset
//! for demos and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::errors::StoreResult;
use super::seed;
use super::{NewsStore, TournamentStore, UserStore};
use crate::news::{NewsArticle, UpdateNews};
use crate::tournament::{Tournament, UpdateTournament};
use crate::user::{StoredUser, User};

/// Mock-database backend holding every collection in process memory.
pub struct MemoryStore {
    tournaments: RwLock<Vec<Tournament>>,
    news: RwLock<Vec<NewsArticle>>,
    users: RwLock<Vec<StoredUser>>,
}

impl MemoryStore {
    /// Empty collections.
    pub fn empty() -> Self {
        MemoryStore {
            tournaments: RwLock::new(Vec::new()),
            news: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
        }
    }

    /// Collections pre-populated with the demo data set.
    pub fn seeded() -> Self {
        MemoryStore {
            tournaments: RwLock::new(seed::sample_tournaments()),
            news: RwLock::new(seed::sample_news()),
            users: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Tournament>> {
        Ok(self.tournaments.read().await.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Tournament>> {
        Ok(self
            .tournaments
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn insert(&self, tournament: Tournament) -> StoreResult<Tournament> {
        self.tournaments.write().await.push(tournament.clone());
        Ok(tournament)
    }

    async fn update(&self, id: &str, patch: UpdateTournament) -> StoreResult<Option<Tournament>> {
        let mut tournaments = self.tournaments.write().await;
        let Some(tournament) = tournaments.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        patch.apply(tournament);
        Ok(Some(tournament.clone()))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Tournament>> {
        let mut tournaments = self.tournaments.write().await;
        let Some(pos) = tournaments.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        Ok(Some(tournaments.remove(pos)))
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<NewsArticle>> {
        Ok(self.news.read().await.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<NewsArticle>> {
        Ok(self.news.read().await.iter().find(|n| n.id == id).cloned())
    }

    async fn get_and_record_view(&self, id: &str) -> StoreResult<Option<NewsArticle>> {
        let mut news = self.news.write().await;
        let Some(article) = news.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        article.views += 1;
        Ok(Some(article.clone()))
    }

    async fn insert(&self, article: NewsArticle) -> StoreResult<NewsArticle> {
        self.news.write().await.insert(0, article.clone());
        Ok(article)
    }

    async fn update(&self, id: &str, patch: UpdateNews) -> StoreResult<Option<NewsArticle>> {
        let mut news = self.news.write().await;
        let Some(article) = news.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        patch.apply(article);
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<NewsArticle>> {
        let mut news = self.news.write().await;
        let Some(pos) = news.iter().position(|n| n.id == id) else {
            return Ok(None);
        };
        Ok(Some(news.remove(pos)))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|stored| stored.user.id == id)
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<StoredUser>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|stored| stored.user.email == email)
            .cloned())
    }

    async fn insert(&self, user: StoredUser) -> StoreResult<User> {
        let profile = user.user.clone();
        self.users.write().await.push(user);
        Ok(profile)
    }

    async fn touch_last_login(&self, id: &str, when: DateTime<Utc>) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.iter_mut().find(|stored| stored.user.id == id) {
            stored.user.last_login = Some(when);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::CreateNews;
    use crate::tournament::TournamentStatus;

    #[tokio::test]
    async fn seeded_collections_match_demo_set() {
        let store = MemoryStore::seeded();
        assert_eq!(TournamentStore::list(&store).await.unwrap().len(), 4);
        assert_eq!(NewsStore::list(&store).await.unwrap().len(), 5);
        assert!(UserStore::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tournament_update_and_delete_roundtrip() {
        let store = MemoryStore::seeded();
        let patch = UpdateTournament {
            status: Some(TournamentStatus::Completed),
            ..UpdateTournament::default()
        };
        let updated = TournamentStore::update(&store, "1", patch).await.unwrap();
        assert_eq!(updated.unwrap().status, TournamentStatus::Completed);

        let deleted = TournamentStore::delete(&store, "1").await.unwrap();
        assert!(deleted.is_some());
        assert!(TournamentStore::get(&store, "1").await.unwrap().is_none());
        assert!(TournamentStore::delete(&store, "1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn view_counter_increments() {
        let store = MemoryStore::seeded();
        let first = store.get_and_record_view("1").await.unwrap().unwrap();
        let second = store.get_and_record_view("1").await.unwrap().unwrap();
        assert_eq!(second.views, first.views + 1);
    }

    #[tokio::test]
    async fn news_insert_prepends() {
        let store = MemoryStore::seeded();
        let article = NewsArticle::create(
            CreateNews {
                title: "Fresh".to_string(),
                content: "Body".to_string(),
                excerpt: None,
                category: None,
                tags: Vec::new(),
                featured: false,
                image_url: None,
            },
            "Admin".to_string(),
            "1".to_string(),
        );
        NewsStore::insert(&store, article.clone()).await.unwrap();
        let all = NewsStore::list(&store).await.unwrap();
        assert_eq!(all[0].id, article.id);
    }

    #[tokio::test]
    async fn missing_ids_are_none_not_errors() {
        let store = MemoryStore::empty();
        assert!(TournamentStore::get(&store, "nope").await.unwrap().is_none());
        assert!(NewsStore::get(&store, "nope").await.unwrap().is_none());
        assert!(UserStore::get(&store, "nope").await.unwrap().is_none());
    }
}
