//! Flat-file JSON store backend.
//!
//! Each collection lives in its own file (`tournaments.json`, `news.json`,
//! `users.json`) under a data directory. The files are read once at open;
//! reads are served from the in-memory snapshot and every mutation rewrites
//! the owning file while the write lock is held, so a response always
//! reflects a single consistent snapshot.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::errors::StoreResult;
use super::seed;
use super::{NewsStore, TournamentStore, UserStore};
use crate::news::{NewsArticle, UpdateNews};
use crate::tournament::{Tournament, UpdateTournament};
use crate::user::{StoredUser, User};

const TOURNAMENTS_FILE: &str = "tournaments.json";
const NEWS_FILE: &str = "news.json";
const USERS_FILE: &str = "users.json";

/// Flat-file backend rooted at a data directory.
pub struct JsonStore {
    dir: PathBuf,
    tournaments: RwLock<Vec<Tournament>>,
    news: RwLock<Vec<NewsArticle>>,
    users: RwLock<Vec<StoredUser>>,
}

impl JsonStore {
    /// Open (and if needed create) the data directory, loading every
    /// collection file. Missing files start from the demo data when
    /// `seed_if_missing` is set, otherwise empty.
    pub async fn open(dir: &Path, seed_if_missing: bool) -> StoreResult<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let tournaments = load_or_init(
            &dir.join(TOURNAMENTS_FILE),
            seed_if_missing,
            seed::sample_tournaments,
        )
        .await?;
        let news = load_or_init(&dir.join(NEWS_FILE), seed_if_missing, seed::sample_news).await?;
        let users = load_or_init(&dir.join(USERS_FILE), seed_if_missing, Vec::new).await?;

        info!(
            "JSON store opened at {} ({} tournaments, {} news, {} users)",
            dir.display(),
            tournaments.len(),
            news.len(),
            users.len()
        );

        Ok(JsonStore {
            dir: dir.to_path_buf(),
            tournaments: RwLock::new(tournaments),
            news: RwLock::new(news),
            users: RwLock::new(users),
        })
    }

    async fn persist<T: Serialize>(&self, file: &str, records: &[T]) -> StoreResult<()> {
        let path = self.dir.join(file);
        let body = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&path, body).await?;
        debug!("Persisted {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// Read a collection file, or initialize it from `init` when absent.
async fn load_or_init<T, F>(path: &Path, seed_if_missing: bool, init: F) -> StoreResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let records = if seed_if_missing { init() } else { Vec::new() };
            let body = serde_json::to_vec_pretty(&records)?;
            tokio::fs::write(path, body).await?;
            Ok(records)
        }
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl TournamentStore for JsonStore {
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
        let mut tournaments = self.tournaments.write().await;
        tournaments.push(tournament.clone());
        self.persist(TOURNAMENTS_FILE, &tournaments).await?;
        Ok(tournament)
    }

    async fn update(&self, id: &str, patch: UpdateTournament) -> StoreResult<Option<Tournament>> {
        let mut tournaments = self.tournaments.write().await;
        let Some(tournament) = tournaments.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        patch.apply(tournament);
        let updated = tournament.clone();
        self.persist(TOURNAMENTS_FILE, &tournaments).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<Tournament>> {
        let mut tournaments = self.tournaments.write().await;
        let Some(pos) = tournaments.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = tournaments.remove(pos);
        self.persist(TOURNAMENTS_FILE, &tournaments).await?;
        Ok(Some(removed))
    }
}

#[async_trait]
impl NewsStore for JsonStore {
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
        let viewed = article.clone();
        self.persist(NEWS_FILE, &news).await?;
        Ok(Some(viewed))
    }

    async fn insert(&self, article: NewsArticle) -> StoreResult<NewsArticle> {
        let mut news = self.news.write().await;
        news.insert(0, article.clone());
        self.persist(NEWS_FILE, &news).await?;
        Ok(article)
    }

    async fn update(&self, id: &str, patch: UpdateNews) -> StoreResult<Option<NewsArticle>> {
        let mut news = self.news.write().await;
        let Some(article) = news.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        patch.apply(article);
        let updated = article.clone();
        self.persist(NEWS_FILE, &news).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<NewsArticle>> {
        let mut news = self.news.write().await;
        let Some(pos) = news.iter().position(|n| n.id == id) else {
            return Ok(None);
        };
        let removed = news.remove(pos);
        self.persist(NEWS_FILE, &news).await?;
        Ok(Some(removed))
    }
}

#[async_trait]
impl UserStore for JsonStore {
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
        let mut users = self.users.write().await;
        let profile = user.user.clone();
        users.push(user);
        self.persist(USERS_FILE, &users).await?;
        Ok(profile)
    }

    async fn touch_last_login(&self, id: &str, when: DateTime<Utc>) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.iter_mut().find(|stored| stored.user.id == id) {
            stored.user.last_login = Some(when);
            self.persist(USERS_FILE, &users).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::TournamentStatus;

    #[tokio::test]
    async fn open_seeds_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path(), true).await.unwrap();
        assert_eq!(TournamentStore::list(&store).await.unwrap().len(), 4);
        assert!(dir.path().join(TOURNAMENTS_FILE).exists());
        assert!(dir.path().join(NEWS_FILE).exists());
    }

    #[tokio::test]
    async fn open_without_seed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path(), false).await.unwrap();
        assert!(TournamentStore::list(&store).await.unwrap().is_empty());
        assert!(NewsStore::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonStore::open(dir.path(), true).await.unwrap();
            let patch = UpdateTournament {
                status: Some(TournamentStatus::Completed),
                ..UpdateTournament::default()
            };
            TournamentStore::update(&store, "2", patch).await.unwrap();
            NewsStore::delete(&store, "5").await.unwrap();
        }

        let reopened = JsonStore::open(dir.path(), true).await.unwrap();
        let tournament = TournamentStore::get(&reopened, "2").await.unwrap().unwrap();
        assert_eq!(tournament.status, TournamentStatus::Completed);
        assert_eq!(NewsStore::list(&reopened).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn view_counts_persist() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonStore::open(dir.path(), true).await.unwrap();
            store.get_and_record_view("1").await.unwrap();
        }
        let reopened = JsonStore::open(dir.path(), true).await.unwrap();
        let article = NewsStore::get(&reopened, "1").await.unwrap().unwrap();
        assert_eq!(article.views, 1251);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(TOURNAMENTS_FILE), b"not json")
            .await
            .unwrap();
        assert!(JsonStore::open(dir.path(), true).await.is_err());
    }
}
