//! Aggregate statistics over resource collections.
//!
//! Pure functions; the HTTP layer fetches a snapshot from the store and
//! hands it here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::news::NewsArticle;
use crate::tournament::{Tournament, TournamentStatus};
use crate::user::{Role, User};

/// News collection statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsAnalytics {
    pub total_news: u64,
    pub total_views: u64,
    pub featured_news: u64,
    pub average_views: u64,
    pub categories_count: BTreeMap<String, u64>,
    pub recent_news: Vec<NewsArticle>,
}

/// Tournament collection statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentAnalytics {
    pub total_tournaments: u64,
    pub ongoing_tournaments: u64,
    pub upcoming_tournaments: u64,
    pub completed_tournaments: u64,
    pub total_participants: u64,
    pub average_participants: u64,
}

/// User account statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub roles: BTreeMap<String, u64>,
}

/// Compute news statistics. `recent_news` holds the five most recently
/// published articles.
pub fn news_analytics(articles: &[NewsArticle]) -> NewsAnalytics {
    let total_news = articles.len() as u64;
    let total_views: u64 = articles.iter().map(|a| a.views).sum();
    let featured_news = articles.iter().filter(|a| a.featured).count() as u64;

    let mut categories_count = BTreeMap::new();
    for article in articles {
        *categories_count.entry(article.category.clone()).or_insert(0) += 1;
    }

    let mut recent: Vec<&NewsArticle> = articles.iter().collect();
    recent.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(a.id.cmp(&b.id)));
    let recent_news = recent.into_iter().take(5).cloned().collect();

    NewsAnalytics {
        total_news,
        total_views,
        featured_news,
        average_views: rounded_average(total_views, total_news),
        categories_count,
        recent_news,
    }
}

/// Compute tournament statistics.
pub fn tournament_analytics(tournaments: &[Tournament]) -> TournamentAnalytics {
    let count_status = |status: TournamentStatus| {
        tournaments.iter().filter(|t| t.status == status).count() as u64
    };
    let total_tournaments = tournaments.len() as u64;
    let total_participants: u64 = tournaments.iter().map(|t| u64::from(t.participants)).sum();

    TournamentAnalytics {
        total_tournaments,
        ongoing_tournaments: count_status(TournamentStatus::Ongoing),
        upcoming_tournaments: count_status(TournamentStatus::Upcoming),
        completed_tournaments: count_status(TournamentStatus::Completed),
        total_participants,
        average_participants: rounded_average(total_participants, total_tournaments),
    }
}

/// Compute user statistics.
pub fn user_analytics(users: &[User]) -> UserAnalytics {
    let total_users = users.len() as u64;
    let active_users = users.iter().filter(|u| u.is_active).count() as u64;

    let mut roles = BTreeMap::new();
    for role in [Role::User, Role::Organizer, Role::Admin] {
        roles.insert(
            role.as_str().to_string(),
            users.iter().filter(|u| u.role == role).count() as u64,
        );
    }

    UserAnalytics {
        total_users,
        active_users,
        inactive_users: total_users - active_users,
        roles,
    }
}

/// Nearest-integer average; an empty collection averages to zero.
fn rounded_average(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (total + count / 2) / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use uuid::Uuid;

    #[test]
    fn news_totals_match_seed() {
        let stats = news_analytics(&seed::sample_news());
        assert_eq!(stats.total_news, 5);
        assert_eq!(stats.total_views, 1250 + 892 + 2100 + 3250 + 450);
        assert_eq!(stats.featured_news, 2);
        assert_eq!(stats.categories_count["announcement"], 2);
        assert_eq!(stats.recent_news.len(), 5);
        // Most recently published first.
        assert_eq!(stats.recent_news[0].id, "5");
    }

    #[test]
    fn tournament_totals_match_seed() {
        let stats = tournament_analytics(&seed::sample_tournaments());
        assert_eq!(stats.total_tournaments, 4);
        assert_eq!(stats.ongoing_tournaments, 1);
        assert_eq!(stats.upcoming_tournaments, 2);
        assert_eq!(stats.completed_tournaments, 1);
        assert_eq!(stats.total_participants, 61);
        assert_eq!(stats.average_participants, 15);
    }

    #[test]
    fn empty_collections_average_zero() {
        let stats = news_analytics(&[]);
        assert_eq!(stats.average_views, 0);
        let stats = tournament_analytics(&[]);
        assert_eq!(stats.average_participants, 0);
    }

    #[test]
    fn user_roles_are_counted() {
        use chrono::Utc;
        let mk = |role, active| User {
            id: Uuid::new_v4().to_string(),
            email: "a@b.com".to_string(),
            full_name: "A".to_string(),
            role,
            is_active: active,
            created_at: Utc::now(),
            last_login: None,
        };
        let users = vec![
            mk(Role::User, true),
            mk(Role::User, false),
            mk(Role::Admin, true),
        ];
        let stats = user_analytics(&users);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.inactive_users, 1);
        assert_eq!(stats.roles["user"], 2);
        assert_eq!(stats.roles["admin"], 1);
        assert_eq!(stats.roles["organizer"], 0);
    }
}
