//! Demo data set.
//!
//! The same four tournaments and five articles the original demo shipped
//! with, used to seed fresh memory and JSON backends. Demo users are
//! described by credentials only; they are registered through the
//! authentication manager at startup so their password hashes are real.

use chrono::NaiveDate;

use crate::news::{NewsArticle, NewsStatus};
use crate::tournament::{Tournament, TournamentStatus};
use crate::user::Role;

/// Credentials for a demo account registered at startup.
#[derive(Debug, Clone, Copy)]
pub struct DemoUser {
    pub email: &'static str,
    pub full_name: &'static str,
    pub password: &'static str,
    pub role: Role,
}

/// The demo accounts: one of each role.
pub fn demo_users() -> Vec<DemoUser> {
    vec![
        DemoUser {
            email: "testuser@esport.com",
            full_name: "Test User",
            password: "Testuser1pass",
            role: Role::User,
        },
        DemoUser {
            email: "organizer@esport.com",
            full_name: "Organizer User",
            password: "Organizer1pass",
            role: Role::Organizer,
        },
        DemoUser {
            email: "admin@esport.com",
            full_name: "Admin User",
            password: "Adminuser1pass",
            role: Role::Admin,
        },
    ]
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("seed dates are valid")
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

/// The four demo tournaments.
pub fn sample_tournaments() -> Vec<Tournament> {
    vec![
        Tournament {
            id: "1".to_string(),
            name: "League of Legends World Championship".to_string(),
            game: "League of Legends".to_string(),
            status: TournamentStatus::Ongoing,
            participants: 16,
            max_participants: 32,
            start_date: date("2024-01-15"),
            end_date: date("2024-01-30"),
            prize: "$10,000".to_string(),
            description: "Annual championship tournament for League of Legends players worldwide"
                .to_string(),
            category: "MOBA".to_string(),
            location: "Online".to_string(),
            organizer: "Riot Games".to_string(),
            tags: tags(&["esports", "championship", "online", "moba"]),
            created_at: date("2024-01-01"),
            updated_at: date("2024-01-10"),
        },
        Tournament {
            id: "2".to_string(),
            name: "CS:GO Major Tournament".to_string(),
            game: "Counter-Strike: Global Offensive".to_string(),
            status: TournamentStatus::Upcoming,
            participants: 8,
            max_participants: 16,
            start_date: date("2024-02-01"),
            end_date: date("2024-02-15"),
            prize: "$25,000".to_string(),
            description: "Major CS:GO tournament with top teams from around the world".to_string(),
            category: "FPS".to_string(),
            location: "Berlin, Germany".to_string(),
            organizer: "ESL Gaming".to_string(),
            tags: tags(&["fps", "major", "offline", "berlin"]),
            created_at: date("2024-01-02"),
            updated_at: date("2024-01-12"),
        },
        Tournament {
            id: "3".to_string(),
            name: "Valorant Champions".to_string(),
            game: "Valorant".to_string(),
            status: TournamentStatus::Completed,
            participants: 32,
            max_participants: 32,
            start_date: date("2023-12-01"),
            end_date: date("2023-12-15"),
            prize: "$50,000".to_string(),
            description: "The biggest Valorant tournament of the year".to_string(),
            category: "FPS".to_string(),
            location: "Los Angeles, USA".to_string(),
            organizer: "Riot Games".to_string(),
            tags: tags(&["fps", "champions", "offline", "los-angeles"]),
            created_at: date("2023-11-01"),
            updated_at: date("2023-12-20"),
        },
        Tournament {
            id: "4".to_string(),
            name: "Dota 2 International".to_string(),
            game: "Dota 2".to_string(),
            status: TournamentStatus::Upcoming,
            participants: 5,
            max_participants: 24,
            start_date: date("2024-03-01"),
            end_date: date("2024-03-20"),
            prize: "$100,000".to_string(),
            description: "The most prestigious Dota 2 tournament".to_string(),
            category: "MOBA".to_string(),
            location: "Seattle, USA".to_string(),
            organizer: "Valve Corporation".to_string(),
            tags: tags(&["moba", "international", "offline", "seattle"]),
            created_at: date("2024-01-05"),
            updated_at: date("2024-01-15"),
        },
    ]
}

/// The five demo articles.
pub fn sample_news() -> Vec<NewsArticle> {
    vec![
        NewsArticle {
            id: "1".to_string(),
            title: "Tournament Registration Now Open".to_string(),
            content: "Registration for the upcoming League of Legends World Championship is now \
                      available. Players can sign up through our platform."
                .to_string(),
            excerpt: "Registration for the upcoming championship is now available.".to_string(),
            author: "Admin".to_string(),
            author_id: "1".to_string(),
            published_at: date("2024-01-10"),
            featured: true,
            category: "announcement".to_string(),
            tags: tags(&["registration", "tournament", "league-of-legends"]),
            image_url: "https://api.builder.io/api/v1/image/assets/TEMP/news1.jpg".to_string(),
            views: 1250,
            status: NewsStatus::Published,
        },
        NewsArticle {
            id: "2".to_string(),
            title: "New Game Categories Added".to_string(),
            content: "We have expanded our platform to include support for more games including \
                      Valorant, Apex Legends, and Rocket League."
                .to_string(),
            excerpt: "We have added support for more games in our platform.".to_string(),
            author: "Admin".to_string(),
            author_id: "1".to_string(),
            published_at: date("2024-01-08"),
            featured: false,
            category: "update".to_string(),
            tags: tags(&["games", "platform", "update"]),
            image_url: "https://api.builder.io/api/v1/image/assets/TEMP/news2.jpg".to_string(),
            views: 892,
            status: NewsStatus::Published,
        },
        NewsArticle {
            id: "3".to_string(),
            title: "CS:GO Major Tournament Schedule Released".to_string(),
            content: "The complete schedule for the upcoming CS:GO Major tournament has been \
                      released. Matches will start February 1st."
                .to_string(),
            excerpt: "Complete schedule for CS:GO Major tournament is now available.".to_string(),
            author: "Tournament Director".to_string(),
            author_id: "2".to_string(),
            published_at: date("2024-01-12"),
            featured: true,
            category: "schedule".to_string(),
            tags: tags(&["csgo", "major", "schedule"]),
            image_url: "https://api.builder.io/api/v1/image/assets/TEMP/news3.jpg".to_string(),
            views: 2100,
            status: NewsStatus::Published,
        },
        NewsArticle {
            id: "4".to_string(),
            title: "Prize Pool Increased for Dota 2 International".to_string(),
            content: "Due to overwhelming community support, the prize pool for The International \
                      has been increased to $100,000."
                .to_string(),
            excerpt: "Prize pool increased due to community support.".to_string(),
            author: "Finance Team".to_string(),
            author_id: "3".to_string(),
            published_at: date("2024-01-14"),
            featured: false,
            category: "announcement".to_string(),
            tags: tags(&["dota2", "prize-pool", "international"]),
            image_url: "https://api.builder.io/api/v1/image/assets/TEMP/news4.jpg".to_string(),
            views: 3250,
            status: NewsStatus::Published,
        },
        NewsArticle {
            id: "5".to_string(),
            title: "Platform Maintenance Scheduled".to_string(),
            content: "We will be performing scheduled maintenance on January 20th from 2AM to 6AM \
                      UTC. All services will be temporarily unavailable."
                .to_string(),
            excerpt: "Scheduled maintenance on January 20th.".to_string(),
            author: "Tech Team".to_string(),
            author_id: "4".to_string(),
            published_at: date("2024-01-16"),
            featured: false,
            category: "maintenance".to_string(),
            tags: tags(&["maintenance", "downtime", "technical"]),
            image_url: "https://api.builder.io/api/v1/image/assets/TEMP/news5.jpg".to_string(),
            views: 450,
            status: NewsStatus::Published,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let tournaments = sample_tournaments();
        let mut ids: Vec<&str> = tournaments.iter().map(|t| t.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), tournaments.len());
    }

    #[test]
    fn seed_has_two_upcoming_tournaments() {
        let upcoming = sample_tournaments()
            .iter()
            .filter(|t| t.status == TournamentStatus::Upcoming)
            .count();
        assert_eq!(upcoming, 2);
    }

    #[test]
    fn seed_has_two_featured_articles() {
        let featured = sample_news().iter().filter(|n| n.featured).count();
        assert_eq!(featured, 2);
    }

    #[test]
    fn demo_passwords_satisfy_strength_rules() {
        for user in demo_users() {
            assert!(user.password.len() >= 8);
            assert!(user.password.chars().any(|c| c.is_ascii_digit()));
            assert!(user.password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(user.password.chars().any(|c| c.is_ascii_lowercase()));
        }
    }
}
