//! Tournament data models.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldTable, FieldValue, FilterableField, MatchKind, Queryable};

/// Tournament lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Ongoing => "ongoing",
            TournamentStatus::Completed => "completed",
        }
    }
}

/// A tournament listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub game: String,
    pub status: TournamentStatus,
    pub participants: u32,
    pub max_participants: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub organizer: String,
    pub tags: Vec<String>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

/// Payload for creating a tournament. Id, organizer, and timestamps are
/// assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournament {
    pub name: String,
    pub game: String,
    #[serde(default = "default_status")]
    pub status: TournamentStatus,
    #[serde(default)]
    pub participants: u32,
    pub max_participants: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub prize: String,
    pub description: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> TournamentStatus {
    TournamentStatus::Upcoming
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournament {
    pub name: Option<String>,
    pub game: Option<String>,
    pub status: Option<TournamentStatus>,
    pub participants: Option<u32>,
    pub max_participants: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prize: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Tournament {
    /// Build a new tournament from a create payload.
    pub fn create(payload: CreateTournament, organizer: String) -> Self {
        let today = Utc::now().date_naive();
        Tournament {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            game: payload.game,
            status: payload.status,
            participants: payload.participants,
            max_participants: payload.max_participants,
            start_date: payload.start_date,
            end_date: payload.end_date,
            prize: payload.prize,
            description: payload.description,
            category: payload.category,
            location: payload.location,
            organizer,
            tags: payload.tags,
            created_at: today,
            updated_at: today,
        }
    }
}

impl UpdateTournament {
    /// Apply the present fields and bump `updatedAt`.
    pub fn apply(self, tournament: &mut Tournament) {
        if let Some(name) = self.name {
            tournament.name = name;
        }
        if let Some(game) = self.game {
            tournament.game = game;
        }
        if let Some(status) = self.status {
            tournament.status = status;
        }
        if let Some(participants) = self.participants {
            tournament.participants = participants;
        }
        if let Some(max_participants) = self.max_participants {
            tournament.max_participants = max_participants;
        }
        if let Some(start_date) = self.start_date {
            tournament.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            tournament.end_date = end_date;
        }
        if let Some(prize) = self.prize {
            tournament.prize = prize;
        }
        if let Some(description) = self.description {
            tournament.description = description;
        }
        if let Some(category) = self.category {
            tournament.category = category;
        }
        if let Some(location) = self.location {
            tournament.location = location;
        }
        if let Some(tags) = self.tags {
            tournament.tags = tags;
        }
        tournament.updated_at = Utc::now().date_naive();
    }
}

const TOURNAMENT_TABLE: FieldTable = FieldTable {
    searchable: &["name", "description", "game", "tags"],
    filterable: &[
        FilterableField {
            name: "game",
            matching: MatchKind::Substring,
        },
        FilterableField {
            name: "status",
            matching: MatchKind::Exact,
        },
        FilterableField {
            name: "category",
            matching: MatchKind::Exact,
        },
        FilterableField {
            name: "organizer",
            matching: MatchKind::Substring,
        },
    ],
    date_field: Some("startDate"),
    sortable: &[
        "name",
        "game",
        "participants",
        "maxParticipants",
        "startDate",
        "endDate",
        "createdAt",
        "updatedAt",
    ],
    default_sort: "createdAt",
};

impl Queryable for Tournament {
    fn table() -> &'static FieldTable {
        &TOURNAMENT_TABLE
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "game" => Some(FieldValue::Text(&self.game)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            "participants" => Some(FieldValue::Number(i64::from(self.participants))),
            "maxParticipants" => Some(FieldValue::Number(i64::from(self.max_participants))),
            "startDate" => Some(FieldValue::Date(self.start_date)),
            "endDate" => Some(FieldValue::Date(self.end_date)),
            "prize" => Some(FieldValue::Text(&self.prize)),
            "description" => Some(FieldValue::Text(&self.description)),
            "category" => Some(FieldValue::Text(&self.category)),
            "location" => Some(FieldValue::Text(&self.location)),
            "organizer" => Some(FieldValue::Text(&self.organizer)),
            "tags" => Some(FieldValue::Tags(&self.tags)),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            "updatedAt" => Some(FieldValue::Date(self.updated_at)),
            _ => None,
        }
    }
}
