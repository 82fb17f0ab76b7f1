//! User account data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{FieldTable, FieldValue, FilterableField, MatchKind, Queryable};

/// Access role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Organizer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Organizer => "organizer",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Public user profile. Never carries credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// A user record as the store keeps it: the public profile plus the
/// Argon2 password hash. Only store backends serialize this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
}

const USER_TABLE: FieldTable = FieldTable {
    searchable: &["email", "fullName"],
    filterable: &[
        FilterableField {
            name: "role",
            matching: MatchKind::Exact,
        },
        FilterableField {
            name: "isActive",
            matching: MatchKind::Flag,
        },
    ],
    date_field: Some("createdAt"),
    sortable: &["email", "fullName", "createdAt", "lastLogin"],
    default_sort: "createdAt",
};

impl Queryable for User {
    fn table() -> &'static FieldTable {
        &USER_TABLE
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "email" => Some(FieldValue::Text(&self.email)),
            "fullName" => Some(FieldValue::Text(&self.full_name)),
            "role" => Some(FieldValue::Text(self.role.as_str())),
            "isActive" => Some(FieldValue::Bool(self.is_active)),
            "createdAt" => Some(FieldValue::Timestamp(self.created_at)),
            "lastLogin" => self.last_login.map(FieldValue::Timestamp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "test@example.com".to_string(),
            full_name: "Test User".to_string(),
            role: Role::User,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn profile_serializes_without_credentials() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "user");
        assert!(json.get("fullName").is_some());
    }

    #[test]
    fn stored_user_flattens_profile() {
        let stored = StoredUser {
            user: user(),
            password_hash: "$argon2id$stub".to_string(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["passwordHash"], "$argon2id$stub");
    }

    #[test]
    fn missing_last_login_sorts_as_absent() {
        assert!(user().field("lastLogin").is_none());
    }
}
