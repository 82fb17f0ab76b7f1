//! User accounts and their query field roles.

pub mod models;

pub use models::{Role, StoredUser, User};
