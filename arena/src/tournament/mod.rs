//! Tournament records and their query field roles.

pub mod models;

pub use models::{CreateTournament, Tournament, TournamentStatus, UpdateTournament};
