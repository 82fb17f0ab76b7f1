//! # Arena
//!
//! A tournament and news content-management library.
//!
//! The platform serves CRUD-style JSON APIs over tournaments, news
//! articles, and user accounts. Every list endpoint goes through one
//! shared pipeline: the [`query`] engine filters, sorts, and paginates a
//! collection snapshot according to a declarative per-resource field-role
//! table, so tournaments, news, and users never re-implement the same
//! search/filter/paginate logic.
//!
//! ## Core Modules
//!
//! - [`query`]: generic search/filter/sort/paginate engine
//! - [`tournament`], [`news`], [`user`]: resource models and field roles
//! - [`store`]: swappable backing stores (in-memory, flat JSON files)
//! - [`auth`]: registration, login, and JWT session management
//! - [`analytics`]: aggregate statistics for the admin surface
//! - [`routing`]: the single-page client's path router
//!
//! ## Example
//!
//! ```
//! use arena::query::{Query, Queryable, execute};
//! use arena::store::seed;
//! use arena::tournament::Tournament;
//!
//! let tournaments = seed::sample_tournaments();
//! let query = Query::default_for(Tournament::table());
//! let page = execute(&tournaments, &query);
//! assert_eq!(page.pagination.total_items, 4);
//! ```

/// Generic collection query processing.
pub mod query;

/// Resource models.
pub mod news;
pub mod tournament;
pub mod user;

/// Backing stores.
pub mod store;

/// Authentication and sessions.
pub mod auth;

/// Aggregate statistics.
pub mod analytics;

/// Client-side path routing.
pub mod routing;

pub use query::{Pagination, Query, QueryResult, Queryable, execute};
pub use store::Stores;
