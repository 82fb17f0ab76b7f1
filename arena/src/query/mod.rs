//! Generic collection query processing.
//!
//! Every list endpoint in the platform answers the same kind of request:
//! free-text search, a handful of field filters, an optional date range,
//! a sort key, and a page window. Instead of re-implementing that pipeline
//! per resource, each record type declares its field roles in a
//! [`FieldTable`] and implements [`Queryable`]; [`engine::execute`] then
//! runs the shared filter → sort → paginate pipeline over any collection.
//!
//! The engine is pure: it never mutates the input records and never fails
//! for a validated [`Query`]. All request validation happens once, in
//! [`Query::parse`], at the HTTP boundary.

pub mod engine;
pub mod errors;
pub mod pagination;
pub mod params;
pub mod schema;

pub use engine::{QueryResult, execute, suggest, text_contains};
pub use errors::QueryError;
pub use pagination::Pagination;
pub use params::{DEFAULT_LIMIT, Filter, FilterValue, MAX_LIMIT, Query, RawQuery, SortOrder};
pub use schema::{FieldTable, FieldValue, FilterableField, MatchKind, Queryable};
