//! Query parameter validation errors.

use thiserror::Error;

/// Rejections produced while validating raw list-request parameters.
///
/// Messages are written for API clients; the HTTP layer surfaces them
/// verbatim in a `400` envelope.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `page` missing a positive integer value
    #[error("Invalid page '{0}': must be a positive integer")]
    InvalidPage(String),

    /// `limit` not an integer in the accepted range
    #[error("Invalid limit '{0}': must be an integer between 1 and {max}", max = super::params::MAX_LIMIT)]
    InvalidLimit(String),

    /// `sortBy` named a field the resource does not sort on
    #[error("Cannot sort by '{0}'")]
    UnknownSortField(String),

    /// `sortOrder` was neither `asc` nor `desc`
    #[error("Invalid sort order '{0}': must be 'asc' or 'desc'")]
    InvalidSortOrder(String),

    /// A filter parameter named an unknown field
    #[error("Cannot filter by '{0}'")]
    UnknownFilterField(String),

    /// A flag filter received something other than `true`/`false`
    #[error("Invalid value '{value}' for '{field}': must be 'true' or 'false'")]
    InvalidFlag { field: String, value: String },

    /// `startDate`/`endDate` was not an ISO-8601 calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type for query parameter validation.
pub type QueryParseResult<T> = Result<T, QueryError>;
