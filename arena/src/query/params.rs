//! Validated list-request parameters.
//!
//! Raw query-string values arrive as untyped strings. [`Query::parse`]
//! validates them once against a resource's [`FieldTable`] and produces a
//! normalized [`Query`] the engine can run without further checks. The
//! original service silently coerced non-numeric `page`/`limit` values;
//! here malformed input is rejected outright.

use std::fmt;
use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{QueryError, QueryParseResult};
use super::schema::{FieldTable, MatchKind};

/// Page size applied when the request names none.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// A validated filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
}

/// One conjunctive filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: FilterValue,
}

/// Raw, untyped parameters as they arrive from the query string.
///
/// Handlers fill in only the parameters their resource recognizes;
/// `filters` carries `(field, value)` pairs in wire spelling.
#[derive(Debug, Clone, Default)]
pub struct RawQuery {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Validated, normalized query configuration.
///
/// `page` and `limit` are `NonZeroU32`, so the degenerate `limit == 0`
/// case the original service left undefined is unrepresentable here.
#[derive(Debug, Clone)]
pub struct Query {
    pub search: Option<String>,
    pub filters: Vec<Filter>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: NonZeroU32,
    pub limit: NonZeroU32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Query {
    /// Validate raw parameters against a resource's field table.
    ///
    /// Empty-string values are treated as absent (neutral), matching the
    /// behavior of an omitted query parameter.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when a parameter is malformed or names a
    /// field the resource does not expose.
    pub fn parse(table: &FieldTable, raw: RawQuery) -> QueryParseResult<Self> {
        let page = match non_empty(raw.page) {
            Some(v) => parse_positive(&v).ok_or(QueryError::InvalidPage(v))?,
            None => NonZeroU32::MIN,
        };

        let limit = match non_empty(raw.limit) {
            Some(v) => parse_positive(&v)
                .filter(|n| n.get() <= MAX_LIMIT)
                .ok_or(QueryError::InvalidLimit(v))?,
            None => NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
        };

        let sort_by = match non_empty(raw.sort_by) {
            Some(v) => {
                if !table.is_sortable(&v) {
                    return Err(QueryError::UnknownSortField(v));
                }
                v
            }
            None => table.default_sort.to_string(),
        };

        let sort_order = match non_empty(raw.sort_order) {
            Some(v) => match v.as_str() {
                "asc" => SortOrder::Asc,
                "desc" => SortOrder::Desc,
                _ => return Err(QueryError::InvalidSortOrder(v)),
            },
            None => SortOrder::Desc,
        };

        let start_date = non_empty(raw.start_date).map(|v| parse_date(&v)).transpose()?;
        let end_date = non_empty(raw.end_date).map(|v| parse_date(&v)).transpose()?;

        let mut filters = Vec::new();
        for (field, value) in raw.filters {
            if value.is_empty() {
                continue;
            }
            let kind = table
                .filter_kind(&field)
                .ok_or_else(|| QueryError::UnknownFilterField(field.clone()))?;
            let value = match kind {
                MatchKind::Exact | MatchKind::Substring => FilterValue::Text(value),
                MatchKind::Flag => match value.as_str() {
                    "true" => FilterValue::Flag(true),
                    "false" => FilterValue::Flag(false),
                    _ => return Err(QueryError::InvalidFlag { field, value }),
                },
            };
            filters.push(Filter { field, value });
        }

        Ok(Query {
            search: non_empty(raw.search),
            filters,
            start_date,
            end_date,
            page,
            limit,
            sort_by,
            sort_order,
        })
    }

    /// The defaults for a resource: everything matches, first page of 10,
    /// default sort descending.
    pub fn default_for(table: &FieldTable) -> Self {
        Query {
            search: None,
            filters: Vec::new(),
            start_date: None,
            end_date: None,
            page: NonZeroU32::MIN,
            limit: NonZeroU32::new(DEFAULT_LIMIT).unwrap_or(NonZeroU32::MIN),
            sort_by: table.default_sort.to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_positive(value: &str) -> Option<NonZeroU32> {
    value.parse::<u32>().ok().and_then(NonZeroU32::new)
}

fn parse_date(value: &str) -> QueryParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| QueryError::InvalidDate(value.to_string()))
}
