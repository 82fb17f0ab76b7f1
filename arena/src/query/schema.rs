//! Field-role declarations for queryable record types.

use chrono::{DateTime, NaiveDate, Utc};

/// A single field value, borrowed from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text.
    Text(&'a str),
    /// Integral number (counts, views).
    Number(i64),
    /// Boolean flag.
    Bool(bool),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Tag array, membership-searchable.
    Tags(&'a [String]),
}

impl FieldValue<'_> {
    /// Collapse date-like values to a calendar date for range filtering.
    pub(crate) fn as_naive_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(date) => Some(*date),
            FieldValue::Timestamp(ts) => Some(ts.date_naive()),
            _ => None,
        }
    }
}

/// How a filterable field matches its query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact string equality (status, category).
    Exact,
    /// Case-insensitive substring (organizer, author).
    Substring,
    /// Boolean flag, query value must be `true` or `false`.
    Flag,
}

/// A field that list requests may filter on.
#[derive(Debug, Clone, Copy)]
pub struct FilterableField {
    pub name: &'static str,
    pub matching: MatchKind,
}

/// Declarative field-role table for one resource type.
///
/// Field names use the wire spelling (camelCase) so that query parameters
/// like `sortBy=startDate` resolve without translation.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    /// Fields the free-text search scans. Tag-array fields participate
    /// with element-wise matching.
    pub searchable: &'static [&'static str],
    /// Fields accepted as equality/substring/flag filters.
    pub filterable: &'static [FilterableField],
    /// The field the `startDate`/`endDate` range applies to.
    pub date_field: Option<&'static str>,
    /// Fields accepted for `sortBy`.
    pub sortable: &'static [&'static str],
    /// Sort field applied when the request names none.
    pub default_sort: &'static str,
}

impl FieldTable {
    /// Look up the match kind for a filterable field.
    pub fn filter_kind(&self, name: &str) -> Option<MatchKind> {
        self.filterable
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.matching)
    }

    /// Whether `sortBy` may name this field.
    pub fn is_sortable(&self, name: &str) -> bool {
        self.sortable.contains(&name)
    }
}

/// A record type the query engine can process.
pub trait Queryable: Clone {
    /// The field-role table for this resource type.
    fn table() -> &'static FieldTable;

    /// Unique, immutable identifier. Used as the deterministic tie-break
    /// for equal sort keys.
    fn id(&self) -> &str;

    /// Look up a field by wire name. `None` means the record has no such
    /// field; such records sort after records that do.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
