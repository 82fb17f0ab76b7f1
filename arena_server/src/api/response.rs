//! Success response envelopes.
//!
//! The wire shapes are a compatibility contract with the existing client:
//! list endpoints return `{ success, data, pagination, filters, sorting }`,
//! single items `{ success, data }`, sub-collections `{ success, data,
//! count }`, and quick search adds `suggestions`.

use arena::query::{Pagination, SortOrder};
use serde::Serialize;

/// Full list response with pagination metadata and echoed parameters.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T, F> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
    pub filters: F,
    pub sorting: Sorting,
}

/// The effective sort configuration, defaults applied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sorting {
    pub sort_by: String,
    pub sort_order: SortOrder,
}

/// Single-record response.
#[derive(Debug, Serialize)]
pub struct ItemEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemEnvelope<T> {
    pub fn new(data: T) -> Self {
        ItemEnvelope {
            success: true,
            data,
        }
    }
}

/// Mutation acknowledgement carrying the affected record.
#[derive(Debug, Serialize)]
pub struct MutationEnvelope<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T> MutationEnvelope<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        MutationEnvelope {
            success: true,
            message,
            data,
        }
    }
}

/// Unpaginated sub-collection (featured news, upcoming tournaments).
#[derive(Debug, Serialize)]
pub struct CollectionEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> CollectionEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        CollectionEnvelope {
            success: true,
            data,
            count,
        }
    }
}

/// Quick-search response: capped matches plus suggestions.
#[derive(Debug, Serialize)]
pub struct SearchEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub suggestions: Vec<String>,
}
