//! Pagination metadata.

use serde::{Deserialize, Serialize};

/// Page window metadata returned alongside every list result.
///
/// Field names are a fixed wire contract; clients rely on the camelCase
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute metadata for a page window over `total_items` records.
    ///
    /// `total_pages` is `ceil(total_items / limit)`; an out-of-range page
    /// is legal and simply yields an empty window.
    pub fn new(page: u32, limit: u32, total_items: usize) -> Self {
        let total = total_items as u64;
        let per_page = u64::from(limit);
        Pagination {
            current_page: page,
            total_pages: total.div_ceil(per_page) as u32,
            total_items: total,
            items_per_page: limit,
            has_next_page: u64::from(page) * per_page < total,
            has_prev_page: page > 1,
        }
    }
}
