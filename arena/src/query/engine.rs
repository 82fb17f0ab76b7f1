//! The query execution pipeline.
//!
//! Step order is fixed and load-bearing: search filter, conjunctive field
//! filters, date-range filter, sort, pagination slice. Filtering happens
//! before the slice so that pagination metadata reflects the filtered
//! count, not the raw collection size.

use std::cmp::Ordering;

use serde::Serialize;

use super::pagination::Pagination;
use super::params::{Filter, FilterValue, Query, SortOrder};
use super::schema::{FieldTable, FieldValue, MatchKind, Queryable};

/// One page of records plus its pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Run a validated query against a record collection.
///
/// Pure: the input slice is never reordered or mutated; the returned page
/// holds clones. Never fails — an out-of-range page yields an empty page
/// with truthful metadata.
pub fn execute<T: Queryable>(records: &[T], query: &Query) -> QueryResult<T> {
    let table = T::table();

    let mut hits: Vec<&T> = records
        .iter()
        .filter(|record| matches_search(*record, table, query.search.as_deref()))
        .filter(|record| query.filters.iter().all(|f| matches_filter(*record, table, f)))
        .filter(|record| matches_date_range(*record, table, query))
        .collect();

    hits.sort_by(|a, b| compare(*a, *b, &query.sort_by, query.sort_order));

    let total_items = hits.len();
    let page = query.page.get();
    let limit = query.limit.get();
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let data = if start >= total_items {
        Vec::new()
    } else {
        let end = total_items.min(start + limit as usize);
        hits[start..end].iter().map(|r| (*r).clone()).collect()
    };

    QueryResult {
        data,
        pagination: Pagination::new(page, limit, total_items),
    }
}

/// Case-insensitive substring predicate (the free-text search primitive).
///
/// An empty or absent query is neutral and matches everything.
pub fn text_contains(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&query.to_lowercase())
}

/// Collect up to `cap` distinct candidates containing `query`, preserving
/// first-seen order. Backs the quick-search suggestion lists.
pub fn suggest<'a, I>(candidates: I, query: &str, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for candidate in candidates {
        if out.len() == cap {
            break;
        }
        if text_contains(candidate, query) && !out.iter().any(|seen| seen == candidate) {
            out.push(candidate.to_string());
        }
    }
    out
}

fn matches_search<T: Queryable>(record: &T, table: &FieldTable, search: Option<&str>) -> bool {
    let Some(needle) = search else {
        return true;
    };
    table.searchable.iter().any(|name| {
        match record.field(name) {
            Some(FieldValue::Text(text)) => text_contains(text, needle),
            Some(FieldValue::Tags(tags)) => tags.iter().any(|tag| text_contains(tag, needle)),
            _ => false,
        }
    })
}

fn matches_filter<T: Queryable>(record: &T, table: &FieldTable, filter: &Filter) -> bool {
    match (record.field(&filter.field), &filter.value) {
        (Some(FieldValue::Text(text)), FilterValue::Text(wanted)) => {
            // Filter fields were validated against the table, so the kind
            // lookup cannot miss.
            match table.filter_kind(&filter.field) {
                Some(MatchKind::Substring) => text_contains(text, wanted),
                _ => text == wanted.as_str(),
            }
        }
        (Some(FieldValue::Bool(flag)), FilterValue::Flag(wanted)) => flag == *wanted,
        _ => false,
    }
}

fn matches_date_range<T: Queryable>(record: &T, table: &FieldTable, query: &Query) -> bool {
    if query.start_date.is_none() && query.end_date.is_none() {
        return true;
    }
    let Some(field) = table.date_field else {
        return true;
    };
    let Some(date) = record.field(field).and_then(|v| v.as_naive_date()) else {
        return false;
    };
    if query.start_date.is_some_and(|start| date < start) {
        return false;
    }
    if query.end_date.is_some_and(|end| date > end) {
        return false;
    }
    true
}

/// Total-order comparator: sort key in the requested direction, then record
/// id ascending so equal keys stay deterministic. Records missing the sort
/// field order last regardless of direction.
fn compare<T: Queryable>(a: &T, b: &T, sort_by: &str, order: SortOrder) -> Ordering {
    let keyed = match (a.field(sort_by), b.field(sort_by)) {
        (Some(va), Some(vb)) => {
            let ascending = compare_values(&va, &vb);
            match order {
                SortOrder::Asc => ascending,
                SortOrder::Desc => ascending.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    keyed.then_with(|| a.id().cmp(b.id()))
}

fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
        (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
        // Heterogeneous or unsortable kinds are unordered; the id
        // tie-break keeps the result deterministic.
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::params::RawQuery;
    use crate::query::schema::{FilterableField, MatchKind};
    use chrono::NaiveDate;

    #[derive(Debug, Clone)]
    struct Item {
        id: String,
        name: String,
        status: &'static str,
        start: NaiveDate,
        score: i64,
        tags: Vec<String>,
    }

    const ITEM_TABLE: FieldTable = FieldTable {
        searchable: &["name", "tags"],
        filterable: &[
            FilterableField {
                name: "status",
                matching: MatchKind::Exact,
            },
            FilterableField {
                name: "name",
                matching: MatchKind::Substring,
            },
        ],
        date_field: Some("startDate"),
        sortable: &["name", "startDate", "score"],
        default_sort: "startDate",
    };

    impl Queryable for Item {
        fn table() -> &'static FieldTable {
            &ITEM_TABLE
        }

        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "name" => Some(FieldValue::Text(&self.name)),
                "status" => Some(FieldValue::Text(self.status)),
                "startDate" => Some(FieldValue::Date(self.start)),
                "score" => Some(FieldValue::Number(self.score)),
                "tags" => Some(FieldValue::Tags(&self.tags)),
                _ => None,
            }
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn item(id: &str, name: &str, status: &'static str, start: &str, score: i64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            status,
            start: date(start),
            score,
            tags: vec!["esports".to_string()],
        }
    }

    fn fixture() -> Vec<Item> {
        vec![
            item("1", "League Worlds", "ongoing", "2024-03-01", 16),
            item("2", "CS Major", "upcoming", "2024-01-15", 8),
            item("3", "Valorant Champions", "completed", "2024-02-01", 32),
            item("4", "Dota International", "upcoming", "2024-04-01", 5),
        ]
    }

    fn parse(raw: RawQuery) -> Query {
        Query::parse(&ITEM_TABLE, raw).unwrap()
    }

    #[test]
    fn empty_search_is_neutral() {
        let items = fixture();
        let result = execute(&items, &Query::default_for(&ITEM_TABLE));
        assert_eq!(result.pagination.total_items, 4);
        assert_eq!(result.data.len(), 4);
    }

    #[test]
    fn search_matches_name_or_tag() {
        let items = fixture();
        let by_name = parse(RawQuery {
            search: Some("VALORANT".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &by_name);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].id, "3");

        let by_tag = parse(RawQuery {
            search: Some("esport".to_string()),
            ..RawQuery::default()
        });
        assert_eq!(execute(&items, &by_tag).pagination.total_items, 4);
    }

    #[test]
    fn status_filter_scenario() {
        let items = fixture();
        let query = parse(RawQuery {
            filters: vec![("status".to_string(), "upcoming".to_string())],
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        assert_eq!(result.data.len(), 2);
        assert!(result.data.iter().all(|i| i.status == "upcoming"));
        assert_eq!(result.pagination.total_items, 2);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_next_page);
    }

    #[test]
    fn filters_are_conjunctive() {
        let items = fixture();
        let one = parse(RawQuery {
            filters: vec![("status".to_string(), "upcoming".to_string())],
            ..RawQuery::default()
        });
        let two = parse(RawQuery {
            filters: vec![
                ("status".to_string(), "upcoming".to_string()),
                ("name".to_string(), "dota".to_string()),
            ],
            ..RawQuery::default()
        });
        let with_one = execute(&items, &one).pagination.total_items;
        let with_two = execute(&items, &two).pagination.total_items;
        assert!(with_two <= with_one);
        assert_eq!(with_two, 1);
    }

    #[test]
    fn date_range_is_inclusive() {
        let items = fixture();
        let query = parse(RawQuery {
            start_date: Some("2024-01-15".to_string()),
            end_date: Some("2024-02-01".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        let mut ids: Vec<&str> = result.data.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn sort_ascending_by_date_is_non_decreasing() {
        let items = fixture();
        let query = parse(RawQuery {
            sort_by: Some("startDate".to_string()),
            sort_order: Some("asc".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        let dates: Vec<NaiveDate> = result.data.iter().map(|i| i.start).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.data[0].id, "2");
    }

    #[test]
    fn sort_descending_by_number() {
        let items = fixture();
        let query = parse(RawQuery {
            sort_by: Some("score".to_string()),
            sort_order: Some("desc".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        let scores: Vec<i64> = result.data.iter().map(|i| i.score).collect();
        assert_eq!(scores, [32, 16, 8, 5]);
    }

    #[test]
    fn equal_sort_keys_tie_break_by_id() {
        let mut items = fixture();
        for it in &mut items {
            it.start = date("2024-01-01");
        }
        let query = parse(RawQuery {
            sort_by: Some("startDate".to_string()),
            sort_order: Some("desc".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        let ids: Vec<&str> = result.data.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn second_page_of_twenty_five() {
        let items: Vec<Item> = (1..=25)
            .map(|n| item(&format!("{n:02}"), &format!("Item {n:02}"), "upcoming", "2024-01-01", n))
            .collect();
        let query = parse(RawQuery {
            page: Some("2".to_string()),
            sort_by: Some("name".to_string()),
            sort_order: Some("asc".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        assert_eq!(result.data.len(), 10);
        assert_eq!(result.data[0].name, "Item 11");
        assert_eq!(result.data[9].name, "Item 20");
        assert!(result.pagination.has_next_page);
        assert!(result.pagination.has_prev_page);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items = fixture();
        let query = parse(RawQuery {
            page: Some("99".to_string()),
            ..RawQuery::default()
        });
        let result = execute(&items, &query);
        assert!(result.data.is_empty());
        assert_eq!(result.pagination.total_items, 4);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_next_page);
        assert!(result.pagination.has_prev_page);
    }

    #[test]
    fn execute_does_not_reorder_input() {
        let items = fixture();
        let before: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let query = parse(RawQuery {
            sort_by: Some("score".to_string()),
            ..RawQuery::default()
        });
        let _ = execute(&items, &query);
        let after: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn same_query_twice_is_identical() {
        let items = fixture();
        let query = parse(RawQuery {
            search: Some("a".to_string()),
            sort_by: Some("name".to_string()),
            ..RawQuery::default()
        });
        let first = execute(&items, &query);
        let second = execute(&items, &query);
        let ids = |r: &QueryResult<Item>| r.data.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.pagination, second.pagination);
    }

    #[test]
    fn suggest_dedups_and_caps() {
        let candidates = ["MOBA", "FPS", "MOBA", "Racing", "FPS", "Sports"];
        let got = suggest(candidates, "", 3);
        assert_eq!(got, ["MOBA", "FPS", "Racing"]);
        let got = suggest(candidates, "mo", 5);
        assert_eq!(got, ["MOBA"]);
    }

    #[test]
    fn text_contains_is_case_insensitive() {
        assert!(text_contains("League of Legends", "LEGEND"));
        assert!(text_contains("anything", ""));
        assert!(!text_contains("CS Major", "valorant"));
    }
}
