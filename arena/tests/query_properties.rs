//! Property tests for the query engine.
//!
//! The pagination and filter invariants have to hold for every collection
//! and every well-formed query, not just the fixtures, so they are
//! checked against generated inputs.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use proptest::prelude::*;

use arena::query::{
    Filter, FilterValue, Query, Queryable, SortOrder, execute, text_contains,
};
use arena::tournament::{Tournament, TournamentStatus};

fn tournament(
    id: u32,
    name: String,
    status: TournamentStatus,
    participants: u32,
    start_offset: i64,
) -> Tournament {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let start = base + chrono::Days::new(start_offset as u64);
    Tournament {
        id: format!("{id:04}"),
        name,
        game: "Chess".to_string(),
        status,
        participants,
        max_participants: participants + 8,
        start_date: start,
        end_date: start + chrono::Days::new(7),
        prize: "$100".to_string(),
        description: "generated".to_string(),
        category: "Board".to_string(),
        location: "Online".to_string(),
        organizer: "Fide".to_string(),
        tags: vec!["generated".to_string()],
        created_at: base,
        updated_at: base,
    }
}

prop_compose! {
    fn arb_tournament(id: u32)(
        name in "[A-Za-z ]{1,12}",
        status in prop_oneof![
            Just(TournamentStatus::Upcoming),
            Just(TournamentStatus::Ongoing),
            Just(TournamentStatus::Completed),
        ],
        participants in 0u32..64,
        start_offset in 0i64..365,
    ) -> Tournament {
        tournament(id, name, status, participants, start_offset)
    }
}

fn arb_collection() -> impl Strategy<Value = Vec<Tournament>> {
    prop::collection::vec(any::<u8>(), 0..40).prop_flat_map(|seeds| {
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, _)| arb_tournament(i as u32))
            .collect::<Vec<_>>()
    })
}

fn query_with(page: u32, limit: u32) -> Query {
    let mut query = Query::default_for(Tournament::table());
    query.page = NonZeroU32::new(page.max(1)).unwrap();
    query.limit = NonZeroU32::new(limit.clamp(1, 100)).unwrap();
    query
}

proptest! {
    #[test]
    fn absent_search_is_neutral(records in arb_collection()) {
        let query = query_with(1, 100);
        let result = execute(&records, &query);
        prop_assert_eq!(result.pagination.total_items, records.len() as u64);
    }

    #[test]
    fn every_hit_contains_the_needle(
        records in arb_collection(),
        needle in "[a-z]{1,3}",
    ) {
        let mut query = query_with(1, 100);
        query.search = Some(needle.clone());
        let result = execute(&records, &query);
        for hit in &result.data {
            let in_text = ["name", "description", "game"].iter().any(|field| {
                match hit.field(field) {
                    Some(arena::query::FieldValue::Text(text)) => text_contains(text, &needle),
                    _ => false,
                }
            });
            let in_tags = hit.tags.iter().any(|tag| text_contains(tag, &needle));
            prop_assert!(in_text || in_tags);
        }
    }

    #[test]
    fn pagination_metadata_invariants(
        records in arb_collection(),
        page in 1u32..8,
        limit in 1u32..20,
    ) {
        let query = query_with(page, limit);
        let result = execute(&records, &query);
        let p = &result.pagination;
        let total = p.total_items;
        let limit = u64::from(p.items_per_page);

        prop_assert_eq!(u64::from(p.total_pages), total.div_ceil(limit));
        prop_assert_eq!(p.has_next_page, u64::from(p.current_page) * limit < total);
        prop_assert_eq!(p.has_prev_page, p.current_page > 1);
        prop_assert!(result.data.len() as u64 <= limit);
    }

    #[test]
    fn extra_filter_never_grows_the_result(
        records in arb_collection(),
    ) {
        let base = query_with(1, 100);
        let mut narrowed = base.clone();
        narrowed.filters.push(Filter {
            field: "status".to_string(),
            value: FilterValue::Text("upcoming".to_string()),
        });

        let without = execute(&records, &base);
        let with = execute(&records, &narrowed);
        prop_assert!(with.pagination.total_items <= without.pagination.total_items);
    }

    #[test]
    fn results_are_idempotent(
        records in arb_collection(),
        page in 1u32..5,
    ) {
        let mut query = query_with(page, 10);
        query.sort_by = "participants".to_string();
        query.sort_order = SortOrder::Asc;

        let first = execute(&records, &query);
        let second = execute(&records, &query);
        let ids = |r: &arena::query::QueryResult<Tournament>| {
            r.data.iter().map(|t| t.id.clone()).collect::<Vec<_>>()
        };
        prop_assert_eq!(ids(&first), ids(&second));
        prop_assert_eq!(first.pagination, second.pagination);
    }

    #[test]
    fn ascending_date_sort_is_non_decreasing(records in arb_collection()) {
        let mut query = query_with(1, 100);
        query.sort_by = "startDate".to_string();
        query.sort_order = SortOrder::Asc;

        let result = execute(&records, &query);
        let dates: Vec<NaiveDate> = result.data.iter().map(|t| t.start_date).collect();
        prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn pages_partition_the_filtered_set(records in arb_collection()) {
        let limit = 7u32;
        let mut seen = Vec::new();
        let mut page = 1u32;
        loop {
            let result = execute(&records, &query_with(page, limit));
            if result.data.is_empty() {
                break;
            }
            seen.extend(result.data.iter().map(|t| t.id.clone()));
            page += 1;
        }
        let mut expected: Vec<String> = records.iter().map(|t| t.id.clone()).collect();
        expected.sort();
        let mut seen_sorted = seen.clone();
        seen_sorted.sort();
        prop_assert_eq!(seen_sorted, expected);
        // No duplicates across pages.
        let mut dedup = seen.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), seen.len());
    }
}
