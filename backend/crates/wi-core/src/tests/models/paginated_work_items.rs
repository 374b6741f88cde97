use crate::{PaginatedWorkItems, Pagination, WorkItem, WorkItemType};

use googletest::prelude::*;
use proptest::prelude::*;
use serde_json::json;

fn items(count: usize) -> Vec<WorkItem> {
    (0..count)
        .map(|i| {
            WorkItem::new(
                WorkItemType::Task,
                format!("Task {}", i),
                json!({}),
                None,
                "test".to_string(),
            )
            .unwrap()
        })
        .collect()
}

#[test]
fn given_first_page_of_150_when_built_then_has_more() {
    let page = PaginatedWorkItems::new(items(50), 150, Pagination::new(50, 0).unwrap());

    assert_that!(page.items, len(eq(50)));
    assert_that!(page.total_count, eq(150));
    assert_that!(page.limit, eq(50));
    assert_that!(page.offset, eq(0));
    assert_that!(page.has_more, eq(true));
}

#[test]
fn given_last_page_of_150_when_built_then_no_more() {
    let page = PaginatedWorkItems::new(items(50), 150, Pagination::new(50, 100).unwrap());

    assert_that!(page.has_more, eq(false));
}

#[test]
fn given_offset_past_end_when_built_then_empty_and_no_more() {
    let page = PaginatedWorkItems::new(Vec::new(), 150, Pagination::new(50, 200).unwrap());

    assert_that!(page.items, is_empty());
    assert_that!(page.has_more, eq(false));
}

#[test]
fn given_empty_page_then_zero_total() {
    let page = PaginatedWorkItems::empty(Pagination::new(10, 0).unwrap());

    assert_that!(page.total_count, eq(0));
    assert_that!(page.has_more, eq(false));
}

proptest! {
    #[test]
    fn given_any_window_when_page_built_then_has_more_matches_remaining_items(
        total in 0i64..300,
        limit in 1i64..=100,
        offset in 0i64..400,
    ) {
        let returned = (total - offset).clamp(0, limit);
        let page = PaginatedWorkItems::new(
            items(returned as usize),
            total,
            Pagination::new(limit, offset).unwrap(),
        );

        prop_assert_eq!(page.items.len() as i64, returned);
        prop_assert_eq!(page.has_more, offset + returned < total);
        prop_assert!(page.items.len() as i64 <= page.limit);
    }

    #[test]
    fn given_out_of_range_limit_when_pagination_built_then_rejected(limit in prop_oneof![i64::MIN..1i64, 101i64..i64::MAX]) {
        prop_assert!(Pagination::new(limit, 0).is_err());
    }
}
