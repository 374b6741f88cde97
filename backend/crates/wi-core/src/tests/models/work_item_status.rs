use crate::{CoreError, WorkItemStatus};

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_default_status_then_active() {
    assert_that!(WorkItemStatus::default(), eq(WorkItemStatus::Active));
}

#[test]
fn given_every_status_when_round_tripped_through_str_then_unchanged() {
    for status in WorkItemStatus::ALL {
        let parsed = WorkItemStatus::from_str(status.as_str()).unwrap();
        assert_that!(parsed, eq(status));
    }
}

#[test]
fn given_pending_status_when_parsed_then_invalid_status_error() {
    let result = WorkItemStatus::from_str("pending");

    match result {
        Err(err @ CoreError::InvalidWorkItemStatus { .. }) => {
            assert_that!(err.field(), some(eq("status")));
        }
        other => panic!("expected InvalidWorkItemStatus, got {:?}", other),
    }
}

#[test]
fn given_status_when_displayed_then_database_form() {
    assert_that!(WorkItemStatus::Completed.to_string(), eq("completed"));
}
