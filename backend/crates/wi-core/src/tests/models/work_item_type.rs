use crate::{CoreError, WorkItemType};

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_every_type_when_round_tripped_through_str_then_unchanged() {
    for item_type in WorkItemType::ALL {
        let parsed = WorkItemType::from_str(item_type.as_str()).unwrap();
        assert_that!(parsed, eq(item_type));
    }
}

#[test]
fn given_unknown_type_when_parsed_then_invalid_work_item_type_error() {
    // Given
    let raw = "feature";

    // When
    let result = WorkItemType::from_str(raw);

    // Then
    match result {
        Err(CoreError::InvalidWorkItemType { value, .. }) => assert_that!(value, eq("feature")),
        other => panic!("expected InvalidWorkItemType, got {:?}", other),
    }
}

#[test]
fn given_uppercase_type_when_parsed_then_rejected() {
    assert_that!(WorkItemType::from_str("Task"), err(anything()));
}

#[test]
fn given_type_when_serialized_then_snake_case() {
    let json = serde_json::to_string(&WorkItemType::Research).unwrap();
    assert_that!(json, eq("\"research\""));
}
