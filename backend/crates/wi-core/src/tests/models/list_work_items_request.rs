use crate::{CoreError, DEFAULT_LIMIT, ListWorkItemsRequest, WorkItemStatus, WorkItemType};

use googletest::prelude::*;
use uuid::Uuid;

fn field_of(request: &ListWorkItemsRequest) -> Option<&'static str> {
    request.validate(DEFAULT_LIMIT).unwrap_err().field()
}

#[test]
fn given_empty_request_when_validated_then_defaults_applied() {
    // Given
    let request = ListWorkItemsRequest::default();

    // When
    let query = request.validate(DEFAULT_LIMIT).unwrap();

    // Then
    assert_that!(query.pagination.limit(), eq(50));
    assert_that!(query.pagination.offset(), eq(0));
    assert_that!(query.filter.item_type, none());
    assert_that!(query.filter.status, none());
    assert_that!(query.filter.parent_id, none());
    assert_that!(query.filter.include_deleted, eq(false));
}

#[test]
fn given_configured_default_limit_when_limit_omitted_then_configured_value_used() {
    let query = ListWorkItemsRequest::default().validate(25).unwrap();
    assert_that!(query.pagination.limit(), eq(25));
}

#[test]
fn given_limit_zero_when_validated_then_rejected_on_limit() {
    let request = ListWorkItemsRequest {
        limit: Some(0),
        ..Default::default()
    };

    assert_that!(field_of(&request), some(eq("limit")));
}

#[test]
fn given_limit_over_max_when_validated_then_rejected_not_clamped() {
    let request = ListWorkItemsRequest {
        limit: Some(101),
        ..Default::default()
    };

    let err = request.validate(DEFAULT_LIMIT).unwrap_err();

    assert_that!(err.field(), some(eq("limit")));
    assert_that!(err.to_string(), contains_substring("got 101"));
}

#[test]
fn given_limit_at_bounds_when_validated_then_accepted() {
    for limit in [1, 100] {
        let request = ListWorkItemsRequest {
            limit: Some(limit),
            ..Default::default()
        };
        assert_that!(request.validate(DEFAULT_LIMIT), ok(anything()));
    }
}

#[test]
fn given_negative_offset_when_validated_then_rejected_on_offset() {
    let request = ListWorkItemsRequest {
        offset: Some(-1),
        ..Default::default()
    };

    assert_that!(field_of(&request), some(eq("offset")));
}

#[test]
fn given_unknown_item_type_when_validated_then_rejected_on_item_type() {
    let request = ListWorkItemsRequest {
        item_type: Some("bug".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        request.validate(DEFAULT_LIMIT),
        Err(CoreError::InvalidWorkItemType { .. })
    ));
}

#[test]
fn given_unknown_status_when_validated_then_rejected_on_status() {
    let request = ListWorkItemsRequest {
        status: Some("done".to_string()),
        ..Default::default()
    };

    assert_that!(field_of(&request), some(eq("status")));
}

#[test]
fn given_malformed_parent_id_when_validated_then_rejected_on_parent_id() {
    let request = ListWorkItemsRequest {
        parent_id: Some("not-a-uuid".to_string()),
        ..Default::default()
    };

    assert_that!(field_of(&request), some(eq("parent_id")));
}

#[test]
fn given_all_filters_when_validated_then_parsed_into_query() {
    // Given
    let parent = Uuid::new_v4();
    let request = ListWorkItemsRequest {
        item_type: Some("research".to_string()),
        status: Some("blocked".to_string()),
        parent_id: Some(parent.to_string()),
        include_deleted: Some(true),
        limit: Some(10),
        offset: Some(20),
    };

    // When
    let query = request.validate(DEFAULT_LIMIT).unwrap();

    // Then
    assert_that!(query.filter.item_type, some(eq(WorkItemType::Research)));
    assert_that!(query.filter.status, some(eq(WorkItemStatus::Blocked)));
    assert_that!(query.filter.parent_id, some(eq(parent)));
    assert_that!(query.filter.include_deleted, eq(true));
    assert_that!(query.pagination.limit(), eq(10));
    assert_that!(query.pagination.offset(), eq(20));
}

#[test]
fn given_json_with_unknown_fields_absent_when_deserialized_then_all_optional() {
    let request: ListWorkItemsRequest = serde_json::from_str(r#"{"limit": 5}"#).unwrap();

    assert_that!(request.limit, some(eq(5)));
    assert_that!(request.item_type, none());
}
