use crate::{CoreError, MAX_DEPTH, WorkItem, WorkItemDto, WorkItemStatus, WorkItemType};

use chrono::Utc;
use googletest::prelude::*;
use serde_json::json;

fn root(item_type: WorkItemType) -> WorkItem {
    WorkItem::new(
        item_type,
        "Root".to_string(),
        json!({}),
        None,
        "test".to_string(),
    )
    .unwrap()
}

#[test]
fn given_no_parent_when_created_then_root_path_and_depth_zero() {
    // When
    let item = root(WorkItemType::Project);

    // Then
    assert_that!(item.depth, eq(0));
    assert_that!(item.parent_id, none());
    assert_that!(item.path, eq(&format!("/{}", item.id)));
    assert_that!(item.version, eq(1));
    assert_that!(item.status, eq(WorkItemStatus::Active));
    assert_that!(item.is_deleted(), eq(false));
}

#[test]
fn given_parent_when_child_created_then_path_extends_parent() {
    // Given
    let parent = root(WorkItemType::Project);

    // When
    let child = WorkItem::new(
        WorkItemType::Session,
        "Child".to_string(),
        json!({}),
        Some(&parent),
        "test".to_string(),
    )
    .unwrap();

    // Then
    assert_that!(child.depth, eq(1));
    assert_that!(child.parent_id, some(eq(parent.id)));
    assert_that!(child.path, eq(&format!("{}/{}", parent.path, child.id)));
}

#[test]
fn given_parent_at_max_depth_when_child_created_then_depth_exceeded() {
    // Given
    let mut parent = root(WorkItemType::Task);
    parent.depth = MAX_DEPTH;

    // When
    let result = WorkItem::new(
        WorkItemType::Task,
        "Too deep".to_string(),
        json!({}),
        Some(&parent),
        "test".to_string(),
    );

    // Then
    assert!(matches!(
        result,
        Err(CoreError::DepthExceeded { parent_depth, .. }) if parent_depth == MAX_DEPTH
    ));
}

#[test]
fn given_deleted_item_when_converted_to_dto_then_deleted_at_is_rfc3339() {
    // Given
    let mut item = root(WorkItemType::Research);
    item.deleted_at = Some(Utc::now());

    // When
    let dto = WorkItemDto::from(item.clone());

    // Then
    assert_that!(item.is_deleted(), eq(true));
    assert_that!(dto.item_type, eq("research"));
    assert_that!(dto.status, eq("active"));
    let deleted_at = dto.deleted_at.unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&deleted_at).is_ok());
}
