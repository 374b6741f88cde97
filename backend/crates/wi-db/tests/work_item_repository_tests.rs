mod common;

use common::{create_test_child, create_test_pool, create_test_work_item, seed_items};

use wi_core::{
    Pagination, WorkItemFilter, WorkItemStatus, WorkItemType,
};
use wi_db::{DbError, WorkItemRepository};

use std::collections::HashSet;

use chrono::{SubsecRound, Utc};
use googletest::prelude::*;
use uuid::Uuid;

fn page(limit: i64, offset: i64) -> Pagination {
    Pagination::new(limit, offset).unwrap()
}

#[tokio::test]
async fn given_valid_work_item_when_created_then_can_be_found_by_id() {
    // Given
    let pool = create_test_pool().await;
    let work_item = create_test_work_item(WorkItemType::Project);

    // When
    WorkItemRepository::create(&pool, &work_item).await.unwrap();

    // Then
    let found = WorkItemRepository::find_by_id(&pool, work_item.id)
        .await
        .unwrap();
    assert_that!(found, some(eq(&work_item)));
}

#[tokio::test]
async fn given_empty_database_when_finding_nonexistent_id_then_returns_none() {
    let pool = create_test_pool().await;

    let result = WorkItemRepository::find_by_id(&pool, Uuid::new_v4())
        .await
        .unwrap();

    assert_that!(result, none());
}

#[tokio::test]
async fn given_current_version_when_updated_then_version_bumped_and_persisted() {
    // Given
    let pool = create_test_pool().await;
    let mut work_item = create_test_work_item(WorkItemType::Task);
    WorkItemRepository::create(&pool, &work_item).await.unwrap();

    // When
    work_item.title = "Updated Title".to_string();
    work_item.status = WorkItemStatus::Completed;
    let updated = WorkItemRepository::update(&pool, &work_item, 1)
        .await
        .unwrap();

    // Then
    assert_that!(updated.version, eq(2));
    let found = WorkItemRepository::find_by_id(&pool, work_item.id)
        .await
        .unwrap()
        .unwrap();
    assert_that!(found.title, eq("Updated Title"));
    assert_that!(found.status, eq(WorkItemStatus::Completed));
    assert_that!(found.version, eq(2));
}

#[tokio::test]
async fn given_stale_version_when_updated_then_version_conflict_with_current() {
    // Given
    let pool = create_test_pool().await;
    let work_item = create_test_work_item(WorkItemType::Task);
    WorkItemRepository::create(&pool, &work_item).await.unwrap();
    WorkItemRepository::update(&pool, &work_item, 1).await.unwrap();

    // When
    let result = WorkItemRepository::update(&pool, &work_item, 1).await;

    // Then
    match result {
        Err(DbError::VersionConflict {
            expected_version,
            current_version,
            ..
        }) => {
            assert_that!(expected_version, eq(1));
            assert_that!(current_version, eq(2));
        }
        other => panic!("expected VersionConflict, got {:?}", other),
    }
}

#[tokio::test]
async fn given_missing_item_when_updated_then_not_found() {
    let pool = create_test_pool().await;
    let work_item = create_test_work_item(WorkItemType::Task);

    let result = WorkItemRepository::update(&pool, &work_item, 1).await;

    assert!(matches!(result, Err(DbError::NotFound { id, .. }) if id == work_item.id));
}

#[tokio::test]
async fn given_live_item_when_soft_deleted_then_hidden_from_default_list() {
    // Given
    let pool = create_test_pool().await;
    let work_item = create_test_work_item(WorkItemType::Research);
    WorkItemRepository::create(&pool, &work_item).await.unwrap();

    // When
    let deleted = WorkItemRepository::soft_delete(&pool, work_item.id, Utc::now())
        .await
        .unwrap();

    // Then
    assert_that!(deleted, eq(true));
    let live = WorkItemRepository::list(&pool, &WorkItemFilter::default(), page(50, 0))
        .await
        .unwrap();
    assert_that!(live.items, is_empty());
    assert_that!(live.total_count, eq(0));

    let found = WorkItemRepository::find_by_id(&pool, work_item.id)
        .await
        .unwrap()
        .unwrap();
    assert_that!(found.is_deleted(), eq(true));
    assert_that!(found.version, eq(2));
}

#[tokio::test]
async fn given_deleted_item_when_soft_deleted_again_then_returns_false() {
    let pool = create_test_pool().await;
    let work_item = create_test_work_item(WorkItemType::Task);
    WorkItemRepository::create(&pool, &work_item).await.unwrap();
    WorkItemRepository::soft_delete(&pool, work_item.id, Utc::now())
        .await
        .unwrap();

    let again = WorkItemRepository::soft_delete(&pool, work_item.id, Utc::now())
        .await
        .unwrap();

    assert_that!(again, eq(false));
}

#[tokio::test]
async fn given_deleted_item_when_listed_with_include_deleted_then_included() {
    // Given
    let pool = create_test_pool().await;
    let mut work_item = create_test_work_item(WorkItemType::Task);
    work_item.deleted_at = Some(Utc::now().trunc_subsecs(3));
    WorkItemRepository::create(&pool, &work_item).await.unwrap();
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 2).await;

    // When
    let filter = WorkItemFilter {
        include_deleted: true,
        ..Default::default()
    };
    let result = WorkItemRepository::list(&pool, &filter, page(50, 0))
        .await
        .unwrap();

    // Then
    assert_that!(result.total_count, eq(3));
    let ids: Vec<Uuid> = result.items.iter().map(|i| i.id).collect();
    assert_that!(ids, contains(eq(&work_item.id)));
}

#[tokio::test]
async fn given_150_items_when_paging_at_offset_100_then_last_full_page_without_more() {
    // Given
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 150).await;

    // When
    let result = WorkItemRepository::list(&pool, &WorkItemFilter::default(), page(50, 100))
        .await
        .unwrap();

    // Then
    assert_that!(result.items, len(eq(50)));
    assert_that!(result.total_count, eq(150));
    assert_that!(result.has_more, eq(false));
}

#[tokio::test]
async fn given_150_items_when_paging_at_offset_140_then_partial_page() {
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 150).await;

    let result = WorkItemRepository::list(&pool, &WorkItemFilter::default(), page(50, 140))
        .await
        .unwrap();

    assert_that!(result.items, len(eq(10)));
    assert_that!(result.total_count, eq(150));
    assert_that!(result.has_more, eq(false));
}

#[tokio::test]
async fn given_150_items_when_paging_from_start_then_has_more() {
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 150).await;

    let result = WorkItemRepository::list(&pool, &WorkItemFilter::default(), page(50, 0))
        .await
        .unwrap();

    assert_that!(result.items, len(eq(50)));
    assert_that!(result.has_more, eq(true));
}

#[tokio::test]
async fn given_five_research_among_tasks_when_filtered_by_type_then_only_research() {
    // Given
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 20).await;
    seed_items(&pool, WorkItemType::Research, WorkItemStatus::Active, 5).await;

    // When
    let filter = WorkItemFilter {
        item_type: Some(WorkItemType::Research),
        ..Default::default()
    };
    let result = WorkItemRepository::list(&pool, &filter, page(50, 0))
        .await
        .unwrap();

    // Then
    assert_that!(result.items, len(eq(5)));
    assert_that!(result.total_count, eq(5));
    assert_that!(result.has_more, eq(false));
    assert!(
        result
            .items
            .iter()
            .all(|i| i.item_type == WorkItemType::Research)
    );
}

#[tokio::test]
async fn given_mixed_statuses_when_filtered_by_status_then_only_matching() {
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 4).await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Blocked, 3).await;

    let filter = WorkItemFilter {
        status: Some(WorkItemStatus::Blocked),
        ..Default::default()
    };
    let result = WorkItemRepository::list(&pool, &filter, page(50, 0))
        .await
        .unwrap();

    assert_that!(result.total_count, eq(3));
    assert!(
        result
            .items
            .iter()
            .all(|i| i.status == WorkItemStatus::Blocked)
    );
}

#[tokio::test]
async fn given_parent_with_children_when_filtered_by_parent_then_only_children() {
    // Given
    let pool = create_test_pool().await;
    let parent = create_test_work_item(WorkItemType::Project);
    WorkItemRepository::create(&pool, &parent).await.unwrap();
    for _ in 0..3 {
        let child = create_test_child(&parent, WorkItemType::Session);
        WorkItemRepository::create(&pool, &child).await.unwrap();
    }
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 2).await;

    // When
    let filter = WorkItemFilter {
        parent_id: Some(parent.id),
        ..Default::default()
    };
    let result = WorkItemRepository::list(&pool, &filter, page(50, 0))
        .await
        .unwrap();

    // Then
    assert_that!(result.items, len(eq(3)));
    assert!(result.items.iter().all(|i| i.parent_id == Some(parent.id)));
}

#[tokio::test]
async fn given_no_match_when_listed_then_empty_page() {
    let pool = create_test_pool().await;
    seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 3).await;

    let filter = WorkItemFilter {
        item_type: Some(WorkItemType::Project),
        ..Default::default()
    };
    let result = WorkItemRepository::list(&pool, &filter, page(50, 0))
        .await
        .unwrap();

    assert_that!(result.items, is_empty());
    assert_that!(result.total_count, eq(0));
    assert_that!(result.has_more, eq(false));
}

#[tokio::test]
async fn given_items_when_walking_all_pages_then_newest_first_without_duplicates() {
    // Given
    let pool = create_test_pool().await;
    let seeded = seed_items(&pool, WorkItemType::Task, WorkItemStatus::Active, 23).await;

    // When
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let result = WorkItemRepository::list(&pool, &WorkItemFilter::default(), page(10, offset))
            .await
            .unwrap();
        assert_that!(result.items.len() as i64, le(10));
        seen.extend(result.items.iter().map(|i| i.id));
        if !result.has_more {
            break;
        }
        offset += 10;
    }

    // Then
    let expected: Vec<Uuid> = seeded.iter().map(|i| i.id).collect();
    assert_that!(seen, eq(&expected));
    let unique: HashSet<Uuid> = seen.iter().copied().collect();
    assert_that!(unique.len(), eq(23));
}

#[tokio::test]
async fn given_three_level_hierarchy_when_querying_relatives_then_ancestors_and_descendants() {
    // Given
    let pool = create_test_pool().await;
    let project = create_test_work_item(WorkItemType::Project);
    let session = create_test_child(&project, WorkItemType::Session);
    let task = create_test_child(&session, WorkItemType::Task);
    for item in [&project, &session, &task] {
        WorkItemRepository::create(&pool, item).await.unwrap();
    }

    // When
    let ancestors = WorkItemRepository::find_ancestors(&pool, &task)
        .await
        .unwrap();
    let descendants = WorkItemRepository::find_descendants(&pool, &project, 5)
        .await
        .unwrap();
    let shallow = WorkItemRepository::find_descendants(&pool, &project, 1)
        .await
        .unwrap();

    // Then
    let ancestor_ids: Vec<Uuid> = ancestors.iter().map(|i| i.id).collect();
    assert_that!(ancestor_ids, eq(&vec![project.id, session.id]));
    let descendant_ids: Vec<Uuid> = descendants.iter().map(|i| i.id).collect();
    assert_that!(descendant_ids, eq(&vec![session.id, task.id]));
    assert_that!(shallow, len(eq(1)));
}

#[tokio::test]
async fn given_root_item_when_finding_ancestors_then_empty() {
    let pool = create_test_pool().await;
    let root = create_test_work_item(WorkItemType::Project);
    WorkItemRepository::create(&pool, &root).await.unwrap();

    let ancestors = WorkItemRepository::find_ancestors(&pool, &root)
        .await
        .unwrap();

    assert_that!(ancestors, is_empty());
}
