#![allow(dead_code)]

use chrono::{Duration, SubsecRound, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use wi_core::{WorkItem, WorkItemStatus, WorkItemType};
use wi_db::WorkItemRepository;

pub fn metadata_for(item_type: WorkItemType) -> serde_json::Value {
    match item_type {
        WorkItemType::Project => json!({ "description": "Test project" }),
        WorkItemType::Session => json!({
            "token_budget": 200000,
            "prompts_count": 0,
            "yaml_frontmatter": {}
        }),
        WorkItemType::Task => json!({ "estimated_hours": 2.0 }),
        WorkItemType::Research => json!({ "research_questions": ["Why?"] }),
    }
}

/// Creates a root WorkItem with sensible defaults
pub fn create_test_work_item(item_type: WorkItemType) -> WorkItem {
    WorkItem::new(
        item_type,
        format!("Test {}", item_type),
        metadata_for(item_type),
        None,
        "test-client".to_string(),
    )
    .expect("valid root work item")
}

/// Creates a child of `parent`
pub fn create_test_child(parent: &WorkItem, item_type: WorkItemType) -> WorkItem {
    WorkItem::new(
        item_type,
        format!("Child {}", item_type),
        metadata_for(item_type),
        Some(parent),
        "test-client".to_string(),
    )
    .expect("valid child work item")
}

/// Inserts `count` live root items of `item_type`, each one millisecond
/// older than the previous, and returns them newest first.
pub async fn seed_items(
    pool: &SqlitePool,
    item_type: WorkItemType,
    status: WorkItemStatus,
    count: usize,
) -> Vec<WorkItem> {
    let base = Utc::now().trunc_subsecs(3);
    let mut items = Vec::with_capacity(count);

    for i in 0..count {
        let mut item = create_test_work_item(item_type);
        item.status = status;
        item.created_at = base - Duration::milliseconds(i as i64);
        item.updated_at = item.created_at;
        WorkItemRepository::create(pool, &item)
            .await
            .expect("Failed to seed work item");
        items.push(item);
    }

    items
}
