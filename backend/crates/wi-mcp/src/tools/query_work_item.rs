use crate::{InputValidator, Result as ToolErrorResult, ToolDefinition, ToolError};

use wi_core::{MAX_DEPTH, WorkItem, WorkItemDto};
use wi_db::WorkItemRepository;

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Deserialize)]
pub struct QueryWorkItemArgs {
    pub id: String,
    #[serde(default = "default_include_children")]
    pub include_children: bool,
}

fn default_include_children() -> bool {
    true
}

/// Compact view of a relative in the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemSummary {
    pub id: String,
    pub title: String,
    pub item_type: String,
    pub status: String,
    pub depth: i32,
    pub path: String,
}

impl From<&WorkItem> for WorkItemSummary {
    fn from(w: &WorkItem) -> Self {
        Self {
            id: w.id.to_string(),
            title: w.title.clone(),
            item_type: w.item_type.as_str().to_string(),
            status: w.status.as_str().to_string(),
            depth: w.depth,
            path: w.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryWorkItemResponse {
    #[serde(flatten)]
    pub item: WorkItemDto,
    /// Root first
    pub ancestors: Vec<WorkItemSummary>,
    /// Live descendants, shallowest first
    pub descendants: Vec<WorkItemSummary>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "query_work_item".to_string(),
        description: "Fetch one work item by id, including soft-deleted items, \
                      with its ancestor chain and descendants up to 5 levels."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "include_children": { "type": "boolean", "default": true }
            },
            "required": ["id"]
        }),
    }
}

pub async fn execute(
    pool: &SqlitePool,
    args: QueryWorkItemArgs,
) -> ToolErrorResult<QueryWorkItemResponse> {
    let id = InputValidator::validate_uuid(&args.id, "id")?;

    let work_item = WorkItemRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ToolError::not_found(format!("Work item not found: {}", id)))?;

    let ancestors = WorkItemRepository::find_ancestors(pool, &work_item).await?;
    let descendants = if args.include_children {
        WorkItemRepository::find_descendants(pool, &work_item, MAX_DEPTH).await?
    } else {
        Vec::new()
    };

    Ok(QueryWorkItemResponse {
        ancestors: ancestors.iter().map(WorkItemSummary::from).collect(),
        descendants: descendants.iter().map(WorkItemSummary::from).collect(),
        item: WorkItemDto::from(work_item),
    })
}
