use crate::{Result as ToolErrorResult, ToolDefinition};

use wi_config::Config;
use wi_core::{
    ListWorkItemsRequest, ListWorkItemsResponse, MAX_LIMIT, MIN_LIMIT, WorkItemStatus,
    WorkItemType,
};
use wi_db::WorkItemRepository;

use log::debug;
use serde_json::json;
use sqlx::SqlitePool;

pub fn definition() -> ToolDefinition {
    let item_types: Vec<&str> = WorkItemType::ALL.iter().map(|t| t.as_str()).collect();
    let statuses: Vec<&str> = WorkItemStatus::ALL.iter().map(|s| s.as_str()).collect();

    ToolDefinition {
        name: "list_work_items".to_string(),
        description: "List work items with optional filters and pagination. \
                      Soft-deleted items are excluded unless include_deleted is true. \
                      Results are ordered newest first."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "item_type": { "type": "string", "enum": item_types },
                "status": { "type": "string", "enum": statuses },
                "parent_id": { "type": "string", "format": "uuid" },
                "include_deleted": { "type": "boolean", "default": false },
                "limit": {
                    "type": "integer",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": wi_core::DEFAULT_LIMIT
                },
                "offset": { "type": "integer", "minimum": 0, "default": 0 }
            }
        }),
    }
}

/// Validate the request, then fetch one page plus the total match count.
pub async fn execute(
    pool: &SqlitePool,
    config: &Config,
    request: ListWorkItemsRequest,
) -> ToolErrorResult<ListWorkItemsResponse> {
    let query = request.validate(config.pagination.default_limit)?;

    debug!(
        "list_work_items filter={:?} limit={} offset={}",
        query.filter,
        query.pagination.limit(),
        query.pagination.offset()
    );

    let page = WorkItemRepository::list(pool, &query.filter, query.pagination).await?;

    Ok(ListWorkItemsResponse::from(page))
}
