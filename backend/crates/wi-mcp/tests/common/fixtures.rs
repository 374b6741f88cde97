#![allow(dead_code)]

use wi_core::WorkItemType;
use wi_mcp::ToolRouter;

use serde_json::{Value, json};

pub fn metadata_for(item_type: WorkItemType) -> Value {
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

/// Creates an item through `create_work_item` and returns the response body
pub async fn create_item(router: &ToolRouter, item_type: WorkItemType, parent: Option<&str>) -> Value {
    let mut args = json!({
        "item_type": item_type.as_str(),
        "title": format!("Test {}", item_type),
        "metadata": metadata_for(item_type),
    });
    if let Some(parent_id) = parent {
        args["parent_id"] = json!(parent_id);
    }

    router
        .call_tool("create_work_item", args)
        .await
        .expect("create_work_item failed")
}

pub fn id_of(item: &Value) -> String {
    item["id"].as_str().expect("id").to_string()
}

pub async fn soft_delete(router: &ToolRouter, item: &Value) -> Value {
    router
        .call_tool(
            "update_work_item",
            json!({
                "id": item["id"],
                "version": item["version"],
                "updated_by": "test-client",
                "deleted_at": "NOW()"
            }),
        )
        .await
        .expect("soft delete failed")
}
