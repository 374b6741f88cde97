use crate::{InputValidator, Result as ToolErrorResult, ToolDefinition, ToolError};

use wi_config::Config;
use wi_core::{WorkItem, WorkItemDto, WorkItemMetadata, WorkItemType};
use wi_db::WorkItemRepository;

use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub const DEFAULT_CREATED_BY: &str = "mcp-client";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkItemArgs {
    pub item_type: String,
    pub title: String,
    pub metadata: Value,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default = "default_created_by")]
    pub created_by: String,
}

fn default_created_by() -> String {
    DEFAULT_CREATED_BY.to_string()
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "create_work_item".to_string(),
        description: "Create a project, session, task or research work item with \
                      type-specific metadata, optionally under a parent (max depth 5)."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "item_type": { "type": "string", "enum": ["project", "session", "task", "research"] },
                "title": { "type": "string", "minLength": 1, "maxLength": wi_core::MAX_TITLE_LENGTH },
                "metadata": { "type": "object" },
                "parent_id": { "type": "string", "format": "uuid" },
                "branch_name": { "type": "string", "maxLength": wi_core::MAX_BRANCH_NAME_LENGTH },
                "created_by": { "type": "string", "default": DEFAULT_CREATED_BY }
            },
            "required": ["item_type", "title", "metadata"]
        }),
    }
}

pub async fn execute(
    pool: &SqlitePool,
    config: &Config,
    args: CreateWorkItemArgs,
) -> ToolErrorResult<WorkItemDto> {
    InputValidator::validate_title(&args.title, config.validation.max_title_length)?;
    InputValidator::validate_client_id(&args.created_by, "created_by")?;
    if let Some(branch_name) = &args.branch_name {
        InputValidator::validate_branch_name(branch_name)?;
    }

    let item_type = WorkItemType::from_str(&args.item_type)?;
    let metadata = WorkItemMetadata::parse(item_type, &args.metadata)?;

    let parent = match &args.parent_id {
        None => None,
        Some(raw) => {
            let parent_id = InputValidator::validate_uuid(raw, "parent_id")?;
            let parent = WorkItemRepository::find_by_id(pool, parent_id)
                .await?
                .filter(|p| !p.is_deleted())
                .ok_or_else(|| {
                    ToolError::not_found(format!("Parent work item not found: {}", parent_id))
                })?;
            Some(parent)
        }
    };

    let mut work_item = WorkItem::new(
        item_type,
        args.title,
        metadata.to_value(),
        parent.as_ref(),
        args.created_by,
    )?;
    work_item.branch_name = args.branch_name;

    WorkItemRepository::create(pool, &work_item).await?;

    Ok(WorkItemDto::from(work_item))
}
