use crate::{InputValidator, Result as ToolErrorResult, ToolDefinition, ToolError};

use wi_config::Config;
use wi_core::{WorkItemDto, WorkItemMetadata, WorkItemStatus};
use wi_db::WorkItemRepository;

use std::str::FromStr;

use chrono::{SubsecRound, Utc};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkItemArgs {
    pub id: String,
    /// Version the caller last read
    pub version: i64,
    pub updated_by: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    /// RFC 3339 timestamp or `NOW()`; sets the soft-delete marker
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub commit_hash: Option<String>,
    #[serde(default)]
    pub pr_number: Option<i64>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "update_work_item".to_string(),
        description: "Partially update a work item with optimistic locking. \
                      Fails with a conflict when version is stale. \
                      Set deleted_at to 'NOW()' to soft delete."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "version": { "type": "integer", "minimum": 1 },
                "updated_by": { "type": "string" },
                "title": { "type": "string", "minLength": 1, "maxLength": wi_core::MAX_TITLE_LENGTH },
                "status": { "type": "string", "enum": ["active", "completed", "blocked"] },
                "metadata": { "type": "object" },
                "deleted_at": { "type": "string" },
                "commit_hash": { "type": "string", "pattern": "^[a-f0-9]{40}$" },
                "pr_number": { "type": "integer", "minimum": 1 }
            },
            "required": ["id", "version", "updated_by"]
        }),
    }
}

pub async fn execute(
    pool: &SqlitePool,
    config: &Config,
    args: UpdateWorkItemArgs,
) -> ToolErrorResult<WorkItemDto> {
    let id = InputValidator::validate_uuid(&args.id, "id")?;
    let expected_version = InputValidator::validate_version(args.version)?;
    InputValidator::validate_client_id(&args.updated_by, "updated_by")?;

    let mut work_item = WorkItemRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ToolError::not_found(format!("Work item not found: {}", id)))?;

    let now = Utc::now().trunc_subsecs(3);
    let mut changed = Vec::new();

    if let Some(title) = args.title {
        InputValidator::validate_title(&title, config.validation.max_title_length)?;
        work_item.title = title;
        changed.push("title");
    }
    if let Some(status) = args.status {
        work_item.status = WorkItemStatus::from_str(&status)?;
        changed.push("status");
    }
    if let Some(metadata) = args.metadata {
        work_item.metadata = WorkItemMetadata::parse(work_item.item_type, &metadata)?.to_value();
        changed.push("metadata");
    }
    if let Some(deleted_at) = args.deleted_at {
        work_item.deleted_at = Some(InputValidator::parse_deleted_at(&deleted_at, now)?);
        changed.push("deleted_at");
    }
    if let Some(commit_hash) = args.commit_hash {
        InputValidator::validate_commit_hash(&commit_hash)?;
        work_item.commit_hash = Some(commit_hash);
        changed.push("commit_hash");
    }
    if let Some(pr_number) = args.pr_number {
        work_item.pr_number = Some(InputValidator::validate_pr_number(pr_number)?);
        changed.push("pr_number");
    }
    work_item.updated_at = now;

    let updated = WorkItemRepository::update(pool, &work_item, expected_version).await?;

    info!(
        "Work item {} updated by {}: version {} -> {}, fields {:?}",
        id, args.updated_by, expected_version, updated.version, changed
    );

    Ok(WorkItemDto::from(updated))
}
