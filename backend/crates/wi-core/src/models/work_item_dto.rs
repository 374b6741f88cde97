use crate::WorkItem;

use serde::{Deserialize, Serialize};

/// Work item DTO for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemDto {
    pub id: String,
    pub version: i32,
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub parent_id: Option<String>,
    pub path: String,
    pub depth: i32,
    pub branch_name: Option<String>,
    pub commit_hash: Option<String>,
    pub pr_number: Option<i32>,
    pub metadata: serde_json::Value,
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
}

impl From<WorkItem> for WorkItemDto {
    fn from(w: WorkItem) -> Self {
        Self {
            id: w.id.to_string(),
            version: w.version,
            item_type: w.item_type.as_str().to_string(),
            title: w.title,
            description: w.description,
            notes: w.notes,
            status: w.status.as_str().to_string(),
            parent_id: w.parent_id.map(|id| id.to_string()),
            path: w.path,
            depth: w.depth,
            branch_name: w.branch_name,
            commit_hash: w.commit_hash,
            pr_number: w.pr_number,
            metadata: w.metadata,
            deleted_at: w.deleted_at.map(|dt| dt.to_rfc3339()),
            created_at: w.created_at.to_rfc3339(),
            updated_at: w.updated_at.to_rfc3339(),
            created_by: w.created_by,
        }
    }
}
