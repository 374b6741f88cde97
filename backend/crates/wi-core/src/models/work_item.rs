use crate::models::{work_item_status::WorkItemStatus, work_item_type::WorkItemType};
use crate::{CoreError, MAX_DEPTH, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, SubsecRound, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkItem {
    pub id: Uuid,
    /// Optimistic locking version, starts at 1
    pub version: i32,
    pub item_type: WorkItemType,

    // Core fields
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,

    // Workflow
    pub status: WorkItemStatus,

    // Hierarchy
    pub parent_id: Option<Uuid>,
    /// Materialized path of ancestor ids ending with this item, e.g. `/a/b/c`
    pub path: String,
    pub depth: i32,

    // Git
    pub branch_name: Option<String>,
    pub commit_hash: Option<String>,
    pub pr_number: Option<i32>,

    /// Type-specific metadata, validated through `WorkItemMetadata`
    pub metadata: serde_json::Value,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl WorkItem {
    /// Build a new work item, deriving `path` and `depth` from the parent.
    #[track_caller]
    pub fn new(
        item_type: WorkItemType,
        title: String,
        metadata: serde_json::Value,
        parent: Option<&WorkItem>,
        created_by: String,
    ) -> CoreErrorResult<Self> {
        let id = Uuid::new_v4();

        let (parent_id, path, depth) = match parent {
            None => (None, format!("/{}", id), 0),
            Some(parent) => {
                if parent.depth >= MAX_DEPTH {
                    return Err(CoreError::DepthExceeded {
                        parent_depth: parent.depth,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                (
                    Some(parent.id),
                    format!("{}/{}", parent.path, id),
                    parent.depth + 1,
                )
            }
        };

        // Stored with millisecond precision
        let now = Utc::now().trunc_subsecs(3);
        Ok(Self {
            id,
            version: 1,
            item_type,
            title,
            description: None,
            notes: None,
            status: WorkItemStatus::Active,
            parent_id,
            path,
            depth,
            branch_name: None,
            commit_hash: None,
            pr_number: None,
            metadata,
            created_at: now,
            updated_at: now,
            created_by,
            deleted_at: None,
        })
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
