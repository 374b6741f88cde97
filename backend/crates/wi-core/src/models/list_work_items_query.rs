use crate::{CoreError, MAX_LIMIT, MIN_LIMIT, Result as CoreErrorResult, WorkItemStatus, WorkItemType};

use uuid::Uuid;

/// Validated filter criteria for listing work items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkItemFilter {
    pub item_type: Option<WorkItemType>,
    pub status: Option<WorkItemStatus>,
    pub parent_id: Option<Uuid>,
    /// Include soft-deleted items (excluded by default)
    pub include_deleted: bool,
}

/// Validated page window. Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Pagination {
    #[track_caller]
    pub fn new(limit: i64, offset: i64) -> CoreErrorResult<Self> {
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
            return Err(CoreError::validation(
                "limit",
                format!(
                    "Limit must be between {} and {}, got {}",
                    MIN_LIMIT, MAX_LIMIT, limit
                ),
            ));
        }

        if offset < 0 {
            return Err(CoreError::validation(
                "offset",
                format!("Offset must be non-negative, got {}", offset),
            ));
        }

        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// A fully validated `list_work_items` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWorkItemsQuery {
    pub filter: WorkItemFilter,
    pub pagination: Pagination,
}
