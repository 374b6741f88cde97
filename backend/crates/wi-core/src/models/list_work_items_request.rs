use crate::{
    CoreError, ListWorkItemsQuery, Pagination, Result as CoreErrorResult, WorkItemFilter,
    WorkItemStatus, WorkItemType,
};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw arguments of the `list_work_items` tool, as sent by the client.
///
/// Numeric fields are signed so that out-of-range values (`limit=0`,
/// `offset=-1`) reach `validate` and are rejected with a field-specific error
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListWorkItemsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl ListWorkItemsRequest {
    /// Validate every field, applying `default_limit` when `limit` is absent.
    #[track_caller]
    pub fn validate(&self, default_limit: i64) -> CoreErrorResult<ListWorkItemsQuery> {
        let pagination = Pagination::new(
            self.limit.unwrap_or(default_limit),
            self.offset.unwrap_or(0),
        )?;

        let item_type = self
            .item_type
            .as_deref()
            .map(WorkItemType::from_str)
            .transpose()?;

        let status = self
            .status
            .as_deref()
            .map(WorkItemStatus::from_str)
            .transpose()?;

        let parent_id = self
            .parent_id
            .as_deref()
            .map(|raw| {
                Uuid::parse_str(raw).map_err(|_| {
                    CoreError::validation("parent_id", format!("Invalid parent_id format: {}", raw))
                })
            })
            .transpose()?;

        Ok(ListWorkItemsQuery {
            filter: WorkItemFilter {
                item_type,
                status,
                parent_id,
                include_deleted: self.include_deleted.unwrap_or(false),
            },
            pagination,
        })
    }
}
