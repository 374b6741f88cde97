use crate::{PaginatedWorkItems, WorkItemDto};

use serde::{Deserialize, Serialize};

/// Output of the `list_work_items` tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWorkItemsResponse {
    pub items: Vec<WorkItemDto>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl From<PaginatedWorkItems> for ListWorkItemsResponse {
    fn from(page: PaginatedWorkItems) -> Self {
        Self {
            items: page.items.into_iter().map(WorkItemDto::from).collect(),
            total_count: page.total_count,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more,
        }
    }
}
