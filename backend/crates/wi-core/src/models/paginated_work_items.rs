use crate::{Pagination, WorkItem};

/// One page of work items plus the count of all matches
#[derive(Debug, Clone)]
pub struct PaginatedWorkItems {
    pub items: Vec<WorkItem>,
    /// Number of items matching the filter, ignoring pagination
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PaginatedWorkItems {
    pub fn new(items: Vec<WorkItem>, total_count: i64, pagination: Pagination) -> Self {
        let offset = pagination.offset();
        let has_more = offset + (items.len() as i64) < total_count;

        Self {
            items,
            total_count,
            limit: pagination.limit(),
            offset,
            has_more,
        }
    }

    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), 0, pagination)
    }
}
