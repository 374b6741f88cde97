pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::list_work_items_query::{ListWorkItemsQuery, Pagination, WorkItemFilter};
pub use models::list_work_items_request::ListWorkItemsRequest;
pub use models::list_work_items_response::ListWorkItemsResponse;
pub use models::metadata::{
    ProjectMetadata, ResearchMetadata, SessionMetadata, TaskMetadata, WorkItemMetadata,
};
pub use models::paginated_work_items::PaginatedWorkItems;
pub use models::work_item::WorkItem;
pub use models::work_item_dto::WorkItemDto;
pub use models::work_item_status::WorkItemStatus;
pub use models::work_item_type::WorkItemType;

/// Smallest page size a caller may request
pub const MIN_LIMIT: i64 = 1;
/// Largest page size a caller may request
pub const MAX_LIMIT: i64 = 100;
/// Page size used when the caller omits `limit`
pub const DEFAULT_LIMIT: i64 = 50;

/// Deepest level a work item may sit at (root = 0)
pub const MAX_DEPTH: i32 = 5;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_PATH_LENGTH: usize = 500;
pub const MAX_BRANCH_NAME_LENGTH: usize = 100;
pub const MAX_CREATED_BY_LENGTH: usize = 100;
