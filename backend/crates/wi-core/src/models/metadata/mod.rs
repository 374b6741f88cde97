mod project_metadata;
mod research_metadata;
mod session_metadata;
mod task_metadata;
mod work_item_metadata;

pub use project_metadata::ProjectMetadata;
pub use research_metadata::ResearchMetadata;
pub use session_metadata::SessionMetadata;
pub use task_metadata::TaskMetadata;
pub use work_item_metadata::WorkItemMetadata;
