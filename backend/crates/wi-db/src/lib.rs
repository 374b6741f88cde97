pub mod connection;
pub mod error;
pub mod repositories;


pub use connection::{MIGRATOR, open_in_memory, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::work_item_repository::WorkItemRepository;
