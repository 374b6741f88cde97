use wi_config::Config;
use wi_mcp::ToolRouter;

use std::sync::Arc;

/// Router over a fresh in-memory database with default settings
pub async fn create_test_router() -> ToolRouter {
    create_test_router_with(Config::default()).await
}

pub async fn create_test_router_with(config: Config) -> ToolRouter {
    let pool = wi_db::open_in_memory()
        .await
        .expect("Failed to create test pool");
    ToolRouter::new(pool, Arc::new(config))
}
