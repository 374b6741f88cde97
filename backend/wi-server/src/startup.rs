use crate::error::Result as ServerErrorResult;

use wi_config::Config;
use wi_mcp::{McpServer, ToolRouter};

use std::path::Path;
use std::sync::Arc;

use log::info;

/// Open the database at `database_path`, apply migrations and wire the
/// tool router into an MCP server.
pub async fn build_server(config: Config, database_path: &Path) -> ServerErrorResult<McpServer> {
    info!("Connecting to database: {}", database_path.display());
    let pool = wi_db::open_pool(database_path, config.database.max_connections).await?;
    info!("Database ready");

    let max_body_bytes = config.server.max_body_bytes;
    let router = ToolRouter::new(pool, Arc::new(config));
    info!("Registered {} tools", router.list_tools().len());

    Ok(McpServer::new(router, max_body_bytes))
}
