pub mod error;
pub mod error_codes;
pub mod metrics;
pub mod metrics_timer;
pub mod router;
pub mod server;
pub mod tools;
pub mod validator;


pub use error::{Result, ToolError};
pub use self::metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use router::ToolRouter;
pub use server::{Framing, McpServer, McpServerError};
pub use tools::{ToolDefinition, ToolName};
pub use validator::InputValidator;

/// MCP protocol revision announced in `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "wi-server";
