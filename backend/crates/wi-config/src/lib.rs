mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod pagination_config;
mod performance_config;
mod server_config;
mod validation_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use pagination_config::PaginationConfig;
pub use performance_config::PerformanceConfig;
pub use server_config::ServerConfig;
pub use validation_config::ValidationConfig;

/// Environment variable naming the config directory
pub const CONFIG_DIR_ENV: &str = "WI_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".wi";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "work_items.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;
const MIN_DATABASE_MAX_CONNECTIONS: u32 = 1;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 64;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const MIN_MAX_BODY_BYTES: usize = 1024;
const MAX_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
