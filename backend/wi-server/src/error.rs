use error_location::ErrorLocation;
use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] wi_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] wi_db::DbError),

    #[error("MCP transport error: {0}")]
    Transport(#[from] wi_mcp::McpServerError),

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl ServerError {
    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
