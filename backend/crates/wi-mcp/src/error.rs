use crate::error_codes::{CONFLICT, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, NOT_FOUND};

use wi_core::{CoreError, MAX_DEPTH};
use wi_db::DbError;

use error_location::ErrorLocation;
use std::panic::Location;

use serde_json::{Value, json};
use thiserror::Error;

/// Message returned to clients in place of internal failure details
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Validation failed on {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid arguments for {tool}: {message} {location}")]
    InvalidArguments {
        tool: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown tool: {name} {location}")]
    UnknownTool {
        name: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} (current version: {current_version}) {location}")]
    Conflict {
        message: String,
        current_version: i32,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Database {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Serialization error: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl ToolError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i64 {
        match self {
            Self::Validation { .. } | Self::InvalidArguments { .. } => INVALID_PARAMS,
            Self::UnknownTool { .. } => METHOD_NOT_FOUND,
            Self::NotFound { .. } => NOT_FOUND,
            Self::Conflict { .. } => CONFLICT,
            Self::Database { .. } | Self::Serialization { .. } => INTERNAL_ERROR,
        }
    }

    /// Short label used in metric names
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::UnknownTool { .. } => "unknown_tool",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database { .. } | Self::Serialization { .. } => "internal",
        }
    }

    pub fn is_internal(&self) -> bool {
        self.code() == INTERNAL_ERROR
    }

    /// Message safe to send to clients. Never includes source locations,
    /// SQL or driver errors.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidArguments { tool, message, .. } => {
                format!("Invalid arguments for {}: {}", tool, message)
            }
            Self::UnknownTool { name, .. } => format!("Unknown tool: {}", name),
            Self::NotFound { message, .. } | Self::Conflict { message, .. } => message.clone(),
            Self::Database { .. } | Self::Serialization { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Structured `error.data` payload, when the failure has one
    pub fn data(&self) -> Option<Value> {
        match self {
            Self::Validation { field, .. } => Some(json!({ "field": field })),
            Self::Conflict {
                current_version, ..
            } => Some(json!({ "current_version": current_version })),
            _ => None,
        }
    }
}

impl From<CoreError> for ToolError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        let field = err.field().unwrap_or("arguments");
        let message = match &err {
            CoreError::Validation { message, .. } => message.clone(),
            CoreError::InvalidWorkItemType { value, .. } => format!(
                "Invalid item_type: {}. Must be one of project, session, task, research",
                value
            ),
            CoreError::InvalidWorkItemStatus { value, .. } => format!(
                "Invalid status: {}. Must be one of active, completed, blocked",
                value
            ),
            CoreError::InvalidMetadata {
                item_type, message, ..
            } => format!("Metadata validation failed for {}: {}", item_type, message),
            CoreError::DepthExceeded { parent_depth, .. } => format!(
                "Depth limit exceeded: parent is at depth {}, maximum is {}",
                parent_depth, MAX_DEPTH
            ),
            CoreError::Uuid { source, .. } => format!("Invalid UUID: {}", source),
        };

        Self::Validation {
            field,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for ToolError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DbError::NotFound { id, .. } => Self::NotFound {
                message: format!("Work item not found: {}", id),
                location,
            },
            DbError::VersionConflict {
                id,
                expected_version,
                current_version,
                ..
            } => Self::Conflict {
                message: format!(
                    "Version mismatch for {}: expected {}, current {}",
                    id, expected_version, current_version
                ),
                current_version,
                location,
            },
            source => Self::Database { source, location },
        }
    }
}

impl From<serde_json::Error> for ToolError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
