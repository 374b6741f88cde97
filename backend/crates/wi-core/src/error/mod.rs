use crate::ErrorLocation;

use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid work item type: {value} {location}")]
    InvalidWorkItemType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid work item status: {value} {location}")]
    InvalidWorkItemStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid {item_type} metadata: {message} {location}")]
    InvalidMetadata {
        item_type: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot create child: parent depth {parent_depth} is at maximum {location}")]
    DepthExceeded {
        parent_depth: i32,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error for a named input field
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &'static str, message: S) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Name of the input field that caused the error, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::Validation { field, .. } => Some(field),
            CoreError::InvalidWorkItemType { .. } => Some("item_type"),
            CoreError::InvalidWorkItemStatus { .. } => Some("status"),
            CoreError::InvalidMetadata { .. } => Some("metadata"),
            CoreError::DepthExceeded { .. } => Some("parent_id"),
            CoreError::Uuid { .. } => None,
        }
    }
}

impl From<uuid::Error> for CoreError {
    #[track_caller]
    fn from(source: uuid::Error) -> Self {
        Self::Uuid {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
