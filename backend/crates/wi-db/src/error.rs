use error_location::ErrorLocation;

use std::panic::Location;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid value in work_items.{column}: {message} {location}")]
    InvalidRow {
        column: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Work item not found: {id} {location}")]
    NotFound { id: Uuid, location: ErrorLocation },

    #[error(
        "Version conflict on {id}: expected {expected_version}, current {current_version} {location}"
    )]
    VersionConflict {
        id: Uuid,
        expected_version: i32,
        current_version: i32,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
