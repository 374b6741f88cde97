use wi_core::CoreError;
use wi_db::DbError;

use error_location::ErrorLocation;
use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Fixture error: {message} {location}")]
    Fixture {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid fixture item: {source} {location}")]
    Core {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Database error while seeding: {source} {location}")]
    Database {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl HarnessError {
    #[track_caller]
    pub fn fixture<S: Into<String>>(message: S) -> Self {
        Self::Fixture {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for HarnessError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for HarnessError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Database {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for HarnessError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Database {
            source: DbError::from(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, HarnessError>;
