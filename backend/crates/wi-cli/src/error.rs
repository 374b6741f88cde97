use wi_config::ConfigError;
use wi_contract::{ContractFailure, HarnessError};
use wi_db::DbError;
use wi_mcp::ToolError;

use error_location::ErrorLocation;
use std::panic::Location;
use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: DbError,
    },

    #[error("Fixture seeding failed: {source}")]
    Harness {
        #[from]
        source: HarnessError,
    },

    #[error("{message} (code {code})")]
    Tool { code: i64, message: String },

    #[error("{source}")]
    Contract {
        #[from]
        source: ContractFailure,
    },

    #[error("{message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn output<S: Into<String>>(message: S) -> Self {
        Self::Output {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Process exit code: 1 for contract violations, 2 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Contract { .. } => 1,
            _ => 2,
        }
    }
}

impl From<ToolError> for CliError {
    fn from(err: ToolError) -> Self {
        Self::Tool {
            code: err.code(),
            message: err.client_message(),
        }
    }
}

pub type Result<T> = StdResult<T, CliError>;
