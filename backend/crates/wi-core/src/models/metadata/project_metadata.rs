use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 1000;

/// Metadata for `project` work items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub description: String,
    /// Target completion quarter in `YYYY-Q#` form
    #[serde(default)]
    pub target_quarter: Option<String>,
    #[serde(default)]
    pub constitutional_principles: Vec<String>,
}

impl ProjectMetadata {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.description.chars().count() > MAX_PROJECT_DESCRIPTION_LENGTH {
            return Err(CoreError::InvalidMetadata {
                item_type: "project",
                message: format!(
                    "description exceeds {} characters",
                    MAX_PROJECT_DESCRIPTION_LENGTH
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(quarter) = &self.target_quarter
            && !is_quarter(quarter)
        {
            return Err(CoreError::InvalidMetadata {
                item_type: "project",
                message: format!("target_quarter must match YYYY-Q[1-4], got '{}'", quarter),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

fn is_quarter(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && &bytes[4..6] == b"-Q"
        && (b'1'..=b'4').contains(&bytes[6])
}
