use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const MAX_HOURS: f64 = 1000.0;
pub const MAX_BLOCKED_REASON_LENGTH: usize = 500;

/// Metadata for `task` work items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskMetadata {
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub blocked_reason: Option<String>,
}

impl TaskMetadata {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        for (name, hours) in [
            ("estimated_hours", self.estimated_hours),
            ("actual_hours", self.actual_hours),
        ] {
            if let Some(hours) = hours
                && !(0.0..=MAX_HOURS).contains(&hours)
            {
                return Err(CoreError::InvalidMetadata {
                    item_type: "task",
                    message: format!("{} must be 0-{}, got {}", name, MAX_HOURS, hours),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if let Some(reason) = &self.blocked_reason
            && reason.chars().count() > MAX_BLOCKED_REASON_LENGTH
        {
            return Err(CoreError::InvalidMetadata {
                item_type: "task",
                message: format!(
                    "blocked_reason exceeds {} characters",
                    MAX_BLOCKED_REASON_LENGTH
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
