use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Kind of work item in the project/session/task/research hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemType {
    Project,
    Session,
    Task,
    Research,
}

impl WorkItemType {
    pub const ALL: [WorkItemType; 4] = [
        WorkItemType::Project,
        WorkItemType::Session,
        WorkItemType::Task,
        WorkItemType::Research,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Session => "session",
            Self::Task => "task",
            Self::Research => "research",
        }
    }
}

impl FromStr for WorkItemType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "project" => Ok(Self::Project),
            "session" => Ok(Self::Session),
            "task" => Ok(Self::Task),
            "research" => Ok(Self::Research),
            _ => Err(CoreError::InvalidWorkItemType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for WorkItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
