use crate::{
    CoreError, ProjectMetadata, ResearchMetadata, Result as CoreErrorResult, SessionMetadata,
    TaskMetadata, WorkItemType,
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Type-specific metadata, one variant per `WorkItemType`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WorkItemMetadata {
    Project(ProjectMetadata),
    Session(SessionMetadata),
    Task(TaskMetadata),
    Research(ResearchMetadata),
}

impl WorkItemMetadata {
    /// Parse raw JSON metadata for the given item type and validate its fields.
    #[track_caller]
    pub fn parse(item_type: WorkItemType, value: &serde_json::Value) -> CoreErrorResult<Self> {
        let metadata = match item_type {
            WorkItemType::Project => Self::Project(decode(item_type, value)?),
            WorkItemType::Session => Self::Session(decode(item_type, value)?),
            WorkItemType::Task => Self::Task(decode(item_type, value)?),
            WorkItemType::Research => Self::Research(decode(item_type, value)?),
        };

        metadata.validate()?;
        Ok(metadata)
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        match self {
            Self::Project(m) => m.validate(),
            Self::Session(m) => m.validate(),
            Self::Task(m) => m.validate(),
            Self::Research(m) => m.validate(),
        }
    }

    /// JSON form stored alongside the work item
    pub fn to_value(&self) -> serde_json::Value {
        // Plain structs of strings, numbers and maps always serialize
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[track_caller]
fn decode<T: DeserializeOwned>(
    item_type: WorkItemType,
    value: &serde_json::Value,
) -> CoreErrorResult<T> {
    let location = ErrorLocation::from(Location::caller());
    T::deserialize(value).map_err(|e| CoreError::InvalidMetadata {
        item_type: item_type.as_str(),
        message: e.to_string(),
        location,
    })
}
