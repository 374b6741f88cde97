pub mod create_work_item;
pub mod list_work_items;
pub mod query_work_item;
pub mod update_work_item;

use crate::ToolError;

use error_location::ErrorLocation;

use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tools served by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListWorkItems,
    CreateWorkItem,
    UpdateWorkItem,
    QueryWorkItem,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::ListWorkItems,
        ToolName::CreateWorkItem,
        ToolName::UpdateWorkItem,
        ToolName::QueryWorkItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListWorkItems => "list_work_items",
            Self::CreateWorkItem => "create_work_item",
            Self::UpdateWorkItem => "update_work_item",
            Self::QueryWorkItem => "query_work_item",
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        match self {
            Self::ListWorkItems => list_work_items::definition(),
            Self::CreateWorkItem => create_work_item::definition(),
            Self::UpdateWorkItem => update_work_item::definition(),
            Self::QueryWorkItem => query_work_item::definition(),
        }
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool {
                name: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tool metadata advertised through `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool arguments
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Definitions of every served tool
pub fn definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.iter().map(ToolName::definition).collect()
}
