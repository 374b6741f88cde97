use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const MAX_FINDINGS_SUMMARY_LENGTH: usize = 2000;

/// Metadata for `research` work items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResearchMetadata {
    #[serde(default)]
    pub research_questions: Vec<String>,
    #[serde(default)]
    pub findings_summary: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl ResearchMetadata {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if let Some(summary) = &self.findings_summary
            && summary.chars().count() > MAX_FINDINGS_SUMMARY_LENGTH
        {
            return Err(CoreError::InvalidMetadata {
                item_type: "research",
                message: format!(
                    "findings_summary exceeds {} characters",
                    MAX_FINDINGS_SUMMARY_LENGTH
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
