use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const MIN_TOKEN_BUDGET: i64 = 1_000;
pub const MAX_TOKEN_BUDGET: i64 = 1_000_000;

/// Metadata for `session` work items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub token_budget: i64,
    pub prompts_count: i64,
    /// Raw YAML frontmatter of the session prompt file
    pub yaml_frontmatter: serde_json::Map<String, serde_json::Value>,
}

impl SessionMetadata {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if !(MIN_TOKEN_BUDGET..=MAX_TOKEN_BUDGET).contains(&self.token_budget) {
            return Err(CoreError::InvalidMetadata {
                item_type: "session",
                message: format!(
                    "token_budget must be {}-{}, got {}",
                    MIN_TOKEN_BUDGET, MAX_TOKEN_BUDGET, self.token_budget
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.prompts_count < 0 {
            return Err(CoreError::InvalidMetadata {
                item_type: "session",
                message: format!("prompts_count must be >= 0, got {}", self.prompts_count),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
