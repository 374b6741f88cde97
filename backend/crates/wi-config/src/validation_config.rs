use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_TITLE_LENGTH: usize = 1;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 200;

/// Field limits applied to tool input before it reaches the database.
/// Titles are capped at 200 characters regardless of configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum length for work item titles
    pub max_title_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let allowed = MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH;
        if !allowed.contains(&self.max_title_length) {
            return Err(ConfigError::config(format!(
                "validation.max_title_length must be {}-{}, got {}",
                allowed.start(),
                allowed.end(),
                self.max_title_length
            )));
        }

        Ok(())
    }
}
