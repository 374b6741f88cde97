use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_PAGE_LIMIT: i64 = 1;
pub const MAX_PAGE_LIMIT: i64 = 100;
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size applied when a `list_work_items` call omits `limit`
    pub default_limit: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT).contains(&self.default_limit) {
            return Err(ConfigError::pagination(format!(
                "pagination.default_limit must be {}-{}, got {}",
                MIN_PAGE_LIMIT, MAX_PAGE_LIMIT, self.default_limit
            )));
        }

        Ok(())
    }
}
