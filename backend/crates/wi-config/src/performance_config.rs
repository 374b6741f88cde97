use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_LIST_P95_BUDGET_MS: u64 = 200;
pub const MIN_LIST_P95_BUDGET_MS: u64 = 1;
pub const MAX_LIST_P95_BUDGET_MS: u64 = 60_000;

pub const DEFAULT_LATENCY_SAMPLES: usize = 100;
/// Fewer samples make the 95th percentile the maximum
pub const MIN_LATENCY_SAMPLES: usize = 20;
pub const MAX_LATENCY_SAMPLES: usize = 10_000;

/// Latency budget the contract harness holds `list_work_items` to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub list_p95_budget_ms: u64,
    pub latency_samples: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            list_p95_budget_ms: DEFAULT_LIST_P95_BUDGET_MS,
            latency_samples: DEFAULT_LATENCY_SAMPLES,
        }
    }
}

impl PerformanceConfig {
    pub fn list_p95_budget(&self) -> Duration {
        Duration::from_millis(self.list_p95_budget_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_LIST_P95_BUDGET_MS..=MAX_LIST_P95_BUDGET_MS).contains(&self.list_p95_budget_ms) {
            return Err(ConfigError::performance(format!(
                "performance.list_p95_budget_ms must be {}-{}, got {}",
                MIN_LIST_P95_BUDGET_MS, MAX_LIST_P95_BUDGET_MS, self.list_p95_budget_ms
            )));
        }

        if !(MIN_LATENCY_SAMPLES..=MAX_LATENCY_SAMPLES).contains(&self.latency_samples) {
            return Err(ConfigError::performance(format!(
                "performance.latency_samples must be {}-{}, got {}",
                MIN_LATENCY_SAMPLES, MAX_LATENCY_SAMPLES, self.latency_samples
            )));
        }

        Ok(())
    }
}
