use crate::Metrics;

use std::time::{Duration, Instant};

/// Helper for timing a tool call
pub struct MetricsTimer {
    start: Instant,
    tool: &'static str,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics, tool: &'static str) -> Self {
        Self {
            start: Instant::now(),
            tool,
            metrics,
        }
    }

    /// Record elapsed time and return it
    pub fn finish(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.tool_latency(self.tool, duration);
        duration
    }
}
