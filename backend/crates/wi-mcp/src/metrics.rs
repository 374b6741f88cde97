use std::time::Duration;

use metrics::{counter, histogram};

/// Metrics collector for MCP tool calls
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "wi_mcp" }
    }

    /// Record a tool invocation
    pub fn tool_called(&self, tool: &'static str) {
        counter!(format!("{}.tools.calls", self.prefix)).increment(1);
        counter!(format!("{}.tools.calls.{}", self.prefix, tool)).increment(1);
    }

    /// Record a failed tool invocation
    pub fn tool_failed(&self, tool: &'static str, kind: &'static str) {
        counter!(format!("{}.tools.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.tools.errors.{}", self.prefix, kind), "tool" => tool).increment(1);
    }

    /// Record tool latency
    pub fn tool_latency(&self, tool: &'static str, duration: Duration) {
        histogram!(format!("{}.tools.latency_ms", self.prefix), "tool" => tool)
            .record(duration.as_secs_f64() * 1000.0);
    }

    /// Record a JSON-RPC message that could not be handled
    pub fn protocol_error(&self, code: i64) {
        counter!(format!("{}.protocol.errors", self.prefix), "code" => code.to_string())
            .increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
