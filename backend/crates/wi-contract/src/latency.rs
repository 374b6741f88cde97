use wi_config::PerformanceConfig;

use std::time::Duration;

/// Observed call durations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencySample {
    durations: Vec<Duration>,
}

impl LatencySample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            durations: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, duration: Duration) {
        self.durations.push(duration);
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Nearest-rank percentile: the smallest sample such that at least
    /// `percentile`% of samples are less than or equal to it.
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.durations.is_empty() || !(0.0..=100.0).contains(&percentile) {
            return None;
        }

        let mut sorted = self.durations.clone();
        sorted.sort_unstable();

        let n = sorted.len();
        let rank = ((percentile / 100.0) * n as f64).ceil() as usize;
        sorted.get(rank.clamp(1, n) - 1).copied()
    }

    pub fn p95(&self) -> Option<Duration> {
        self.percentile(95.0)
    }

    pub fn max(&self) -> Option<Duration> {
        self.durations.iter().max().copied()
    }
}

impl FromIterator<Duration> for LatencySample {
    fn from_iter<I: IntoIterator<Item = Duration>>(iter: I) -> Self {
        Self {
            durations: iter.into_iter().collect(),
        }
    }
}

/// p95 ceiling and how many calls to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyBudget {
    pub p95: Duration,
    pub samples: usize,
}

impl LatencyBudget {
    pub const DEFAULT_P95: Duration = Duration::from_millis(200);
    pub const DEFAULT_SAMPLES: usize = 100;

    pub fn new(p95: Duration, samples: usize) -> Self {
        Self { p95, samples }
    }

    pub fn from_config(config: &PerformanceConfig) -> Self {
        Self::new(config.list_p95_budget(), config.latency_samples)
    }

    /// Returns a violation message when the sample misses the budget.
    /// The budget is strict: p95 must be below it.
    pub fn violation(&self, sample: &LatencySample) -> Option<String> {
        match sample.p95() {
            None => Some("no latency samples were collected".to_string()),
            Some(p95) if p95 >= self.p95 => Some(format!(
                "p95 latency {:.1}ms is not under the {}ms budget ({} samples)",
                p95.as_secs_f64() * 1000.0,
                self.p95.as_millis(),
                sample.len()
            )),
            Some(_) => None,
        }
    }
}

impl Default for LatencyBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_P95, Self::DEFAULT_SAMPLES)
    }
}
