use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result of one named check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub violations: Vec<String>,
    pub elapsed: Duration,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub p95: Duration,
    pub max: Duration,
    pub samples: usize,
    pub budget: Duration,
}

/// Outcome of a full suite run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractReport {
    pub outcomes: Vec<CheckOutcome>,
    pub latency: Option<LatencySummary>,
}

impl ContractReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn outcome(&self, name: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed())
            .map(|o| o.name)
            .collect()
    }

    /// `(check, message)` for every violation, in check order
    pub fn violations(&self) -> Vec<(&'static str, &str)> {
        self.outcomes
            .iter()
            .flat_map(|o| o.violations.iter().map(move |v| (o.name, v.as_str())))
            .collect()
    }

    pub fn into_result(self) -> Result<Self, ContractFailure> {
        if self.passed() {
            return Ok(self);
        }

        let violations = self
            .violations()
            .into_iter()
            .map(|(check, message)| format!("{}: {}", check, message))
            .collect();
        Err(ContractFailure { violations })
    }
}

impl fmt::Display for ContractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let mark = if outcome.passed() { "PASS" } else { "FAIL" };
            writeln!(
                f,
                "[{}] {} ({}ms)",
                mark,
                outcome.name,
                outcome.elapsed.as_millis()
            )?;
            for violation in &outcome.violations {
                writeln!(f, "       - {}", violation)?;
            }
        }

        if let Some(latency) = &self.latency {
            writeln!(
                f,
                "latency: p95 {:.2}ms, max {:.2}ms over {} calls (budget {}ms)",
                latency.p95.as_secs_f64() * 1000.0,
                latency.max.as_secs_f64() * 1000.0,
                latency.samples,
                latency.budget.as_millis()
            )?;
        }

        let failed = self.failed_checks().len();
        write!(
            f,
            "{} of {} checks passed",
            self.outcomes.len() - failed,
            self.outcomes.len()
        )
    }
}

/// Every violation of a failed run
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} contract violation(s): {}", .violations.len(), .violations.join("; "))]
pub struct ContractFailure {
    pub violations: Vec<String>,
}
