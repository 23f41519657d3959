//! Iteration reports and run summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CheckResult, ScenarioKind};

/// Why an iteration stopped early
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abort {
    pub reason: String,
    pub body: Option<String>,
}

/// Result of a single scenario iteration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: u32,
    pub checks: Vec<CheckResult>,
    /// Order identifier used by a payment iteration
    pub order_id: Option<String>,
    pub aborted: Option<Abort>,
    pub duration_ms: u64,
}

impl IterationReport {
    pub fn new(iteration: u32, checks: Vec<CheckResult>) -> Self {
        Self {
            iteration,
            checks,
            order_id: None,
            aborted: None,
            duration_ms: 0,
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_abort(mut self, reason: impl Into<String>, body: Option<String>) -> Self {
        self.aborted = Some(Abort {
            reason: reason.into(),
            body,
        });
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    pub fn failed_checks(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

impl fmt::Display for IterationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iteration {} [{}ms]", self.iteration, self.duration_ms)?;
        if let Some(order_id) = &self.order_id {
            write!(f, " order {order_id}")?;
        }
        for check in &self.checks {
            write!(f, " | {check}")?;
        }
        if let Some(abort) = &self.aborted {
            write!(f, " | aborted: {}", abort.reason)?;
        }
        Ok(())
    }
}

/// Pass/fail tally for one named check across a run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    pub name: String,
    pub passes: usize,
    pub fails: usize,
}

impl CheckStats {
    pub fn total(&self) -> usize {
        self.passes + self.fails
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.passes as f64 / self.total() as f64) * 100.0
        }
    }
}

/// Summary of a complete probe run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub scenario: ScenarioKind,
    pub started_at: DateTime<Utc>,
    pub iterations: usize,
    pub completed: usize,
    pub aborted: usize,
    /// Per-check tallies, in the order checks were first seen
    pub checks: Vec<CheckStats>,
    pub total_duration_ms: u64,
    pub reports: Vec<IterationReport>,
}

impl RunSummary {
    pub fn new(
        scenario: ScenarioKind,
        started_at: DateTime<Utc>,
        reports: Vec<IterationReport>,
        total_duration_ms: u64,
    ) -> Self {
        let aborted = reports.iter().filter(|r| r.is_aborted()).count();

        let mut checks: Vec<CheckStats> = Vec::new();
        for check in reports.iter().flat_map(|r| r.checks.iter()) {
            let idx = match checks.iter().position(|s| s.name == check.name) {
                Some(idx) => idx,
                None => {
                    checks.push(CheckStats {
                        name: check.name.clone(),
                        ..Default::default()
                    });
                    checks.len() - 1
                }
            };
            if check.passed {
                checks[idx].passes += 1;
            } else {
                checks[idx].fails += 1;
            }
        }

        Self {
            scenario,
            started_at,
            iterations: reports.len(),
            completed: reports.len() - aborted,
            aborted,
            checks,
            total_duration_ms,
            reports,
        }
    }

    pub fn failed_checks(&self) -> usize {
        self.checks.iter().map(|c| c.fails).sum()
    }

    pub fn is_all_passed(&self) -> bool {
        self.aborted == 0 && self.failed_checks() == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {} iteration(s)", self.scenario, self.iterations)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for stats in &self.checks {
            writeln!(
                f,
                "  {:32} {:>5} ✓ {:>5} ✗ ({:.1}%)",
                stats.name,
                stats.passes,
                stats.fails,
                stats.pass_rate()
            )?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Completed: {} | Aborted: {} | Duration: {}ms",
            self.completed, self.aborted, self.total_duration_ms
        )
    }
}
