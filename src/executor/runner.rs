//! Iteration driver
//!
//! Runs a scenario a fixed number of times, one iteration after another.
//! Pacing beyond the scenario's own pause, concurrency and thresholds are
//! left to whatever drives the load.

use chrono::Utc;
use tracing::{info, warn};

use crate::http::Transport;
use crate::models::{IterationReport, RunSummary};
use crate::scenarios::Scenario;
use crate::utils::Timer;

/// Sequential scenario runner
#[derive(Clone, Debug)]
pub struct ScenarioRunner {
    iterations: u32,
}

impl ScenarioRunner {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Run every iteration and summarise. An aborted iteration does not stop
    /// the run.
    pub async fn run<S: Scenario, T: Transport>(&self, scenario: &S, transport: &T) -> RunSummary {
        let kind = scenario.kind();
        info!("Starting {} ({} iterations)", kind, self.iterations);

        let started_at = Utc::now();
        let timer = Timer::start(format!("{kind} run"));
        let mut reports: Vec<IterationReport> = Vec::with_capacity(self.iterations as usize);

        for iteration in 1..=self.iterations {
            let report = scenario.run_iteration(transport, iteration).await;
            if report.is_aborted() || report.failed_checks() > 0 {
                warn!("  {}", report);
            } else {
                info!("  {}", report);
            }
            reports.push(report);
        }

        let summary = RunSummary::new(kind, started_at, reports, timer.elapsed_ms());

        info!(
            "{} finished: {}/{} iterations completed, {} failed check(s)",
            kind,
            summary.completed,
            summary.iterations,
            summary.failed_checks()
        );

        summary
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::config::{PaymentConfigFile, PaymentScenarioConfig};
    use crate::models::ScenarioKind;
    use crate::scenarios::fake::FakeTransport;
    use crate::scenarios::PaymentScenario;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn payment_scenario() -> PaymentScenario {
        let config = PaymentConfigFile {
            thresholds: Value::Null,
            payment_scenario: PaymentScenarioConfig {
                scenario: Value::Null,
                base_url: "http://x".to_string(),
                api_key: "key".to_string(),
                secret_key: "secret".to_string(),
                body: json!({"payments": [{}]}),
            },
        };
        PaymentScenario::setup(&config)
            .unwrap()
            .with_pause(Duration::from_millis(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_runs_at_least_once() {
        let transport = FakeTransport::replying(&[(200, Some("{}")), (200, Some("{}"))]);

        let summary = ScenarioRunner::new(0)
            .run(&payment_scenario(), &transport)
            .await;

        assert_eq!(summary.iterations, 1);
        assert_eq!(summary.completed, 1);
        assert!(summary.is_all_passed());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_does_not_stop_the_run() {
        let transport = FakeTransport::replying(&[
            (500, Some("declined")),
            (200, Some("{}")),
            (200, Some("{}")),
        ]);

        let summary = ScenarioRunner::new(2)
            .run(&payment_scenario(), &transport)
            .await;

        assert_eq!(summary.scenario, ScenarioKind::Payment);
        assert_eq!(summary.iterations, 2);
        assert_eq!(summary.aborted, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.reports[0].iteration, 1);
        assert!(summary.reports[0].is_aborted());
        assert!(summary.reports[1].order_id.is_some());
        assert_eq!(transport.requests().len(), 3);
        assert!(!summary.is_all_passed());
    }
}
