//! Health probe
//!
//! One unauthenticated GET per iteration. Check failures are recorded and
//! never retried.

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use super::{Scenario, DEFAULT_PAUSE};
use crate::config::{HealthConfigFile, ScenarioFile};
use crate::http::{exchange, HttpRequest, HttpResponse, Transport};
use crate::models::{Checks, HealthBody, IterationReport, ScenarioKind};
use crate::utils::Timer;

pub const CHECK_STATUS_200: &str = "is status 200";
pub const CHECK_BODY_NOT_NULL: &str = "is body not null";

/// Health probe data prepared by `setup`
#[derive(Clone, Debug)]
pub struct HealthScenario {
    base_url: String,
    pause: Duration,
}

impl HealthScenario {
    /// Extract the per-iteration data from the loaded file
    pub fn setup(config: &HealthConfigFile) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            base_url: config.data.base_url.clone(),
            pause: DEFAULT_PAUSE,
        })
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe once and record both checks
    pub async fn probe<T: Transport>(&self, transport: &T, checks: &mut Checks) -> HttpResponse {
        let response = exchange(transport, HttpRequest::get(&self.base_url)).await;

        checks.check(CHECK_STATUS_200, &response, |r| r.status_code == 200);
        checks.check(CHECK_BODY_NOT_NULL, &response, |r| r.has_body());

        if let Some(body) = response.json::<HealthBody>() {
            debug!(
                "{} {} up {} (database: {})",
                body.app_name, body.app_version, body.uptime, body.resource.database
            );
        }

        response
    }
}

impl Scenario for HealthScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Health
    }

    async fn run_iteration<T: Transport>(&self, transport: &T, iteration: u32) -> IterationReport {
        let timer = Timer::start(format!("health iteration {iteration}"));
        let mut checks = Checks::new();

        self.probe(transport, &mut checks).await;
        sleep(self.pause).await;

        IterationReport::new(iteration, checks.into_results()).with_duration(timer.elapsed_ms())
    }
}
