//! Probe scenarios
//!
//! Each scenario is built once from its configuration file by `setup` and
//! then executed iteration by iteration.
//!
//! - [`HealthScenario`]: GET the health URL, check status and body.
//! - [`PaymentScenario`]: create a payment, then check its status once.

mod health;
mod order_id;
mod payment;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::http::Transport;
use crate::models::{IterationReport, ScenarioKind};

pub use health::HealthScenario;
pub use payment::PaymentScenario;

/// Pause after each iteration
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Errors that stop an iteration early
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("{reason}: {}", .body.as_deref().unwrap_or("<no body>"))]
    Aborted { reason: String, body: Option<String> },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ScenarioError {
    pub fn reason(&self) -> String {
        match self {
            ScenarioError::Aborted { reason, .. } => reason.clone(),
            ScenarioError::InvalidBody(msg) => format!("invalid request body: {msg}"),
        }
    }

    pub fn body(&self) -> Option<String> {
        match self {
            ScenarioError::Aborted { body, .. } => body.clone(),
            ScenarioError::InvalidBody(_) => None,
        }
    }
}

/// A scenario the iteration driver can execute
pub trait Scenario {
    fn kind(&self) -> ScenarioKind;

    /// Run one iteration, including the trailing pause
    fn run_iteration<T: Transport>(
        &self,
        transport: &T,
        iteration: u32,
    ) -> impl Future<Output = IterationReport>;
}
