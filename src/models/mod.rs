//! Data models for payment service probing
//!
//! This module contains all data structures shared by the scenarios, the
//! iteration driver and the output formatters.

mod check;
mod envelope;
mod report;
mod scenario;

pub use check::{CheckResult, Checks};
pub use envelope::{HealthBody, ServiceResponse};
pub use report::{CheckStats, IterationReport, RunSummary};
pub use scenario::ScenarioKind;
