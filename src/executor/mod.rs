//! Scenario execution
//!
//! Provides the sequential iteration driver.

mod runner;

pub use runner::ScenarioRunner;
