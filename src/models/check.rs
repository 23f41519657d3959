//! Check results recorded during an iteration
//!
//! A check is a named boolean assertion on a response. Failing a check never
//! stops the iteration; it is only counted.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::http::HttpResponse;

/// Outcome of one named check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: Option<String>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.passed {
            "✓"
        } else {
            "✗"
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.name)?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Check recorder for a single iteration
#[derive(Clone, Debug, Default)]
pub struct Checks {
    results: Vec<CheckResult>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `predicate` against `response` and record the outcome.
    /// Returns whether the check passed.
    pub fn check<F>(&mut self, name: &str, response: &HttpResponse, predicate: F) -> bool
    where
        F: FnOnce(&HttpResponse) -> bool,
    {
        let passed = predicate(response);
        if passed {
            debug!("check passed: {}", name);
            self.results.push(CheckResult::pass(name));
        } else {
            let message = match &response.error {
                Some(error) => format!("no response: {error}"),
                None => format!("status {}", response.status_code),
            };
            warn!("check failed: {} ({})", name, message);
            self.results.push(CheckResult::fail(name, message));
        }
        passed
    }

    #[cfg(test)]
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}
