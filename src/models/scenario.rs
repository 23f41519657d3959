//! Probe scenario kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// The probe scenarios this tool knows how to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Health,
    Payment,
}

impl ScenarioKind {
    /// Get scenario display name
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Health => "Health Probe",
            ScenarioKind::Payment => "Payment Flow",
        }
    }

    /// File name the scenario configuration is conventionally stored under
    pub fn default_config_file(&self) -> &'static str {
        match self {
            ScenarioKind::Health => "health.json",
            ScenarioKind::Payment => "payment_scenario_prod.json",
        }
    }

    pub fn all() -> Vec<ScenarioKind> {
        vec![ScenarioKind::Health, ScenarioKind::Payment]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<ScenarioKind> {
        match s.to_lowercase().as_str() {
            "health" => Some(ScenarioKind::Health),
            "payment" | "payments" => Some(ScenarioKind::Payment),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_from_str() {
        assert_eq!(ScenarioKind::from_str("HEALTH"), Some(ScenarioKind::Health));
        assert_eq!(ScenarioKind::from_str("payments"), Some(ScenarioKind::Payment));
        assert_eq!(ScenarioKind::from_str("refund"), None);
    }

    #[test]
    fn test_default_config_file() {
        assert_eq!(ScenarioKind::Health.default_config_file(), "health.json");
        assert_eq!(ScenarioKind::all().len(), 2);
    }
}
