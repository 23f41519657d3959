//! Scenario configuration files
//!
//! `health.json` and `payment_scenario_prod.json`. The scheduling and
//! threshold sections belong to whatever drives the load and are carried
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{validate_base_url, ConfigError, EnvConfig, ScenarioFile};

/// `health.json`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthConfigFile {
    /// Scheduling options, opaque to this tool
    #[serde(default)]
    pub options: Value,
    pub data: HealthData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub base_url: String,
}

impl ScenarioFile for HealthConfigFile {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.data.base_url)
    }

    fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(health_url) = &env.health_url {
            self.data.base_url = health_url.clone();
        }
    }

    fn example() -> Self {
        Self {
            options: json!({
                "vus": 10,
                "duration": "30s"
            }),
            data: HealthData {
                base_url: "http://localhost:8080/health".to_string(),
            },
        }
    }
}

/// `payment_scenario_prod.json`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfigFile {
    /// Pass/fail criteria over aggregated metrics, opaque to this tool
    #[serde(default)]
    pub thresholds: Value,
    pub payment_scenario: PaymentScenarioConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScenarioConfig {
    /// Execution profile, opaque to this tool
    #[serde(default)]
    pub scenario: Value,
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub secret_key: String,
    /// Inquiry body template; must hold a non-empty `payments` array of objects
    pub body: Value,
}

impl PaymentScenarioConfig {
    pub fn payments_url(&self) -> String {
        format!("{}/payments", self.base_url.trim_end_matches('/'))
    }

    pub fn status_url(&self) -> String {
        format!("{}/payments/status", self.base_url.trim_end_matches('/'))
    }

    fn validate_body(&self) -> Result<(), ConfigError> {
        let body = self
            .body
            .as_object()
            .ok_or_else(|| ConfigError::InvalidBody("body must be an object".to_string()))?;
        let payments = body
            .get("payments")
            .and_then(Value::as_array)
            .ok_or_else(|| ConfigError::InvalidBody("body.payments must be an array".to_string()))?;
        match payments.first() {
            Some(first) if first.is_object() => Ok(()),
            Some(_) => Err(ConfigError::InvalidBody(
                "body.payments[0] must be an object".to_string(),
            )),
            None => Err(ConfigError::InvalidBody(
                "body.payments must not be empty".to_string(),
            )),
        }
    }
}

impl ScenarioFile for PaymentConfigFile {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url(&self.payment_scenario.base_url)?;
        self.payment_scenario.validate_body()
    }

    fn apply_env(&mut self, env: &EnvConfig) {
        let scenario = &mut self.payment_scenario;
        if let Some(base_url) = &env.base_url {
            scenario.base_url = base_url.clone();
        }
        if let Some(api_key) = &env.api_key {
            scenario.api_key = api_key.clone();
        }
        if let Some(secret_key) = &env.secret_key {
            scenario.secret_key = secret_key.clone();
        }
    }

    fn example() -> Self {
        Self {
            thresholds: json!({
                "http_req_failed": ["rate<0.01"],
                "http_req_duration": ["p(95)<5000"]
            }),
            payment_scenario: PaymentScenarioConfig {
                scenario: json!({
                    "executor": "constant-arrival-rate",
                    "rate": 1,
                    "timeUnit": "1s",
                    "duration": "1m",
                    "preAllocatedVUs": 5
                }),
                base_url: "http://localhost:8080/api/v1".to_string(),
                api_key: "your-api-key".to_string(),
                secret_key: "your-secret-key".to_string(),
                body: json!({
                    "customerId": "CUST-001",
                    "customerName": "Probe Customer",
                    "customerEmail": "probe@example.com",
                    "customerPhone": "081200000000",
                    "referenceId": "REF-001",
                    "referenceType": "ORDER",
                    "returnUrl": "https://example.com/return",
                    "payments": [
                        {
                            "orderId": "",
                            "amount": 10000,
                            "channel": [],
                            "products": []
                        }
                    ]
                }),
            },
        }
    }
}
