//! Payment flow probe
//!
//! Each iteration creates a payment through the inquiry endpoint and, if that
//! succeeded, checks its status exactly once. There is no polling: a payment
//! that has not settled by the single status call reads as a failed check.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::order_id::generate_order_id;
use super::{Scenario, ScenarioError, DEFAULT_PAUSE};
use crate::config::{PaymentConfigFile, ScenarioFile};
use crate::http::{exchange, HttpRequest, HttpResponse, Transport};
use crate::models::{Checks, IterationReport, ScenarioKind, ServiceResponse};
use crate::utils::Timer;

/// The downstream payment processor can be slow to answer an inquiry
pub const INQUIRY_TIMEOUT: Duration = Duration::from_secs(240);

pub const CHECK_PAYMENT_200: &str = "is status payment 200";
pub const CHECK_STATUS_PAYMENT_200: &str = "is status check payment 200";

const ABORT_REASON: &str = "payment failed";

/// POST a payment inquiry.
///
/// Not idempotent: retrying after a timeout would create a second order.
pub async fn inquiry<T: Transport>(transport: &T, url: &str, body: &Value) -> HttpResponse {
    let request = match HttpRequest::post(url).json_headers().json(body) {
        Ok(request) => request.timeout(INQUIRY_TIMEOUT),
        Err(e) => return HttpResponse::transport_failure(format!("{e:#}")),
    };
    exchange(transport, request).await
}

/// Payload of the status check call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub api_key: String,
    pub secret_key: String,
    pub order_id: String,
}

/// POST a payment status check with the client's default timeout
pub async fn check_status_payment<T: Transport>(
    transport: &T,
    url: &str,
    payload: &StatusRequest,
) -> HttpResponse {
    let request = match HttpRequest::post(url).json_headers().json(payload) {
        Ok(request) => request,
        Err(e) => return HttpResponse::transport_failure(format!("{e:#}")),
    };
    exchange(transport, request).await
}

/// Payment flow data prepared by `setup`
#[derive(Clone, Debug)]
pub struct PaymentScenario {
    payments_url: String,
    status_url: String,
    api_key: String,
    secret_key: String,
    body_template: Value,
    pause: Duration,
}

impl PaymentScenario {
    /// Extract the per-iteration data from the loaded file
    pub fn setup(config: &PaymentConfigFile) -> Result<Self> {
        config.validate()?;
        let scenario = &config.payment_scenario;
        if scenario.api_key.is_empty() || scenario.secret_key.is_empty() {
            tracing::warn!("apiKey or secretKey is empty; the service will likely reject payments");
        }

        Ok(Self {
            payments_url: scenario.payments_url(),
            status_url: scenario.status_url(),
            api_key: scenario.api_key.clone(),
            secret_key: scenario.secret_key.clone(),
            body_template: scenario.body.clone(),
            pause: DEFAULT_PAUSE,
        })
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Fill the body template with the order id and credentials.
    /// The template itself is left untouched.
    pub fn build_inquiry_body(&self, order_id: &str) -> Result<Value, ScenarioError> {
        let mut body = self.body_template.clone();

        let payment = body
            .get_mut("payments")
            .and_then(Value::as_array_mut)
            .and_then(|payments| payments.first_mut())
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ScenarioError::InvalidBody("missing payments[0]".to_string()))?;
        payment.insert("orderId".to_string(), Value::String(order_id.to_string()));

        let fields = body
            .as_object_mut()
            .ok_or_else(|| ScenarioError::InvalidBody("body is not an object".to_string()))?;
        fields.insert("apiKey".to_string(), Value::String(self.api_key.clone()));
        fields.insert("secretKey".to_string(), Value::String(self.secret_key.clone()));

        Ok(body)
    }

    /// Run the inquiry and the status check for a fresh order id.
    ///
    /// Returns the order id used. A failed inquiry aborts before the status
    /// check and before the pause.
    pub async fn execute<T: Transport>(
        &self,
        transport: &T,
        checks: &mut Checks,
    ) -> Result<String, ScenarioError> {
        let order_id = generate_order_id();
        let body = self.build_inquiry_body(&order_id)?;

        let payment = inquiry(transport, &self.payments_url, &body).await;
        if !checks.check(CHECK_PAYMENT_200, &payment, |r| r.status_code == 200) {
            return Err(ScenarioError::Aborted {
                reason: ABORT_REASON.to_string(),
                body: payment.body,
            });
        }
        log_envelope("inquiry", &order_id, &payment);

        let payload = StatusRequest {
            api_key: self.api_key.clone(),
            secret_key: self.secret_key.clone(),
            order_id: order_id.clone(),
        };
        let status = check_status_payment(transport, &self.status_url, &payload).await;
        checks.check(CHECK_STATUS_PAYMENT_200, &status, |r| r.status_code == 200);
        log_envelope("status", &order_id, &status);

        sleep(self.pause).await;
        Ok(order_id)
    }
}

fn log_envelope(step: &str, order_id: &str, response: &HttpResponse) {
    if let Some(envelope) = response.json::<ServiceResponse>() {
        debug!(
            "{} for order {}: success={} transaction={} status={} message={}",
            step,
            order_id,
            envelope.success,
            envelope.transaction_id().unwrap_or("-"),
            envelope.payment_status().unwrap_or("-"),
            envelope.message
        );
    }
}

impl Scenario for PaymentScenario {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Payment
    }

    async fn run_iteration<T: Transport>(&self, transport: &T, iteration: u32) -> IterationReport {
        let timer = Timer::start(format!("payment iteration {iteration}"));
        let mut checks = Checks::new();

        let outcome = self.execute(transport, &mut checks).await;
        let report = IterationReport::new(iteration, checks.into_results());

        let report = match outcome {
            Ok(order_id) => {
                info!("Iteration {} completed for order {}", iteration, order_id);
                report.with_order_id(order_id)
            }
            Err(e) => {
                error!("Iteration {} aborted: {}", iteration, e);
                report.with_abort(e.reason(), e.body())
            }
        };

        report.with_duration(timer.elapsed_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentScenarioConfig;
    use crate::scenarios::fake::FakeTransport;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn config(body: Value) -> PaymentConfigFile {
        PaymentConfigFile {
            thresholds: Value::Null,
            payment_scenario: PaymentScenarioConfig {
                scenario: Value::Null,
                base_url: "http://x".to_string(),
                api_key: "key".to_string(),
                secret_key: "secret".to_string(),
                body,
            },
        }
    }

    fn scenario() -> PaymentScenario {
        PaymentScenario::setup(&config(json!({"payments": [{}]}))).unwrap()
    }

    fn body_of(request: &HttpRequest) -> Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_steps_pass_with_one_order_id_and_one_pause() {
        let transport = FakeTransport::replying(&[(200, Some("{}")), (200, Some("{}"))]);
        let start = tokio::time::Instant::now();

        let report = scenario().run_iteration(&transport, 1).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(2));

        assert_eq!(report.checks.len(), 2);
        assert!(report.checks.iter().all(|c| c.passed));
        assert!(!report.is_aborted());

        let order_id = report.order_id.clone().unwrap();
        let inquiries = transport.requests_to("/payments");
        let statuses = transport.requests_to("/payments/status");
        assert_eq!(inquiries.len(), 1);
        assert_eq!(statuses.len(), 1);
        assert_eq!(inquiries[0].url, "http://x/payments");
        assert_eq!(body_of(&inquiries[0])["payments"][0]["orderId"], order_id.as_str());
        assert_eq!(body_of(&statuses[0])["orderId"], order_id.as_str());
    }

    #[tokio::test(start_paused = true)]
    async fn test_inquiry_body_carries_credentials() {
        let transport = FakeTransport::replying(&[(200, Some("{}")), (200, Some("{}"))]);

        scenario().run_iteration(&transport, 1).await;

        let inquiry_body = body_of(&transport.requests()[0]);
        assert_eq!(inquiry_body["apiKey"], "key");
        assert_eq!(inquiry_body["secretKey"], "secret");

        let status_body = body_of(&transport.requests()[1]);
        assert_eq!(status_body["apiKey"], "key");
        assert_eq!(status_body["secretKey"], "secret");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_inquiry_aborts_without_status_check() {
        let transport = FakeTransport::replying(&[(502, Some("processor unavailable"))]);
        let start = tokio::time::Instant::now();

        let mut checks = Checks::new();
        let result = scenario().execute(&transport, &mut checks).await;

        let err = assert_err!(result);
        assert_eq!(err.reason(), "payment failed");
        assert_eq!(err.body().as_deref(), Some("processor unavailable"));
        assert_eq!(transport.requests().len(), 1);
        assert!(transport.requests_to("/payments/status").is_empty());
        assert_eq!(checks.results().len(), 1);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_iteration_report() {
        let transport = FakeTransport::replying(&[(500, Some("boom"))]);

        let report = scenario().run_iteration(&transport, 4).await;

        let abort = report.aborted.unwrap();
        assert_eq!(abort.reason, "payment failed");
        assert_eq!(abort.body.as_deref(), Some("boom"));
        assert!(report.order_id.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_check_failure_does_not_abort() {
        let transport = FakeTransport::replying(&[(200, Some("{}")), (404, Some("not found"))]);

        let mut checks = Checks::new();
        let result = scenario().execute(&transport, &mut checks).await;

        assert_ok!(result);
        assert!(checks.results()[0].passed);
        assert!(!checks.results()[1].passed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts() {
        let transport = FakeTransport::replying(&[(200, Some("{}")), (200, Some("{}"))]);

        scenario().run_iteration(&transport, 1).await;

        let requests = transport.requests();
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(240)));
        assert_eq!(requests[1].timeout, None);
        for request in &requests {
            assert_eq!(request.method, "POST");
            assert_eq!(request.headers["Content-Type"], "application/json");
            assert_eq!(request.headers["Accept"], "application/json");
        }
    }

    #[test]
    fn test_build_inquiry_body_leaves_template_untouched() {
        let scenario = PaymentScenario::setup(&config(json!({
            "customerId": "C1",
            "payments": [{"amount": 100}, {"amount": 200}]
        })))
        .unwrap();

        let body = scenario.build_inquiry_body("1700000000000").unwrap();

        assert_eq!(body["payments"][0]["orderId"], "1700000000000");
        assert_eq!(body["payments"][0]["amount"], 100);
        assert!(body["payments"][1].get("orderId").is_none());
        assert_eq!(body["customerId"], "C1");
        assert!(scenario.body_template["payments"][0].get("orderId").is_none());
        assert!(scenario.body_template.get("apiKey").is_none());
    }

    #[test]
    fn test_setup_rejects_body_without_payments() {
        assert!(PaymentScenario::setup(&config(json!({"payments": []}))).is_err());
    }
}
