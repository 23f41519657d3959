//! Response bodies returned by the payment service
//!
//! Only used for logging; checks never depend on these shapes.

use serde::{Deserialize, Serialize};

/// Standard `{message, success, data}` envelope
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ServiceResponse {
    /// `data.status` of a payment response, if present
    pub fn payment_status(&self) -> Option<&str> {
        self.data.as_ref()?.get("status")?.as_str()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.data.as_ref()?.get("transactionId")?.as_str()
    }
}

/// Body of the service health endpoint
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBody {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub uptime: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub resource: HealthResources,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HealthResources {
    #[serde(default)]
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_envelope() {
        let body = r#"{"message":"ok","success":true,"data":{"orderId":"1","transactionId":"TRX-1","status":"PENDING"}}"#;
        let parsed: ServiceResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.payment_status(), Some("PENDING"));
        assert_eq!(parsed.transaction_id(), Some("TRX-1"));
    }

    #[test]
    fn test_health_body() {
        let body = r#"{"appName":"payment-service","uptime":"3h","appVersion":"1.2.0","resource":{"database":"up"}}"#;
        let parsed: HealthBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.app_name, "payment-service");
        assert_eq!(parsed.resource.database, "up");
    }
}
