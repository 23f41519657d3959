//! HTTP client for payment service probes
//!
//! Wraps reqwest with a small request/response model. Transport failures are
//! reported as errors by `HttpClient::send` and folded into a bodiless
//! response by [`exchange`], so scenario checks see a single outcome type.

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Timeout applied to requests that do not set their own
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Anything that can carry an `HttpRequest` to the service.
///
/// `HttpClient` is the production implementation; tests substitute a
/// recording fake.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>>;
}

/// HTTP client for probing
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create client with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        debug!("Sending {} request to {}", request.method, url);

        let method =
            Method::from_bytes(request.method.as_bytes()).context("Invalid HTTP method")?;
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| anyhow::anyhow!(HttpError::InvalidUrl(format!("{url}: {e}"))))?;

        let mut req_builder = self.client.request(method, parsed);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        // A per-request timeout replaces the client-wide one
        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }
        let effective_timeout = request
            .timeout
            .map(|t| t.as_secs())
            .unwrap_or(self.timeout_secs);

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(effective_timeout))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionRefused(url.clone()))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let status = response.status();

        let mut response_headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers: response_headers,
            body: Some(body),
            duration_ms,
            error: None,
        })
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        HttpClient::send(self, request).await
    }
}

/// Send a request and fold any transport failure into a bodiless response
/// with status 0.
pub async fn exchange<T: Transport>(transport: &T, request: HttpRequest) -> HttpResponse {
    let target = format!("{} {}", request.method, request.url);
    match transport.send(request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("{} failed: {:#}", target, e);
            HttpResponse::transport_failure(format!("{e:#}"))
        }
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set `Content-Type` and `Accept` to JSON
    pub fn json_headers(self) -> Self {
        self.header("Content-Type", JSON_CONTENT_TYPE)
            .header("Accept", JSON_CONTENT_TYPE)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value).context("Failed to serialize request body")?;
        Ok(self.body(body))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// `None` when no response was received
    pub body: Option<String>,
    pub duration_ms: u64,
    /// Transport error, if the request never completed
    pub error: Option<String>,
}

impl HttpResponse {
    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            headers: HashMap::new(),
            body: None,
            duration_ms: 0,
            error: Some(error.into()),
        }
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Parse the body as JSON, if there is one and it is valid
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}
