use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{info, warn};

use super::payload::SubmissionEnvelope;
use super::FormType;
use crate::config::WebhookEndpoints;

/// Transport-level failure. Never surfaced to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("webhook unreachable: {0}")]
    Network(String),
    #[error("webhook timed out")]
    Timeout,
    #[error("webhook answered with status {0}")]
    Status(u16),
    #[error("envelope could not be encoded: {0}")]
    Encode(String),
    #[error("http client unavailable: {0}")]
    Client(String),
}

/// Single-attempt JSON POST to an external endpoint.
pub trait WebhookTransport: Send + Sync {
    /// Resolves to the 2xx status code, or the reason delivery failed.
    fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<u16, DispatchError>> + Send;
}

/// `reqwest`-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DispatchError::Client(err.to_string()))?;
        Ok(Self { client })
    }
}

impl WebhookTransport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<u16, DispatchError>> + Send {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        async move {
            let response = request.send().await.map_err(|err| {
                if err.is_timeout() {
                    DispatchError::Timeout
                } else {
                    DispatchError::Network(err.to_string())
                }
            })?;

            let status = response.status();
            if status.is_success() {
                Ok(status.as_u16())
            } else {
                Err(DispatchError::Status(status.as_u16()))
            }
        }
    }
}

/// Diagnostic record of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub form_type: FormType,
    pub endpoint: String,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Side channel receiving dispatch outcomes.
pub trait DispatchReporter: Send + Sync {
    fn record(&self, outcome: &SubmissionOutcome);
}

/// Reports outcomes as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl DispatchReporter for TracingReporter {
    fn record(&self, outcome: &SubmissionOutcome) {
        if outcome.delivered {
            info!(
                form = %outcome.form_type,
                endpoint = %outcome.endpoint,
                status = ?outcome.status,
                "lead webhook delivered"
            );
        } else {
            warn!(
                form = %outcome.form_type,
                endpoint = %outcome.endpoint,
                detail = outcome.detail.as_deref().unwrap_or("unknown"),
                "lead webhook failed (non-blocking)"
            );
        }
    }
}

/// Delivers envelopes to the endpoint configured for their form type.
#[derive(Debug, Clone)]
pub struct SubmissionDispatcher<T, R = TracingReporter> {
    transport: T,
    reporter: R,
    endpoints: WebhookEndpoints,
}

impl<T, R> SubmissionDispatcher<T, R>
where
    T: WebhookTransport,
    R: DispatchReporter,
{
    pub fn new(transport: T, reporter: R, endpoints: WebhookEndpoints) -> Self {
        Self {
            transport,
            reporter,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &WebhookEndpoints {
        &self.endpoints
    }

    /// Make one delivery attempt. Always completes; failures only reach the reporter.
    pub async fn dispatch(&self, envelope: &SubmissionEnvelope) {
        let endpoint = self.endpoints.for_form(envelope.form_type);

        let result = match serde_json::to_vec(envelope) {
            Ok(body) => self.transport.post_json(endpoint, body).await,
            Err(err) => Err(DispatchError::Encode(err.to_string())),
        };

        let outcome = match result {
            Ok(status) => SubmissionOutcome {
                form_type: envelope.form_type,
                endpoint: endpoint.to_string(),
                delivered: true,
                status: Some(status),
                detail: None,
            },
            Err(err) => SubmissionOutcome {
                form_type: envelope.form_type,
                endpoint: endpoint.to_string(),
                delivered: false,
                status: match &err {
                    DispatchError::Status(code) => Some(*code),
                    _ => None,
                },
                detail: Some(err.to_string()),
            },
        };

        self.reporter.record(&outcome);
    }
}
