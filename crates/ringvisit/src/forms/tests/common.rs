use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Notify;

use crate::config::{SiteConfig, WebhookEndpoints};
use crate::forms::dispatch::{DispatchError, DispatchReporter, SubmissionOutcome, WebhookTransport};
use crate::forms::feedback::{Notice, NotificationSurface};
use crate::forms::payload::{Clock, SubmissionEnvelope};
use crate::forms::service::LeadCaptureService;
use crate::forms::validator::RawInput;
use crate::forms::lead_router;

pub(super) type TestService<T> =
    LeadCaptureService<T, MemoryReporter, MemoryNotifier, SteppingClock>;

pub(super) fn site() -> SiteConfig {
    SiteConfig {
        webhooks: WebhookEndpoints {
            contact: "https://hooks.example.com/contact".to_string(),
            partner: "https://hooks.example.com/partner".to_string(),
        },
        ..SiteConfig::default()
    }
}

pub(super) fn raw(pairs: &[(&str, &str)]) -> RawInput {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(super) fn contact_input() -> RawInput {
    raw(&[
        ("fullName", "Jane Doe Smith"),
        ("email", "jane@example.com"),
        ("phone", "(555) 123-4567"),
        ("company", "Poway Family Clinic"),
        ("serviceInterest", "Virtual triage"),
        ("message", "We would like to schedule a demo next week."),
    ])
}

pub(super) fn partner_input() -> RawInput {
    raw(&[
        ("companyName", "Acme Health Partners"),
        ("contactName", "Madonna"),
        ("email", "partners@acme.example"),
        ("phone", "555-987-6543"),
        ("partnershipType", "integration"),
        ("message", "We integrate EHR systems for regional hospitals."),
    ])
}

/// Records every envelope posted and answers 200.
#[derive(Default, Clone)]
pub(super) struct MemoryTransport {
    posts: Arc<Mutex<Vec<(String, SubmissionEnvelope)>>>,
}

impl MemoryTransport {
    pub(super) fn posts(&self) -> Vec<(String, SubmissionEnvelope)> {
        self.posts.lock().expect("transport mutex poisoned").clone()
    }
}

impl WebhookTransport for MemoryTransport {
    fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<u16, DispatchError>> + Send {
        let envelope: SubmissionEnvelope =
            serde_json::from_slice(&body).expect("body decodes as envelope");
        self.posts
            .lock()
            .expect("transport mutex poisoned")
            .push((url.to_string(), envelope));
        async { Ok(200) }
    }
}

/// Fails every post as an unreachable network would.
#[derive(Default, Clone)]
pub(super) struct UnreachableTransport;

impl WebhookTransport for UnreachableTransport {
    fn post_json(
        &self,
        _url: &str,
        _body: Vec<u8>,
    ) -> impl Future<Output = Result<u16, DispatchError>> + Send {
        async { Err(DispatchError::Network("connection refused".to_string())) }
    }
}

/// Parks each post until the test releases it.
#[derive(Default, Clone)]
pub(super) struct GatedTransport {
    pub(super) entered: Arc<Notify>,
    pub(super) release: Arc<Notify>,
}

impl WebhookTransport for GatedTransport {
    fn post_json(
        &self,
        _url: &str,
        _body: Vec<u8>,
    ) -> impl Future<Output = Result<u16, DispatchError>> + Send {
        let entered = self.entered.clone();
        let release = self.release.clone();
        async move {
            entered.notify_one();
            release.notified().await;
            Ok(204)
        }
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryReporter {
    outcomes: Arc<Mutex<Vec<SubmissionOutcome>>>,
}

impl MemoryReporter {
    pub(super) fn outcomes(&self) -> Vec<SubmissionOutcome> {
        self.outcomes.lock().expect("reporter mutex poisoned").clone()
    }
}

impl DispatchReporter for MemoryReporter {
    fn record(&self, outcome: &SubmissionOutcome) {
        self.outcomes
            .lock()
            .expect("reporter mutex poisoned")
            .push(outcome.clone());
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    shown: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub(super) fn shown(&self) -> Vec<Notice> {
        self.shown.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationSurface for MemoryNotifier {
    fn show(&self, notice: &Notice) {
        self.shown
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice.clone());
    }
}

/// Advances one second per reading.
#[derive(Debug)]
pub(super) struct SteppingClock {
    next_millis: AtomicI64,
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 2, 9, 30, 0)
            .single()
            .expect("valid start instant");
        Self {
            next_millis: AtomicI64::new(start.timestamp_millis()),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(1_000, Ordering::Relaxed);
        DateTime::from_timestamp_millis(millis).expect("timestamp in range")
    }
}

pub(super) fn build_service_with<T: WebhookTransport>(
    site: &SiteConfig,
    transport: T,
) -> (TestService<T>, MemoryReporter, MemoryNotifier) {
    let reporter = MemoryReporter::default();
    let notifier = MemoryNotifier::default();
    let service = LeadCaptureService::with_clock(
        site,
        transport,
        reporter.clone(),
        notifier.clone(),
        SteppingClock::default(),
    )
    .expect("built-in schemas are valid");
    (service, reporter, notifier)
}

pub(super) fn build_service() -> (
    TestService<MemoryTransport>,
    MemoryTransport,
    MemoryReporter,
    MemoryNotifier,
) {
    let transport = MemoryTransport::default();
    let (service, reporter, notifier) = build_service_with(&site(), transport.clone());
    (service, transport, reporter, notifier)
}

pub(super) fn lead_router_with_service<T: WebhookTransport + 'static>(
    service: TestService<T>,
) -> axum::Router {
    lead_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
