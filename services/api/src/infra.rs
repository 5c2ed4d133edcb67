use metrics_exporter_prometheus::PrometheusHandle;
use ringvisit::config::SiteConfig;
use ringvisit::error::AppError;
use ringvisit::forms::{LeadCaptureService, ReqwestTransport, TracingNotifier, TracingReporter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Lead pipeline wired to the real webhook client. Notices are logged since the
/// browser renders its own toast from the response body.
pub(crate) type LiveLeadService =
    LeadCaptureService<ReqwestTransport, TracingReporter, TracingNotifier>;

pub(crate) fn live_lead_service(site: &SiteConfig) -> Result<Arc<LiveLeadService>, AppError> {
    let transport = ReqwestTransport::new(site.webhook_timeout)?;
    let service = LeadCaptureService::new(site, transport, TracingReporter, TracingNotifier)?;
    Ok(Arc::new(service))
}
