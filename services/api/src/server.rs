use crate::cli::ServeArgs;
use crate::infra::{live_lead_service, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ringvisit::config::AppConfig;
use ringvisit::error::AppError;
use ringvisit::seo::SeoCatalog;
use ringvisit::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let lead_service = live_lead_service(&config.site)?;
    let catalog = Arc::new(SeoCatalog::new(config.site.clone()));

    let app = with_site_routes(lead_service, catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        contact_webhook = %config.site.webhooks.contact,
        partner_webhook = %config.site.webhooks.partner,
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
