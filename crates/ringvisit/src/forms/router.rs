use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::dispatch::{DispatchReporter, WebhookTransport};
use super::feedback::{FormSession, NotificationSurface, SubmissionFeedback};
use super::payload::Clock;
use super::service::LeadCaptureService;
use super::validator::RawInput;
use super::FormType;

/// Router builder exposing the contact and partner form endpoints.
pub fn lead_router<T, R, N, C>(service: Arc<LeadCaptureService<T, R, N, C>>) -> Router
where
    T: WebhookTransport + 'static,
    R: DispatchReporter + 'static,
    N: NotificationSurface + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/forms/contact", post(contact_handler::<T, R, N, C>))
        .route("/api/v1/forms/partner", post(partner_handler::<T, R, N, C>))
        .with_state(service)
}

pub(crate) async fn contact_handler<T, R, N, C>(
    State(service): State<Arc<LeadCaptureService<T, R, N, C>>>,
    Json(input): Json<RawInput>,
) -> Response
where
    T: WebhookTransport + 'static,
    R: DispatchReporter + 'static,
    N: NotificationSurface + 'static,
    C: Clock + 'static,
{
    submit_form(&service, FormType::Contact, input).await
}

pub(crate) async fn partner_handler<T, R, N, C>(
    State(service): State<Arc<LeadCaptureService<T, R, N, C>>>,
    Json(input): Json<RawInput>,
) -> Response
where
    T: WebhookTransport + 'static,
    R: DispatchReporter + 'static,
    N: NotificationSurface + 'static,
    C: Clock + 'static,
{
    submit_form(&service, FormType::Partner, input).await
}

// Each request is its own form instance.
async fn submit_form<T, R, N, C>(
    service: &LeadCaptureService<T, R, N, C>,
    form_type: FormType,
    input: RawInput,
) -> Response
where
    T: WebhookTransport,
    R: DispatchReporter,
    N: NotificationSurface,
    C: Clock,
{
    let session = FormSession::new(form_type);
    let feedback = service.submit(&session, input).await;
    feedback_response(feedback)
}

pub(crate) fn feedback_response(feedback: SubmissionFeedback) -> Response {
    let status = match &feedback {
        SubmissionFeedback::Accepted { .. } => StatusCode::OK,
        SubmissionFeedback::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionFeedback::Busy => StatusCode::CONFLICT,
    };
    (status, Json(feedback)).into_response()
}
