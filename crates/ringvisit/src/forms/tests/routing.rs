use super::common::*;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::forms::feedback::{Notice, SubmissionFeedback};
use crate::forms::router::feedback_response;

fn post_json(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("request encodes"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn contact_route_accepts_valid_payloads() {
    let (service, transport, _, _) = build_service();
    let router = lead_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/forms/contact",
            &serde_json::to_value(contact_input()).expect("input encodes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "accepted");
    assert_eq!(
        payload["notice"]["description"],
        "Check your email for confirmation."
    );
    assert_eq!(payload["values"]["email"], "");
    assert_eq!(transport.posts().len(), 1);
}

#[tokio::test]
async fn contact_route_reports_field_errors() {
    let (service, transport, _, _) = build_service();
    let router = lead_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/forms/contact",
            &json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555123456",
                "serviceInterest": "Scheduling",
                "message": "Too short"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "invalid");
    assert_eq!(payload["errors"]["phone"], "Valid phone number is required");
    assert_eq!(
        payload["errors"]["message"],
        "Message must be at least 10 characters"
    );
    assert!(payload["errors"].get("fullName").is_none());
    assert_eq!(payload["values"]["fullName"], "Jane Doe");
    assert!(transport.posts().is_empty());
}

#[tokio::test]
async fn partner_route_succeeds_when_webhook_is_down() {
    let (service, reporter, _) = build_service_with(&site(), UnreachableTransport);
    let router = lead_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/forms/partner",
            &serde_json::to_value(partner_input()).expect("input encodes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "accepted");
    assert_eq!(payload["notice"]["title"], "Thank you for your interest!");
    assert_eq!(reporter.outcomes().len(), 1);
    assert!(!reporter.outcomes()[0].delivered);
}

#[tokio::test]
async fn busy_feedback_maps_to_conflict() {
    let response = feedback_response(SubmissionFeedback::Busy);
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(read_json_body(response).await, json!({ "status": "busy" }));

    let response = feedback_response(SubmissionFeedback::Accepted {
        notice: Notice {
            title: "ok".to_string(),
            description: None,
        },
        values: Default::default(),
    });
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["notice"].get("description").is_none());
}
