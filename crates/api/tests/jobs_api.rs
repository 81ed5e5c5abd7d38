//! Integration tests for job status and cancellation endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: GET /jobs/{id} answers 404 for an unknown job
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_job_returns_404() {
    let app = common::build_test_app().await;

    let id = uuid::Uuid::new_v4();
    let response = get(app.router.clone(), &format!("/api/v1/jobs/{id}")).await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: a spawned job reports progress fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn spawned_job_reports_progress_fields() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.router.clone(),
        "/api/v1/stories",
        json!({ "animal": "lynx" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    let job_id = body["data"]["job_id"].as_str().unwrap().to_string();

    let response = get(app.router.clone(), &format!("/api/v1/jobs/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let job = &body["data"];
    assert_eq!(job["id"], job_id);
    assert!(job["percent"].is_u64());
    assert!(job["stage"].is_string());
    assert!(job["status"].is_string());
}

// ---------------------------------------------------------------------------
// Test: POST /jobs/{id}/cancel answers 404 for an unknown job
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancel_unknown_job_returns_404() {
    let app = common::build_test_app().await;

    let id = uuid::Uuid::new_v4();
    let response = post_json(
        app.router.clone(),
        &format!("/api/v1/jobs/{id}/cancel"),
        json!({}),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: cancelling a terminal job answers 409
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancel_terminal_job_returns_conflict() {
    let app = common::build_test_app().await;

    // Create a job directly in the registry and complete it.
    let (job_id, _cancel) = app
        .pipeline
        .jobs()
        .create(wildtale_pipeline::JobKind::StoryGeneration, None)
        .await;
    app.pipeline
        .jobs()
        .complete(job_id, json!({"ok": true}))
        .await;

    let response = post_json(
        app.router.clone(),
        &format!("/api/v1/jobs/{job_id}/cancel"),
        json!({}),
    )
    .await;

    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

// ---------------------------------------------------------------------------
// Test: cancelling a queued job succeeds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancel_queued_job_succeeds() {
    let app = common::build_test_app().await;

    let (job_id, cancel) = app
        .pipeline
        .jobs()
        .create(wildtale_pipeline::JobKind::VideoProduction, None)
        .await;

    let response = post_json(
        app.router.clone(),
        &format!("/api/v1/jobs/{job_id}/cancel"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["cancelled"], true);
    assert!(cancel.is_cancelled());
}
