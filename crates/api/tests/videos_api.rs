//! Integration tests for the rendered video library endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, delete, get};

/// Drop a fake rendered video into the library directory.
async fn seed_video(store: &wildtale_store::StoryStore, name: &str, bytes: &[u8]) {
    let path = store.layout().videos_dir().join(name);
    tokio::fs::write(path, bytes).await.unwrap();
}

// ---------------------------------------------------------------------------
// Test: GET /videos lists library entries with sizes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_videos_returns_entries_with_sizes() {
    let app = common::build_test_app().await;
    seed_video(&app.store, "The_Otter_Story.mp4", b"not really mp4").await;

    let response = get(app.router.clone(), "/api/v1/videos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let videos = body["data"].as_array().expect("data must be an array");
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["file_name"], "The_Otter_Story.mp4");
    assert_eq!(videos[0]["size_bytes"], 14);
}

// ---------------------------------------------------------------------------
// Test: GET /videos/{file_name} downloads with mp4 headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_video_sets_mp4_headers() {
    let app = common::build_test_app().await;
    seed_video(&app.store, "clip.mp4", b"content").await;

    let response = get(app.router.clone(), "/api/v1/videos/clip.mp4").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert_eq!(headers.get("content-type").unwrap(), "video/mp4");
    let disposition = headers
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(disposition.contains("clip.mp4"));
}

// ---------------------------------------------------------------------------
// Test: GET /videos/{file_name} answers 404 for a missing file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_missing_video_returns_404() {
    let app = common::build_test_app().await;

    let response = get(app.router.clone(), "/api/v1/videos/nope.mp4").await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: path traversal in the file name is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_video_rejects_traversal() {
    let app = common::build_test_app().await;

    // Encoded "../" so the path survives HTTP routing and reaches the handler.
    let response = get(app.router.clone(), "/api/v1/videos/..%2Fsecret.mp4").await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: DELETE /videos/{file_name} removes only the video
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_video_removes_file() {
    let app = common::build_test_app().await;
    seed_video(&app.store, "gone.mp4", b"bye").await;

    let response = delete(app.router.clone(), "/api/v1/videos/gone.mp4").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.router.clone(), "/api/v1/videos/gone.mp4").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
