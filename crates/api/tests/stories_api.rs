//! Integration tests for the story endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, delete, get, post_json};
use serde_json::json;

use wildtale_core::story::{Scene, Story, StoryDraft};

/// Build a small two-scene story for seeding the store directly.
fn sample_story(animal: &str) -> Story {
    let draft = StoryDraft {
        story_title: format!("A Day with the {animal}"),
        scenes: vec![
            Scene {
                scene_number: 1,
                narration: "Dawn breaks over the forest.".to_string(),
                image_prompt: "a forest at dawn".to_string(),
                duration: 5.0,
                background_music: None,
                image_file: None,
                audio_file: None,
            },
            Scene {
                scene_number: 2,
                narration: "The search for breakfast begins.".to_string(),
                image_prompt: "an animal foraging".to_string(),
                duration: 6.0,
                background_music: None,
                image_file: None,
                audio_file: None,
            },
        ],
        total_duration: 11.0,
    };
    Story::from_draft(draft, animal)
}

// ---------------------------------------------------------------------------
// Test: POST /stories with a valid request answers 202 with a job id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_story_returns_accepted_with_job_id() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.router.clone(),
        "/api/v1/stories",
        json!({ "animal": "red panda", "num_scenes": 4 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    let job_id = body["data"]["job_id"]
        .as_str()
        .expect("job_id must be a string")
        .to_string();

    // The spawned job must be queryable immediately.
    let response = get(app.router.clone(), &format!("/api/v1/jobs/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "story_generation");
}

// ---------------------------------------------------------------------------
// Test: POST /stories rejects an empty animal name
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_story_rejects_empty_animal() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.router.clone(),
        "/api/v1/stories",
        json!({ "animal": "   " }),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Test: POST /stories rejects an out-of-range scene count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_story_rejects_scene_count_out_of_range() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.router.clone(),
        "/api/v1/stories",
        json!({ "animal": "otter", "num_scenes": 20 }),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Test: GET /stories lists saved stories newest first, without scene bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_stories_returns_summaries() {
    let app = common::build_test_app().await;
    app.store.save(&sample_story("otter")).await.unwrap();

    let response = get(app.router.clone(), "/api/v1/stories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let stories = body["data"].as_array().expect("data must be an array");
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0]["animal"], "otter");
    assert_eq!(stories[0]["num_scenes"], 2);
    assert_eq!(stories[0]["status"], "draft");
    assert!(stories[0].get("scenes").is_none());
}

// ---------------------------------------------------------------------------
// Test: GET /stories/{id} returns the full story
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_story_returns_full_scenes() {
    let app = common::build_test_app().await;
    let story = sample_story("fennec fox");
    app.store.save(&story).await.unwrap();

    let response = get(app.router.clone(), &format!("/api/v1/stories/{}", story.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], story.id.to_string());
    assert_eq!(body["data"]["scenes"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total_duration"], 11.0);
}

// ---------------------------------------------------------------------------
// Test: GET /stories/{id} answers 404 for an unknown id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_story_unknown_id_returns_404() {
    let app = common::build_test_app().await;

    let id = uuid::Uuid::new_v4();
    let response = get(app.router.clone(), &format!("/api/v1/stories/{id}")).await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: DELETE /stories/{id} removes the story
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_story_removes_it() {
    let app = common::build_test_app().await;
    let story = sample_story("capuchin");
    app.store.save(&story).await.unwrap();

    let response = delete(app.router.clone(), &format!("/api/v1/stories/{}", story.id)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.router.clone(), &format!("/api/v1/stories/{}", story.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET /stories/{id}/download serves the JSON file as an attachment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_story_sets_attachment_headers() {
    let app = common::build_test_app().await;
    let story = sample_story("puffin");
    app.store.save(&story).await.unwrap();

    let response = get(
        app.router.clone(),
        &format!("/api/v1/stories/{}/download", story.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.ends_with(".json\""));

    // The downloaded bytes must round-trip back into the same story.
    let body = body_json(response).await;
    assert_eq!(body["id"], story.id.to_string());
    assert_eq!(body["animal"], "puffin");
}

// ---------------------------------------------------------------------------
// Test: GET /stories/{id}/video answers 404 before production
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_video_before_production_returns_404() {
    let app = common::build_test_app().await;
    let story = sample_story("otter");
    app.store.save(&story).await.unwrap();

    let response = get(
        app.router.clone(),
        &format!("/api/v1/stories/{}/video", story.id),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: POST /stories/{id}/video answers 404 for an unknown story
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_video_unknown_story_returns_404() {
    let app = common::build_test_app().await;

    let id = uuid::Uuid::new_v4();
    let response = post_json(
        app.router.clone(),
        &format!("/api/v1/stories/{id}/video"),
        json!({ "voice": "nova" }),
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: POST /stories/{id}/video for a saved story answers 202
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_video_returns_accepted_with_job_id() {
    let app = common::build_test_app().await;
    let story = sample_story("otter");
    app.store.save(&story).await.unwrap();

    let response = post_json(
        app.router.clone(),
        &format!("/api/v1/stories/{}/video", story.id),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    let job_id = body["data"]["job_id"]
        .as_str()
        .expect("job_id must be a string")
        .to_string();

    let response = get(app.router.clone(), &format!("/api/v1/jobs/{job_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "video_production");
    assert_eq!(body["data"]["story_id"], story.id.to_string());
}
