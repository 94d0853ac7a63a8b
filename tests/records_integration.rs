//! HTTP Integration Tests for Logbook
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against an
//! in-memory SQLite database and the JSON renderer.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::*;
use logbook::api::{self, FLASH_COOKIE_NAME};
use logbook::db;
use logbook::middleware::SESSION_COOKIE_NAME;
use logbook::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn setup() -> (AppState, Router) {
    let state = setup_state().await;
    let app = api::app(state.clone());
    (state, app)
}

/// POST a valid deer and return its detail path
async fn create_deer(app: &Router, session: &str, name: &str, likes: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/deer/new",
            session,
            &[("name", name), ("description", "Seen by the creek"), ("likes", likes)],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response)
}

fn flashes(body: &Value) -> Vec<String> {
    body["context"]["flashes"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

// ============================================================================
// Ownership Scenario
// ============================================================================

#[tokio::test]
async fn test_create_view_and_owner_gated_delete() {
    let (state, app) = setup().await;
    let (alice_id, alice) = create_test_user(&state.db, "Alice").await;
    let (_bob_id, bob) = create_test_user(&state.db, "Bob").await;

    let path = create_deer(&app, &alice, "Bambi", "3").await;
    assert!(path.starts_with("/deer/"));
    let id = path.trim_start_matches("/deer/").to_string();

    // Detail page shows the stamped owner
    let response = app.clone().oneshot(get_request(&path, &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["view"], "deer");
    assert_eq!(body["context"]["deer"]["owner"], json!(alice_id));
    assert_eq!(body["context"]["deer"]["name"], "Bambi");
    assert_eq!(body["context"]["deer"]["likes"], 3);
    assert_eq!(body["context"]["is_owner"], true);

    // Bob cannot delete it
    let response = app
        .clone()
        .oneshot(get_request(&format!("/deer/delete/{}", id), &bob))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["view"], "deers");
    assert_eq!(body["context"]["deleted"], false);
    assert_eq!(flashes(&body), vec!["You can't delete a Deer you don't own."]);
    assert_eq!(body["context"]["deers"].as_array().unwrap().len(), 1);

    // Alice can
    let response = app
        .clone()
        .oneshot(get_request(&format!("/deer/delete/{}", id), &alice))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["context"]["deleted"], true);
    assert_eq!(flashes(&body), vec!["The Deer was deleted."]);
    assert!(body["context"]["deers"].as_array().unwrap().is_empty());

    // And it is gone
    let response = app.oneshot(get_request(&path, &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_edit_redirects_with_notice() {
    let (state, app) = setup().await;
    let (_alice_id, alice) = create_test_user(&state.db, "Alice").await;
    let (_bob_id, bob) = create_test_user(&state.db, "Bob").await;

    let path = create_deer(&app, &alice, "Bambi", "3").await;
    let id = path.trim_start_matches("/deer/").to_string();

    let response = app
        .clone()
        .oneshot(post_form(
            &format!("/deer/edit/{}", id),
            &bob,
            &[("name", "Mine now"), ("description", "x"), ("likes", "0")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), path);
    let flash = set_cookie_value(&response, FLASH_COOKIE_NAME).expect("flash cookie set");

    // The notice shows once on the detail page and nothing was written
    let cookies = format!("{}={}; {}={}", SESSION_COOKIE_NAME, bob, FLASH_COOKIE_NAME, flash);
    let response = app.oneshot(get_with_cookies(&path, &cookies)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie_value(&response, FLASH_COOKIE_NAME).is_some());
    let body = extract_json(response).await;
    assert_eq!(flashes(&body), vec!["You can't edit a Deer you don't own."]);
    assert_eq!(body["context"]["is_owner"], false);
    assert_eq!(body["context"]["deer"]["name"], "Bambi");
}

#[tokio::test]
async fn test_owner_edit_prefills_and_updates() {
    let (state, app) = setup().await;
    let (alice_id, alice) = create_test_user(&state.db, "Alice").await;

    let path = create_deer(&app, &alice, "Bambi", "3").await;
    let id = path.trim_start_matches("/deer/").to_string();
    let edit_path = format!("/deer/edit/{}", id);

    let response = app.clone().oneshot(get_request(&edit_path, &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["view"], "deerform");
    assert_eq!(body["context"]["record_id"], json!(id));
    assert_eq!(body["context"]["form"]["values"]["likes"], "3");

    let response = app
        .clone()
        .oneshot(post_form(
            &edit_path,
            &alice,
            &[("name", "Bambi"), ("description", "Grown up"), ("likes", "7")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), path);

    let body = extract_json(app.oneshot(get_request(&path, &alice)).await.unwrap()).await;
    assert_eq!(body["context"]["deer"]["likes"], 7);
    assert_eq!(body["context"]["deer"]["description"], "Grown up");
    assert_eq!(body["context"]["deer"]["owner"], json!(alice_id));
}

// ============================================================================
// Forms
// ============================================================================

#[tokio::test]
async fn test_blank_form_has_defaults() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    let response = app.oneshot(get_request("/deer/new", &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["view"], "deerform");
    assert_eq!(body["context"]["form"]["values"]["likes"], "0");
    assert_eq!(body["context"]["form"]["errors"], json!({}));
    assert_eq!(body["context"]["record_id"], Value::Null);
}

#[tokio::test]
async fn test_invalid_input_rerenders_form() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/deer/new",
            &alice,
            &[("name", "Bambi"), ("description", "fast"), ("likes", "lots")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = extract_json(response).await;
    assert_eq!(body["view"], "deerform");
    assert_eq!(body["context"]["form"]["values"]["likes"], "lots");
    assert!(!body["context"]["form"]["errors"]["likes"]
        .as_array()
        .unwrap()
        .is_empty());

    // Nothing was stored
    let body = extract_json(app.oneshot(get_request("/deers", &alice)).await.unwrap()).await;
    assert!(body["context"]["deers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sleep_minutes_out_of_range() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    let response = app
        .oneshot(post_form(
            "/sleep/new",
            &alice,
            &[
                ("rating", "4"),
                ("feel", "3"),
                ("start_time", "22:30"),
                ("end_time", "06:45"),
                ("sleep_date", "2024-03-01"),
                ("wake_date", "2024-03-02"),
                ("minutes_to_sleep", "200"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = extract_json(response).await;
    assert_eq!(
        body["context"]["form"]["errors"]["minutes_to_sleep"],
        json!(["Enter a number between 0 and 180."])
    );
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_list_aliases_match() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    create_deer(&app, &alice, "Bambi", "3").await;
    create_deer(&app, &alice, "Faline", "1").await;

    let short = extract_json(app.clone().oneshot(get_request("/deers", &alice)).await.unwrap()).await;
    let long = extract_json(app.oneshot(get_request("/deer/list", &alice)).await.unwrap()).await;

    assert_eq!(short, long);
    let names: Vec<&str> = short["context"]["deers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bambi", "Faline"]);
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    for uri in ["/deer/nope", "/deer/edit/nope", "/deer/delete/nope", "/blog/nope"] {
        let response = app.clone().oneshot(get_request(uri, &alice)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_collections_are_separate() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    create_deer(&app, &alice, "Bambi", "3").await;

    let body = extract_json(app.oneshot(get_request("/blogs", &alice)).await.unwrap()).await;
    assert_eq!(body["view"], "blogs");
    assert!(body["context"]["blogs"].as_array().unwrap().is_empty());
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_anonymous_request_redirects_to_login() {
    let (_state, app) = setup().await;

    let response = app.oneshot(anonymous_get("/deers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fdeers");
}

#[tokio::test]
async fn test_unknown_session_redirects_to_login() {
    let (_state, app) = setup().await;

    let response = app
        .oneshot(get_request("/deer/new", "not-a-session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fdeer%2Fnew");
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    let (state, app) = setup().await;
    let (_id, alice) = create_test_user(&state.db, "Alice").await;

    sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
        .bind(chrono::Utc::now() - chrono::Duration::hours(1))
        .bind(&alice)
        .execute(&state.db)
        .await
        .unwrap();

    let response = app.oneshot(get_request("/deers", &alice)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let (state, app) = setup().await;
    tokio_test::assert_ok!(db::health_check(&state.db).await);

    for uri in ["/health", "/health/live", "/health/ready"] {
        let response = app.clone().oneshot(anonymous_get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }

    let body = extract_json(app.oneshot(anonymous_get("/health/ready")).await.unwrap()).await;
    assert_eq!(body["ready"], true);
}
