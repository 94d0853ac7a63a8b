//! Common test utilities and helpers.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use logbook::db::{self, CreateUser, DbPool};
use logbook::middleware::SESSION_COOKIE_NAME;
use logbook::AppState;
use serde_json::Value;

/// Create a test state over an in-memory database with the schema applied
pub async fn setup_state() -> AppState {
    let pool = db::init_pool(":memory:")
        .await
        .expect("Failed to create test database");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to apply schema");
    AppState::from_pool(pool)
}

/// Create a user with a live session and return `(user_id, session_id)`
pub async fn create_test_user(pool: &DbPool, name: &str) -> (String, String) {
    let user = db::create_user(
        pool,
        CreateUser {
            id: nanoid::nanoid!(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
            display_name: Some(name.to_string()),
        },
    )
    .await
    .expect("Failed to create test user");

    let session = db::create_session(pool, &user.id, 3600)
        .await
        .expect("Failed to create test session");

    (user.id, session.id)
}

/// Extract JSON body from response
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// The `Location` header of a redirect
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Value of a cookie set by the response, if any
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v[prefix.len()..].split(';').next().unwrap_or("").to_string())
}

/// Create a GET request without a session
pub fn anonymous_get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Create a GET request carrying the session cookie
pub fn get_request(uri: &str, session: &str) -> Request<Body> {
    get_with_cookies(uri, &format!("{}={}", SESSION_COOKIE_NAME, session))
}

/// Create a GET request with a raw `Cookie` header
pub fn get_with_cookies(uri: &str, cookies: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookies)
        .body(Body::empty())
        .unwrap()
}

/// Create a POST request with a form-urlencoded body
pub fn post_form(uri: &str, session: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE_NAME, session))
        .body(Body::from(body))
        .unwrap()
}
