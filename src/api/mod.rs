//! API Routes for Logbook
//!
//! This module combines all routes into a single router.
//! Routes are organized by domain and apply appropriate middleware.

mod flash;
pub mod records;
pub mod status;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::require_identity;
use crate::models::{Blog, Clinic, Consent, Deer, Emoji, Meditation, Profile, Sleep};
use crate::AppState;

pub use flash::FLASH_COOKIE_NAME;

/// Build the complete router, ready to serve.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the complete route table.
///
/// Route structure:
/// - /health, /health/ready, /health/live - Health checks (public)
/// - /<entity>/*, /<entities> - Record pages (session required)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health and status endpoints (public)
        .merge(status::routes())
        // Record pages
        .merge(protected_routes(state))
}

/// Record routes for every entity, behind the session check.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(records::routes::<Deer>())
        .merge(records::routes::<Emoji>())
        .merge(records::routes::<Meditation>())
        .merge(records::routes::<Blog>())
        .merge(records::routes::<Sleep>())
        .merge(records::routes::<Clinic>())
        .merge(records::routes::<Consent>())
        .merge(records::routes::<Profile>())
        .layer(axum::middleware::from_fn_with_state(state, require_identity))
}
