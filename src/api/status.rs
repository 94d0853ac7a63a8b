//! Status Routes
//!
//! Health checks. Public, no session required.
//!
//! Routes:
//! - GET /health - Basic health check
//! - GET /health/ready - Readiness check (database reachable)
//! - GET /health/live - Liveness check (server responding)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Build status routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<DependencyCheck>,
}

#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub name: String,
    pub status: HealthStatus,
    pub latency_ms: Option<u64>,
    pub message: Option<String>,
}

/// Basic health check.
///
/// GET /health
#[axum::debug_handler]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: Utc::now(),
    })
}

/// Readiness check.
///
/// GET /health/ready
///
/// Returns 503 when the database cannot be reached.
#[axum::debug_handler]
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_check = check_database(&state).await;
    let ready = db_check.status == HealthStatus::Healthy;

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            checks: vec![db_check],
        }),
    )
}

/// Liveness check.
///
/// GET /health/live
#[axum::debug_handler]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> DependencyCheck {
    let start = Instant::now();
    let result = crate::db::health_check(&state.db).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(()) => (HealthStatus::Healthy, None),
        Err(e) => {
            tracing::warn!(error = %e, "Database readiness check failed");
            (HealthStatus::Unhealthy, Some("Database unreachable".to_string()))
        }
    };

    DependencyCheck {
        name: "database".into(),
        status,
        latency_ms: Some(latency_ms),
        message,
    }
}
