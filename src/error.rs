//! Error types for Logbook.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::forms::FieldErrors;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    // Persistence errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,

            // 403
            Self::Forbidden => StatusCode::FORBIDDEN,

            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 422
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500
            Self::Database(_) | Self::Serialization(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }

    /// Server-side failures are logged in full and answered generically.
    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let message = if self.is_internal() {
            tracing::error!(error = %self, code, "Request failed");
            "Something went wrong while handling this request".to_string()
        } else {
            self.to_string()
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Self::Validation(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound("deer x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::Validation(FieldErrors::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Unauthenticated.error_code(), "UNAUTHENTICATED");
        assert_eq!(Error::Forbidden.error_code(), "FORBIDDEN");
        assert_eq!(Error::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(Error::Validation(FieldErrors::new()).error_code(), "VALIDATION_ERROR");
        assert_eq!(Error::Internal("x".into()).error_code(), "INTERNAL_ERROR");
        assert_eq!(Error::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response = Error::Internal("disk on fire at /var/secret".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!body.contains("/var/secret"));
        assert!(body.contains("INTERNAL_ERROR"));
    }

    #[tokio::test]
    async fn test_not_found_is_user_visible() {
        let response = Error::NotFound("deer 42".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Resource not found: deer 42");
    }
}
