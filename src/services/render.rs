//! Presentation boundary.
//!
//! Handlers describe what to show as a [`Page`]: a view name plus a JSON
//! context. A [`Renderer`] turns that into a response. HTML templating is
//! supplied by the deployment; the built-in [`JsonRenderer`] serves the
//! page description as JSON so any front end can consume it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// A view to render with its data context.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub view: String,
    pub status: StatusCode,
    pub context: Value,
}

impl Page {
    pub fn new(view: impl Into<String>, context: Value) -> Self {
        Self {
            view: view.into(),
            status: StatusCode::OK,
            context,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, page: Page) -> Response;
}

/// Serves `{"view": ..., "context": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, page: Page) -> Response {
        let body = Json(json!({
            "view": page.view,
            "context": page.context,
        }));
        (page.status, body).into_response()
    }
}
