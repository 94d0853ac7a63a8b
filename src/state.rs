//! Application state for Logbook.
//!
//! Contains the shared state that is passed to all handlers.

use std::sync::Arc;

use crate::db::{DbPool, DocumentCollection};
use crate::models::Entity;
use crate::services::{CrudController, JsonRenderer, Renderer};
use crate::{config, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Turns page descriptions into responses.
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Open the configured database and apply the schema.
    pub async fn new() -> Result<Self> {
        let config = config::config();

        let db = crate::db::init_pool(&config.database.path).await?;
        crate::db::initialize_schema(&db).await?;

        Ok(Self::from_pool(db))
    }

    /// State over an existing pool, with the JSON renderer.
    pub fn from_pool(db: DbPool) -> Self {
        Self {
            db,
            renderer: Arc::new(JsonRenderer),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// CRUD controller for entity `E` over its document collection.
    pub fn controller<E: Entity>(&self) -> CrudController<E> {
        CrudController::new(Arc::new(DocumentCollection::<E>::new(self.db.clone())))
    }
}
