//! Service layer for Logbook.
//!
//! - Crud (the generic create/read/update/delete flow with owner checks)
//! - Render (presentation boundary between handlers and templates)

pub mod crud;
pub mod render;

pub use crud::{CrudController, DeleteOutcome, FormOutcome, FormState};
pub use render::{JsonRenderer, Page, Renderer};
