//! Middleware for Logbook.
//!
//! - `session_auth` - Session/cookie validation for every page route

mod session_auth;

pub use session_auth::{login_redirect, require_identity, SESSION_COOKIE_NAME};
