//! Session-based authentication middleware.
//!
//! Resolves the `logbook_session` cookie to a [`CurrentUser`] for every
//! page route. Sessions are created by the login flow, which lives outside
//! this service; callers without a valid session are redirected to it.
//!
//! # Session Flow
//!
//! 1. User signs in through the login entry point
//! 2. The login flow stores a session row and sets the `logbook_session` cookie
//! 3. Subsequent requests include the cookie, validated here
//! 4. Expired sessions are deleted and the caller is sent back to log in

use axum::{
    body::Body,
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::models::CurrentUser;
use crate::{config::config, db, error::Error, AppState};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "logbook_session";

/// Middleware that requires a valid session.
///
/// Injects [`CurrentUser`] into request extensions. Without a usable
/// session the request is answered with a redirect to the configured login
/// path, carrying the original URI as `next`.
///
/// # Errors
///
/// Fails only when the session store itself cannot be read.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use logbook::middleware::require_identity;
///
/// let app = Router::new()
///     .route("/deers", get(list))
///     .layer(middleware::from_fn_with_state(state.clone(), require_identity));
/// ```
pub async fn require_identity(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let user = match jar.get(SESSION_COOKIE_NAME) {
        Some(cookie) => resolve_session(&state, cookie.value()).await?,
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            debug!(uri = %req.uri(), "No valid session, redirecting to login");
            Ok(login_redirect(req.uri()).into_response())
        }
    }
}

/// Look up a session and its user. `None` for unknown or expired sessions.
async fn resolve_session(state: &AppState, session_id: &str) -> Result<Option<CurrentUser>, Error> {
    let Some(session) = db::get_session(&state.db, session_id).await? else {
        return Ok(None);
    };

    if session.is_expired() {
        // Clean up expired session
        let pool = state.db.clone();
        let sid = session.id.clone();
        tokio::spawn(async move {
            let _ = db::delete_session(&pool, &sid).await;
        });
        return Ok(None);
    }

    let user = db::get_user_optional(&state.db, &session.user_id).await?;

    // Extend the session once it is more than halfway through its lifetime
    let max_age = config().session.max_age_seconds;
    let now = chrono::Utc::now();
    let halfway = db::session_expiry(now, max_age / 2)?;
    if user.is_some() && session.expires_at < halfway {
        let new_expires = db::session_expiry(now, max_age)?;
        let pool = state.db.clone();
        let sid = session.id.clone();
        tokio::spawn(async move {
            let _ = db::extend_session(&pool, &sid, new_expires).await;
        });
    }

    Ok(user.map(CurrentUser::from))
}

/// `303` to the login path with the original path and query as `next`.
pub fn login_redirect(uri: &Uri) -> Redirect {
    let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Redirect::to(&format!(
        "{}?next={}",
        config().auth.login_path,
        urlencoding::encode(next)
    ))
}
