//! Login session database queries.
//!
//! Session ids are random nanoids handed to the browser in a cookie; the
//! row maps them to a user until `expires_at`.

use chrono::{DateTime, Duration, Utc};

use crate::models::{now, Session};
use crate::{Error, Result};

use super::DbPool;

/// `from + max_age_seconds`, failing instead of overflowing.
pub fn session_expiry(from: DateTime<Utc>, max_age_seconds: u64) -> Result<DateTime<Utc>> {
    i64::try_from(max_age_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|age| from.checked_add_signed(age))
        .ok_or_else(|| {
            Error::Internal(format!("Session lifetime out of range: {}s", max_age_seconds))
        })
}

/// Create a session for `user_id` lasting `max_age_seconds`.
pub async fn create_session(pool: &DbPool, user_id: &str, max_age_seconds: u64) -> Result<Session> {
    let created_at = now();
    let expires_at = session_expiry(created_at, max_age_seconds)?;

    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, user_id, created_at, expires_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, created_at, expires_at
        "#,
    )
    .bind(nanoid::nanoid!(32))
    .bind(user_id)
    .bind(created_at)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Look up a session by id.
pub async fn get_session(pool: &DbPool, id: &str) -> Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(
        "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Delete a session. Deleting an unknown id is not an error.
pub async fn delete_session(pool: &DbPool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Move a session's expiry to `expires_at`.
pub async fn extend_session(pool: &DbPool, id: &str, expires_at: DateTime<Utc>) -> Result<()> {
    sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
        .bind(expires_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
