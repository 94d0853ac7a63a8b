//! User database queries.
//!
//! Accounts are provisioned by the login flow; the web app only needs to
//! resolve a session's user.

use crate::models::{now, User};
use crate::{Error, Result};

use super::DbPool;

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Create a new user.
pub async fn create_user(pool: &DbPool, input: CreateUser) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, display_name, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, email, display_name, created_at
        "#,
    )
    .bind(&input.id)
    .bind(&input.email)
    .bind(&input.display_name)
    .bind(now())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a user by ID.
pub async fn get_user(pool: &DbPool, id: &str) -> Result<User> {
    get_user_optional(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
}

/// Get a user by ID, `None` when absent.
pub async fn get_user_optional(pool: &DbPool, id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, display_name, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
