//! User and session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. Accounts are created by the login flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A server-side login session.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// The caller of a request, as established by the session middleware.
///
/// Every controller operation takes this explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        CurrentUser {
            user_id: user.id,
            email: user.email,
            name: user.display_name,
        }
    }
}

impl CurrentUser {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            name: None,
        }
    }
}
