//! Document collections.
//!
//! Each entity type is stored as one logical collection in the `documents`
//! table. The user-editable fields are kept as a JSON body; the id, owner
//! and timestamps are columns so they can never be rewritten through the
//! body.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::debug;

use super::DbPool;
use crate::models::{new_id, now, Entity, Record};
use crate::{Error, Result};

/// Storage operations the CRUD controller relies on.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fetch one record, `None` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Record<E>>>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<Record<E>>>;

    /// Store a new record owned by `owner`, assigning its id.
    async fn insert(&self, owner: &str, fields: &E) -> Result<Record<E>>;

    /// Replace the content fields and refresh `modified_at`.
    /// The owner is left as written at insert.
    async fn update(&self, id: &str, fields: &E) -> Result<Record<E>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    owner_id: String,
    body: String,
    modified_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_record<E: Entity>(self) -> Result<Record<E>> {
        Ok(Record {
            fields: serde_json::from_str(&self.body)?,
            id: self.id,
            owner: self.owner_id,
            modified_at: self.modified_at,
        })
    }
}

/// SQLite-backed collection for entity `E`.
pub struct DocumentCollection<E> {
    pool: DbPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for DocumentCollection<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> DocumentCollection<E> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Number of records in the collection.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = ?")
            .bind(E::NAME)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for DocumentCollection<E> {
    async fn get(&self, id: &str) -> Result<Option<Record<E>>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, owner_id, body, modified_at
            FROM documents
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(E::NAME)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::into_record).transpose()
    }

    async fn list(&self) -> Result<Vec<Record<E>>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, owner_id, body, modified_at
            FROM documents
            WHERE collection = ?
            ORDER BY rowid
            "#,
        )
        .bind(E::NAME)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DocumentRow::into_record).collect()
    }

    async fn insert(&self, owner: &str, fields: &E) -> Result<Record<E>> {
        let body = serde_json::to_string(fields)?;
        let timestamp = now();

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, owner_id, body, created_at, modified_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, owner_id, body, modified_at
            "#,
        )
        .bind(E::NAME)
        .bind(new_id())
        .bind(owner)
        .bind(&body)
        .bind(timestamp)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        debug!(collection = E::NAME, id = %row.id, "Inserted document");
        row.into_record()
    }

    async fn update(&self, id: &str, fields: &E) -> Result<Record<E>> {
        let body = serde_json::to_string(fields)?;

        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = ?, modified_at = ?
            WHERE collection = ? AND id = ?
            RETURNING id, owner_id, body, modified_at
            "#,
        )
        .bind(&body)
        .bind(now())
        .bind(E::NAME)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("{} {}", E::LABEL, id)))?;

        debug!(collection = E::NAME, id = %id, "Updated document");
        row.into_record()
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(E::NAME)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("{} {}", E::LABEL, id)));
        }

        debug!(collection = E::NAME, id = %id, "Deleted document");
        Ok(())
    }
}
