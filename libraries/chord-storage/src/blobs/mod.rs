//! Local object store slice
//!
//! Keyed binary payloads for device-local tracks. One record per id,
//! last write wins; a failed write is surfaced to the caller so the
//! owning track is never enqueued on a phantom payload.

use async_trait::async_trait;
use chord_core::{ObjectStore, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Store a payload under `id`, replacing any previous record
pub async fn put(pool: &SqlitePool, id: &str, payload: &[u8]) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO blobs (id, payload, stored_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(payload)
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;

    tracing::debug!(object_id = id, bytes = payload.len(), "stored local payload");
    Ok(())
}

/// Fetch the payload for `id`, or `None` when absent
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Vec<u8>>> {
    let row = sqlx::query("SELECT payload FROM blobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get::<Vec<u8>, _>("payload")))
}

/// Delete the payload for `id`; absent ids are a no-op
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM blobs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// `SQLite`-backed implementation of the core [`ObjectStore`] seam
///
/// Thin wrapper so the resolver can consume the slice without a sqlx
/// dependency of its own.
#[derive(Clone)]
pub struct SqliteObjectStore {
    pool: SqlitePool,
}

impl SqliteObjectStore {
    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObjectStore for SqliteObjectStore {
    async fn put(&self, id: &str, payload: &[u8]) -> Result<()> {
        put(&self.pool, id, payload).await
    }

    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
        get(&self.pool, id).await
    }
}
