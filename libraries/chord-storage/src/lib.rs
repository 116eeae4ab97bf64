//! Chord Player Storage
//!
//! `SQLite` durable layer for the playback core: the local object store
//! (raw audio payloads for device-local tracks) and the playlist store
//! (owned and shared collections).
//!
//! # Architecture
//!
//! - **Vertical slicing**: each feature owns its own queries
//!   ([`blobs`], [`playlists`])
//! - **Write-then-confirm**: every mutating operation commits durably
//!   before it reports success; callers never observe an optimistic write
//! - **Snapshot reads**: queries return owned values, never live views
//!
//! # Example
//!
//! ```rust,no_run
//! use chord_storage::{create_pool, run_migrations};
//! use chord_core::Identity;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chord.db").await?;
//! run_migrations(&pool).await?;
//!
//! let session = Identity::user("user-1");
//! let mine = chord_storage::playlists::get_owned(&pool, session.user_id()?).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;

// Vertical slices
pub mod blobs;
pub mod playlists;

pub use blobs::SqliteObjectStore;
pub use error::StorageError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open (creating if missing) a `SQLite` database pool
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    Ok(pool)
}

/// Run embedded schema migrations
///
/// Migrations are embedded into the binary for reliability across
/// execution contexts; each statement is idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    const MIGRATIONS: &[&str] = &[
        include_str!("../migrations/20250301000001_create_blobs.sql"),
        include_str!("../migrations/20250301000002_create_playlists.sql"),
        include_str!("../migrations/20250301000003_create_playlist_tracks.sql"),
        include_str!("../migrations/20250301000004_create_shared_playlists.sql"),
    ];

    for migration in MIGRATIONS {
        for statement in migration.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
        }
    }

    Ok(())
}
