//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT
//! in-memory) to match production behavior and properly test migrations,
//! constraints, and indexes.

#![allow(dead_code)]

use chord_core::{Identity, Playlist, Track, TrackId};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = chord_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        chord_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, temp_dir }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Database URL, for tests that reopen the same file
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.temp_dir.path().join("test.db").display())
    }
}

/// Test fixture: a remote track with a predictable id
pub fn remote_track(id: &str, title: &str) -> Track {
    let mut track = Track::remote(title, "Test Artist", format!("https://cdn.example/{id}.mp3"));
    track.id = TrackId::new(id);
    track
}

/// Test fixture: a device-local track backed by a stored blob
pub fn local_track(id: &str, title: &str, object_id: &str) -> Track {
    let mut track = Track::local(title, "Test Artist", object_id);
    track.id = TrackId::new(id);
    track
}

/// Test fixture: create a playlist owned by `user` with two remote tracks
pub async fn create_test_playlist(pool: &SqlitePool, user: &str, name: &str) -> Playlist {
    let tracks = vec![
        remote_track(&format!("{name}-t1"), "First"),
        remote_track(&format!("{name}-t2"), "Second"),
    ];
    chord_storage::playlists::create(pool, &Identity::user(user), name, &tracks)
        .await
        .expect("Failed to create test playlist")
}
