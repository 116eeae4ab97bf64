//! Playlist store slice
//!
//! Two disjoint durable collections per session: playlists the user owns
//! (relational rows, mutable) and playlists shared with the user
//! (immutable JSON snapshots). Every mutation commits before the call
//! returns; a failed commit leaves both collections untouched.

use chord_core::{
    ChordError, Identity, Playlist, PlaylistId, Result, Track, TrackId, TrackSource, UserId,
};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// Create a new private playlist from a track snapshot
///
/// Rejects anonymous sessions, empty names, and empty snapshots. Duplicate
/// track ids inside the snapshot are collapsed to their first occurrence.
pub async fn create(
    pool: &SqlitePool,
    identity: &Identity,
    name: &str,
    tracks: &[Track],
) -> Result<Playlist> {
    let owner = identity.user_id()?.clone();

    if name.trim().is_empty() {
        return Err(ChordError::validation("playlist name must not be empty"));
    }
    if tracks.is_empty() {
        return Err(ChordError::validation(
            "playlist must contain at least one track",
        ));
    }

    let mut snapshot: Vec<Track> = Vec::with_capacity(tracks.len());
    for track in tracks {
        if !snapshot.iter().any(|t| t.id == track.id) {
            snapshot.push(track.clone());
        }
    }

    let playlist = Playlist::new(owner, name, snapshot);
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO playlists (id, owner_id, name, is_public, created_at, updated_at)
         VALUES (?, ?, ?, 0, ?, ?)",
    )
    .bind(&playlist.id)
    .bind(&playlist.owner_id)
    .bind(&playlist.name)
    .bind(playlist.created_at.timestamp())
    .bind(playlist.created_at.timestamp())
    .execute(&mut *tx)
    .await?;

    for (position, track) in playlist.tracks.iter().enumerate() {
        insert_track(&mut tx, &playlist.id, track, position as i64).await?;
    }

    tx.commit().await?;

    tracing::debug!(playlist_id = %playlist.id, tracks = playlist.tracks.len(), "created playlist");
    Ok(playlist)
}

/// Rename an owned playlist
pub async fn rename(
    pool: &SqlitePool,
    user_id: &UserId,
    playlist_id: &PlaylistId,
    new_name: &str,
) -> Result<()> {
    if new_name.trim().is_empty() {
        return Err(ChordError::validation("playlist name must not be empty"));
    }

    let result = sqlx::query(
        "UPDATE playlists SET name = ?, updated_at = ? WHERE id = ? AND owner_id = ?",
    )
    .bind(new_name)
    .bind(Utc::now().timestamp())
    .bind(playlist_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ChordError::PlaylistNotFound(playlist_id.clone()));
    }
    Ok(())
}

/// Delete an owned playlist and its track rows
pub async fn delete(pool: &SqlitePool, user_id: &UserId, playlist_id: &PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ? AND owner_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ChordError::PlaylistNotFound(playlist_id.clone()));
    }

    // ON DELETE CASCADE covers playlist_tracks; keep the explicit delete so
    // the behavior does not depend on the connection's foreign_keys pragma.
    sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Flip the public flag of an owned playlist
///
/// Returns the new visibility. Calling twice restores the original value.
pub async fn toggle_visibility(
    pool: &SqlitePool,
    user_id: &UserId,
    playlist_id: &PlaylistId,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE playlists SET is_public = 1 - is_public, updated_at = ?
         WHERE id = ? AND owner_id = ?",
    )
    .bind(Utc::now().timestamp())
    .bind(playlist_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ChordError::PlaylistNotFound(playlist_id.clone()));
    }

    let row = sqlx::query("SELECT is_public FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("is_public") != 0)
}

/// Append a track to an owned playlist
///
/// A track id may appear at most once per playlist; duplicates are
/// rejected with `AlreadyExists` and the stored snapshot is unchanged.
pub async fn add_track(
    pool: &SqlitePool,
    user_id: &UserId,
    playlist_id: &PlaylistId,
    track: &Track,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let owned = sqlx::query("SELECT 1 FROM playlists WHERE id = ? AND owner_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if owned.is_none() {
        return Err(ChordError::PlaylistNotFound(playlist_id.clone()));
    }

    let duplicate =
        sqlx::query("SELECT 1 FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
            .bind(playlist_id)
            .bind(&track.id)
            .fetch_optional(&mut *tx)
            .await?;
    if duplicate.is_some() {
        return Err(ChordError::AlreadyExists {
            playlist: playlist_id.clone(),
            track: track.id.clone(),
        });
    }

    let next_position: i64 = sqlx::query(
        "SELECT COALESCE(MAX(position), -1) + 1 AS next_pos
         FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?
    .get("next_pos");

    insert_track(&mut tx, playlist_id, track, next_position).await?;

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(Utc::now().timestamp())
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Search public playlists by name
///
/// Case-insensitive substring containment; returns snapshots with tracks
/// loaded, never a live view.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, is_public, created_at FROM playlists
         WHERE is_public = 1 AND instr(lower(name), lower(?)) > 0
         ORDER BY updated_at DESC",
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        playlists.push(row_to_playlist(pool, &row).await?);
    }
    Ok(playlists)
}

/// All playlists owned by `user_id`, tracks loaded
pub async fn get_owned(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT id, owner_id, name, is_public, created_at FROM playlists
         WHERE owner_id = ? ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        playlists.push(row_to_playlist(pool, &row).await?);
    }
    Ok(playlists)
}

/// Append a received playlist snapshot to the shared collection
///
/// Snapshots are stored verbatim as JSON; re-receiving the same playlist
/// id replaces the previous snapshot (id equality is the only dedup).
pub async fn receive_shared(
    pool: &SqlitePool,
    recipient: &UserId,
    playlist: &Playlist,
) -> Result<()> {
    let payload = serde_json::to_string(playlist)?;

    sqlx::query(
        "INSERT OR REPLACE INTO shared_playlists (id, recipient_id, payload, received_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&playlist.id)
    .bind(recipient)
    .bind(payload)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    tracing::debug!(playlist_id = %playlist.id, recipient = %recipient, "received shared playlist");
    Ok(())
}

/// All playlists shared with `recipient`, oldest first
pub async fn get_shared(pool: &SqlitePool, recipient: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        "SELECT payload FROM shared_playlists WHERE recipient_id = ? ORDER BY received_at",
    )
    .bind(recipient)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            serde_json::from_str::<Playlist>(row.get::<&str, _>("payload"))
                .map_err(ChordError::from)
        })
        .collect()
}

/// Remove a playlist from the shared collection; absent ids are a no-op
pub async fn delete_shared(
    pool: &SqlitePool,
    recipient: &UserId,
    playlist_id: &PlaylistId,
) -> Result<()> {
    sqlx::query("DELETE FROM shared_playlists WHERE id = ? AND recipient_id = ?")
        .bind(playlist_id)
        .bind(recipient)
        .execute(pool)
        .await?;

    Ok(())
}

async fn insert_track(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    playlist_id: &PlaylistId,
    track: &Track,
    position: i64,
) -> Result<()> {
    let (source_kind, source_ref) = match &track.source {
        TrackSource::Remote { url } => ("remote", url.as_str()),
        TrackSource::LocalBlob { object_id } => ("local_blob", object_id.as_str()),
    };

    sqlx::query(
        "INSERT INTO playlist_tracks
         (playlist_id, track_id, position, title, artist, duration_secs, cover_art,
          source_kind, source_ref)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(playlist_id)
    .bind(&track.id)
    .bind(position)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(track.duration_secs.map(i64::from))
    .bind(&track.cover_art)
    .bind(source_kind)
    .bind(source_ref)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn row_to_playlist(pool: &SqlitePool, row: &sqlx::sqlite::SqliteRow) -> Result<Playlist> {
    let id: PlaylistId = row.get("id");
    let tracks = load_tracks(pool, &id).await?;
    let created_at = DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
        .ok_or_else(|| ChordError::persistence("invalid created_at timestamp"))?;

    Ok(Playlist::with_id(
        id,
        row.get("owner_id"),
        row.get::<String, _>("name"),
        row.get::<i64, _>("is_public") != 0,
        tracks,
        created_at,
    ))
}

async fn load_tracks(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        "SELECT track_id, title, artist, duration_secs, cover_art, source_kind, source_ref
         FROM playlist_tracks WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let source = match row.get::<&str, _>("source_kind") {
                "remote" => TrackSource::Remote {
                    url: row.get("source_ref"),
                },
                _ => TrackSource::LocalBlob {
                    object_id: row.get("source_ref"),
                },
            };

            Ok(Track {
                id: TrackId::new(row.get::<String, _>("track_id")),
                title: row.get("title"),
                artist: row.get("artist"),
                duration_secs: row.get::<Option<i64>, _>("duration_secs").map(|d| d as u32),
                cover_art: row.get("cover_art"),
                source,
            })
        })
        .collect()
}
