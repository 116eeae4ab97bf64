/// Playlist domain type
use crate::types::{PlaylistId, Track, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A durable, named collection of tracks
///
/// Independent of the now-playing queue. Owned playlists live in the owned
/// collection; playlists received from other users live in the shared
/// collection as immutable snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owning account
    pub owner_id: UserId,

    /// Display name (mutable)
    pub name: String,

    /// Whether the playlist is discoverable through public search
    pub is_public: bool,

    /// Ordered track snapshot; a track id appears at most once
    pub tracks: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new private playlist from a track snapshot
    pub fn new(owner_id: UserId, name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            id: PlaylistId::generate(),
            owner_id,
            name: name.into(),
            is_public: false,
            tracks,
            created_at: Utc::now(),
        }
    }

    /// Reconstruct a playlist loaded from storage
    pub fn with_id(
        id: PlaylistId,
        owner_id: UserId,
        name: impl Into<String>,
        is_public: bool,
        tracks: Vec<Track>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            is_public,
            tracks,
            created_at,
        }
    }

    /// Whether a track id is already present
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == track_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_creation_defaults_private() {
        let owner = UserId::new("user-1");
        let playlist = Playlist::new(owner.clone(), "My Favorites", Vec::new());

        assert_eq!(playlist.owner_id, owner);
        assert_eq!(playlist.name, "My Favorites");
        assert!(!playlist.is_public);
        assert!(playlist.created_at <= Utc::now());
    }

    #[test]
    fn contains_matches_by_id() {
        let track = Track::remote("Song", "Artist", "https://cdn.example.com/a.mp3");
        let id = track.id.clone();
        let playlist = Playlist::new(UserId::new("u"), "P", vec![track]);

        assert!(playlist.contains(&id));
        assert!(!playlist.contains(&TrackId::new("other")));
    }

    #[test]
    fn playlist_snapshot_round_trips_through_json() {
        let track = Track::local("Demo", "Me", "blob-1");
        let playlist = Playlist::new(UserId::new("u"), "Shared", vec![track]);

        let json = serde_json::to_string(&playlist).unwrap();
        let back: Playlist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, playlist);
    }
}
