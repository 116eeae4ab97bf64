/// Core error types for Chord Player
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using [`ChordError`]
pub type Result<T> = std::result::Result<T, ChordError>;

/// Core error type for Chord Player
///
/// One variant per failure class the engine can surface to callers.
/// Playback failures are additionally recovered into the `Error -> Idle`
/// transition by the engine; they are never swallowed.
#[derive(Error, Debug)]
pub enum ChordError {
    /// A locally stored track has no payload in the object store
    #[error("Source not found for track: {0}")]
    SourceNotFound(TrackId),

    /// The output device refused to bind, start, or resume playback
    #[error("Device rejected: {0}")]
    DeviceRejected(String),

    /// Caller-supplied input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The track is already present in the playlist
    #[error("Track {track} already in playlist {playlist}")]
    AlreadyExists {
        /// Playlist the duplicate was added to
        playlist: PlaylistId,
        /// Track id that was already present
        track: TrackId,
    },

    /// No owned playlist with this id
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// A mutating operation was attempted without an authenticated identity
    #[error("Not authenticated")]
    Unauthenticated,

    /// A durable write failed; in-memory state was left untouched
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ChordError {
    /// Create a device rejection error
    pub fn device_rejected(msg: impl Into<String>) -> Self {
        Self::DeviceRejected(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ChordError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}
