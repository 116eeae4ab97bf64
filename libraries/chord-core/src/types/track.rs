/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Where a track's audio bytes live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackSource {
    /// Remotely hosted audio; the URL itself is playable
    Remote {
        /// Stable HTTP(S) URL of the audio payload
        url: String,
    },

    /// Device-local audio stored in the object store
    LocalBlob {
        /// Key of the payload in the local object store
        object_id: String,
    },
}

/// A playable track
///
/// Immutable once placed in a queue or playlist; identity is by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration in seconds, unknown until the source has been loaded
    pub duration_secs: Option<u32>,

    /// Cover art reference (URL or asset key)
    pub cover_art: Option<String>,

    /// Audio source location
    pub source: TrackSource,
}

impl Track {
    /// Create a remotely hosted track
    pub fn remote(
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            duration_secs: None,
            cover_art: None,
            source: TrackSource::Remote { url: url.into() },
        }
    }

    /// Create a device-local track backed by the object store
    pub fn local(
        title: impl Into<String>,
        artist: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            duration_secs: None,
            cover_art: None,
            source: TrackSource::LocalBlob {
                object_id: object_id.into(),
            },
        }
    }

    /// Whether this track needs the local object store to play
    pub fn is_local(&self) -> bool {
        matches!(self.source, TrackSource::LocalBlob { .. })
    }
}
