//! Playback events
//!
//! Event-based communication for UI synchronization. Events accumulate in
//! the engine and are collected with [`crate::PlaybackEngine::drain_events`];
//! they are notifications only and never carry authority over engine state.

use crate::types::EngineState;
use chord_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// State machine transition
    StateChanged {
        /// The new engine state
        state: EngineState,
    },

    /// Current track changed; `None` when playback stopped
    TrackChanged {
        /// The new current track, if any
        track: Option<Track>,
    },

    /// A track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Queue contents changed (tracks added/removed/cleared)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0 to 1.0)
        volume: f32,
        /// Whether audio is muted
        muted: bool,
    },

    /// Position update forwarded from the output device
    PositionUpdate {
        /// Current playback position in seconds
        position_secs: f64,
    },

    /// A load or device operation failed
    PlaybackError {
        /// Error message
        message: String,
    },
}
