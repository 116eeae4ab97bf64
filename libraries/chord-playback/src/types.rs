//! Playback state and policy types

use serde::{Deserialize, Serialize};

/// Playback engine state machine
///
/// Transitions: `Idle → Loading → Playing ⇄ Paused`, and
/// `Loading → Error → Idle` on a failed load. `Error` is transient; the
/// engine always settles back to `Idle` before accepting new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No track loaded
    Idle,

    /// Resolving and binding a source
    Loading,

    /// Audio running
    Playing,

    /// Audio suspended, track still bound
    Paused,

    /// A load failed; settles to `Idle`
    Error,
}

/// Repeat mode governing navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Stop after the last queue track
    #[default]
    Off,

    /// Wrap to the first track after the last
    All,

    /// Replay the current track forever
    One,
}

/// Playback configuration
///
/// Volume and mute are device-level settings reapplied on every bind;
/// repeat and shuffle govern navigation only and never mutate the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Output volume, `0.0..=1.0`
    pub volume: f32,

    /// Whether output is muted (volume preserved underneath)
    pub muted: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Whether navigation picks pseudo-random targets
    pub shuffle: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert!((config.volume - 1.0).abs() < f32::EPSILON);
        assert!(!config.muted);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert!(!config.shuffle);
    }

    #[test]
    fn state_serde_naming() {
        let json = serde_json::to_string(&EngineState::Loading).unwrap();
        assert_eq!(json, "\"loading\"");
    }
}
