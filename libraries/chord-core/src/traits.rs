/// Collaborator traits for Chord Player
use crate::error::Result;
use crate::types::PlayableSource;
use async_trait::async_trait;

/// Durable key/value store for device-local audio payloads
///
/// One record per id, last write wins. Implementations must surface write
/// failures (quota, I/O) to the caller; a failed `put` must never be
/// reported as success. Backing storage survives a session restart.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a payload under `id`, replacing any previous record
    async fn put(&self, id: &str, payload: &[u8]) -> Result<()>;

    /// Fetch the payload for `id`, or `None` when absent
    async fn get(&self, id: &str) -> Result<Option<Vec<u8>>>;
}

/// The single audio output binding
///
/// Exactly one component (the playback engine) drives this device; no other
/// component may bind sources to it. `play`/`pause` resolve once the device
/// acknowledges the transition, so a rejected start can be distinguished
/// from a slow one. Device events (`ended`, `timeUpdate`, `playbackFailed`)
/// flow back into the engine through its `on_*` entry points.
#[async_trait]
pub trait OutputDevice: Send {
    /// Bind a resolved source, replacing the currently bound one
    async fn bind(&mut self, source: &PlayableSource) -> Result<()>;

    /// Start or resume playback of the bound source
    async fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the bound source
    async fn pause(&mut self) -> Result<()>;

    /// Set output volume (0.0 - 1.0); applies in any state
    fn set_volume(&mut self, volume: f32);

    /// Set the mute flag; applies in any state
    fn set_muted(&mut self, muted: bool);
}
