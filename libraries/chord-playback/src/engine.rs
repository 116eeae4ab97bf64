//! Playback engine
//!
//! Owns the single output device binding and drives the
//! `Idle → Loading → Playing ⇄ Paused` state machine. All methods take
//! `&self`; queue and state live behind a short-lived sync lock that is
//! never held across a suspension point, while the device sits behind an
//! async lock so exactly one load binds at a time.
//!
//! Supersede rule: every load claims a monotonically increasing request
//! token. A resolver result whose token is no longer current is discarded
//! and any handle it minted is revoked, so the device always ends up
//! bound to the most recently requested track and no handle leaks.

use crate::events::PlayerEvent;
use crate::handle::HandleLedger;
use crate::navigator::{self, NavPlan};
use crate::queue::{PlayQueue, RemoveOutcome};
use crate::resolver::Resolver;
use crate::types::{EngineState, PlayerConfig, RepeatMode};
use chord_core::{
    ChordError, HandleId, ObjectStore, OutputDevice, PlayableSource, Result, Track, TrackId,
    TrackSource,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

struct Shared {
    state: EngineState,
    queue: PlayQueue,
    config: PlayerConfig,
    current_handle: Option<HandleId>,
    pending_events: Vec<PlayerEvent>,
}

impl Shared {
    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state(&mut self, state: EngineState) {
        self.state = state;
        self.pending_events.push(PlayerEvent::StateChanged { state });
    }
}

/// The playback state machine
///
/// Single owner of the output device and of the currently live local
/// handle; no other component binds the device or revokes what is bound.
pub struct PlaybackEngine {
    shared: Mutex<Shared>,
    device: AsyncMutex<Box<dyn OutputDevice>>,
    resolver: Resolver,
    ledger: Arc<HandleLedger>,
    store: Arc<dyn ObjectStore>,
    epoch: AtomicU64,
}

impl PlaybackEngine {
    /// Create an engine over `device`, resolving local tracks from `store`
    pub fn new(
        device: Box<dyn OutputDevice>,
        store: Arc<dyn ObjectStore>,
        config: PlayerConfig,
    ) -> Self {
        let ledger = Arc::new(HandleLedger::new());
        Self {
            shared: Mutex::new(Shared {
                state: EngineState::Idle,
                queue: PlayQueue::new(),
                config,
                current_handle: None,
                pending_events: Vec::new(),
            }),
            device: AsyncMutex::new(device),
            resolver: Resolver::new(store.clone(), ledger.clone()),
            ledger,
            store,
            epoch: AtomicU64::new(0),
        }
    }

    /// Current state machine state
    pub fn state(&self) -> EngineState {
        self.shared.lock().state
    }

    /// The current track, if any
    pub fn current_track(&self) -> Option<Track> {
        self.shared.lock().queue.current_track().cloned()
    }

    /// Current configuration snapshot
    pub fn config(&self) -> PlayerConfig {
        self.shared.lock().config.clone()
    }

    /// Handle ledger, exposed for lifecycle inspection
    pub fn ledger(&self) -> &HandleLedger {
        &self.ledger
    }

    /// Collect and clear pending events
    pub fn drain_events(&self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.shared.lock().pending_events)
    }

    // ---- queue -----------------------------------------------------------

    /// Ordered snapshot of the queue
    pub fn queue_snapshot(&self) -> Vec<Track> {
        self.shared.lock().queue.snapshot()
    }

    /// Append tracks to the end of the queue
    pub fn queue_append(&self, tracks: Vec<Track>) {
        let mut shared = self.shared.lock();
        shared.queue.append(tracks);
        let length = shared.queue.len();
        shared.emit(PlayerEvent::QueueChanged { length });
    }

    /// Remove the first track with `track_id` from the queue
    ///
    /// Removing the currently playing track loads the replacement at the
    /// same ordinal slot (modulo the new size); emptying the queue stops
    /// playback. Unknown ids are a no-op.
    pub async fn queue_remove(&self, track_id: &TrackId) -> Result<()> {
        let (outcome, was_active) = {
            let mut shared = self.shared.lock();
            let was_active = matches!(
                shared.state,
                EngineState::Playing | EngineState::Paused | EngineState::Loading
            );
            let outcome = shared.queue.remove_by_id(track_id);
            if outcome != RemoveOutcome::NotFound {
                let length = shared.queue.len();
                shared.emit(PlayerEvent::QueueChanged { length });
            }
            (outcome, was_active)
        };

        match outcome {
            RemoveOutcome::Replaced(index) if was_active => self.play_at(index).await,
            RemoveOutcome::Emptied => self.stop().await,
            _ => Ok(()),
        }
    }

    /// Stop playback and empty the queue
    pub async fn queue_clear(&self) -> Result<()> {
        self.stop().await?;
        let mut shared = self.shared.lock();
        shared.queue.clear();
        shared.emit(PlayerEvent::QueueChanged { length: 0 });
        Ok(())
    }

    // ---- transport -------------------------------------------------------

    /// Load and play the queue track at `index`
    ///
    /// Valid from any state. A newer call supersedes any load still in
    /// flight. On failure the engine surfaces the error and settles to
    /// `Idle` with the current track cleared.
    pub async fn play_at(&self, index: usize) -> Result<()> {
        let (track, epoch) = {
            let mut shared = self.shared.lock();
            if !shared.queue.set_current(index) {
                return Err(ChordError::validation(format!(
                    "queue index {index} out of range"
                )));
            }
            let track = shared
                .queue
                .current_track()
                .cloned()
                .ok_or_else(|| ChordError::validation("queue has no current track"))?;
            shared.emit_state(EngineState::Loading);
            shared.emit(PlayerEvent::TrackChanged {
                track: Some(track.clone()),
            });
            let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            (track, epoch)
        };

        tracing::debug!(track_id = %track.id, epoch, "loading track");
        self.drive_load(track, epoch).await
    }

    async fn drive_load(&self, track: Track, epoch: u64) -> Result<()> {
        let resolved = self.resolver.resolve(&track).await;

        if self.is_stale(epoch) {
            Self::discard(&self.ledger, resolved.as_ref().ok());
            return Ok(());
        }

        let source = match resolved {
            Ok(source) => source,
            Err(err) => return self.fail_load(epoch, err),
        };

        let mut device = self.device.lock().await;
        if self.is_stale(epoch) {
            Self::discard(&self.ledger, Some(&source));
            return Ok(());
        }

        // A fresh binding starts at the last explicitly set volume/mute,
        // not the device default.
        let (volume, muted) = {
            let shared = self.shared.lock();
            (shared.config.volume, shared.config.muted)
        };
        device.set_volume(volume);
        device.set_muted(muted);

        if let Err(err) = device.bind(&source).await {
            Self::discard(&self.ledger, Some(&source));
            drop(device);
            return self.fail_load(epoch, err);
        }
        if let Err(err) = device.play().await {
            Self::discard(&self.ledger, Some(&source));
            drop(device);
            return self.fail_load(epoch, err);
        }
        drop(device);

        {
            let mut shared = self.shared.lock();
            if self.is_stale(epoch) {
                // A newer load claimed the state machine while we were
                // committing. Leave the handle live; the winner revokes it
                // after its own bind.
                return Ok(());
            }
            shared.current_handle = source.handle_id();
            shared.emit_state(EngineState::Playing);
        }

        // Handles superseded by this load are released only now that the
        // replacement is bound, never revoke-before-bind.
        let released = self.ledger.retire_except(source.handle_id());
        if released > 0 {
            tracing::debug!(released, "released superseded handles");
        }
        Ok(())
    }

    fn discard(ledger: &HandleLedger, source: Option<&PlayableSource>) {
        if let Some(id) = source.and_then(PlayableSource::handle_id) {
            ledger.revoke(id);
        }
    }

    fn is_stale(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) != epoch
    }

    fn fail_load(&self, epoch: u64, err: ChordError) -> Result<()> {
        if self.is_stale(epoch) {
            // A newer load owns the state machine now; this failure has
            // no observable effect.
            return Ok(());
        }

        tracing::warn!(error = %err, "load failed");
        let mut shared = self.shared.lock();
        shared.emit(PlayerEvent::PlaybackError {
            message: err.to_string(),
        });
        shared.emit_state(EngineState::Error);
        shared.queue.clear_current();
        shared.current_handle = None;
        shared.emit_state(EngineState::Idle);
        shared.emit(PlayerEvent::TrackChanged { track: None });
        drop(shared);
        Err(err)
    }

    /// Toggle between playing and paused
    ///
    /// No-op unless a track is bound. A device rejection on resume is
    /// surfaced but leaves the engine paused; the reported state never
    /// flips without device confirmation.
    pub async fn toggle_play_pause(&self) -> Result<()> {
        match self.state() {
            EngineState::Playing => {
                let mut device = self.device.lock().await;
                if let Err(err) = device.pause().await {
                    drop(device);
                    return self.report_device_error(err);
                }
                drop(device);
                self.shared.lock().emit_state(EngineState::Paused);
                Ok(())
            }
            EngineState::Paused => {
                let mut device = self.device.lock().await;
                if let Err(err) = device.play().await {
                    drop(device);
                    return self.report_device_error(err);
                }
                drop(device);
                self.shared.lock().emit_state(EngineState::Playing);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn report_device_error(&self, err: ChordError) -> Result<()> {
        self.shared.lock().emit(PlayerEvent::PlaybackError {
            message: err.to_string(),
        });
        Err(err)
    }

    /// Stop playback and return to idle with the current track cleared
    ///
    /// The bound handle stays live until the next load supersedes it or
    /// the session closes; the device may still reference it.
    pub async fn stop(&self) -> Result<()> {
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let mut device = self.device.lock().await;
        if let Err(err) = device.pause().await {
            tracing::warn!(error = %err, "device pause on stop failed");
        }
        drop(device);

        let mut shared = self.shared.lock();
        shared.queue.clear_current();
        shared.current_handle = None;
        shared.emit_state(EngineState::Idle);
        shared.emit(PlayerEvent::TrackChanged { track: None });
        Ok(())
    }

    /// Advance to the next navigation target
    pub async fn next(&self) -> Result<()> {
        let plan = {
            let shared = self.shared.lock();
            navigator::next(
                shared.queue.len(),
                shared.queue.current_index(),
                shared.config.repeat,
                shared.config.shuffle,
                &mut rand::thread_rng(),
            )
        };
        self.execute(plan).await
    }

    /// Step back to the previous navigation target
    pub async fn previous(&self) -> Result<()> {
        let plan = {
            let shared = self.shared.lock();
            navigator::previous(
                shared.queue.len(),
                shared.queue.current_index(),
                shared.config.shuffle,
                &mut rand::thread_rng(),
            )
        };
        self.execute(plan).await
    }

    /// Handle the device's natural end-of-track event
    ///
    /// Emits `TrackFinished`, then re-enters the resolve→bind→play path
    /// for the next navigation target, or stops when there is none.
    pub async fn on_track_ended(&self) -> Result<()> {
        let plan = {
            let mut shared = self.shared.lock();
            let Some(finished) = shared.queue.current_track().map(|t| t.id.clone()) else {
                return Ok(());
            };
            shared.emit(PlayerEvent::TrackFinished { track_id: finished });
            navigator::next(
                shared.queue.len(),
                shared.queue.current_index(),
                shared.config.repeat,
                shared.config.shuffle,
                &mut rand::thread_rng(),
            )
        };
        self.execute(plan).await
    }

    async fn execute(&self, plan: NavPlan) -> Result<()> {
        match plan {
            NavPlan::Play(index) => self.play_at(index).await,
            NavPlan::Stop => self.stop().await,
            NavPlan::Nothing => Ok(()),
        }
    }

    // ---- device settings -------------------------------------------------

    /// Set output volume (clamped to `0.0..=1.0`)
    ///
    /// Applies immediately in every state and is reapplied on each bind.
    pub async fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        {
            let mut shared = self.shared.lock();
            shared.config.volume = volume;
            let muted = shared.config.muted;
            shared.emit(PlayerEvent::VolumeChanged { volume, muted });
        }
        self.device.lock().await.set_volume(volume);
    }

    /// Mute or unmute output
    pub async fn set_muted(&self, muted: bool) {
        {
            let mut shared = self.shared.lock();
            shared.config.muted = muted;
            let volume = shared.config.volume;
            shared.emit(PlayerEvent::VolumeChanged { volume, muted });
        }
        self.device.lock().await.set_muted(muted);
    }

    /// Set the repeat mode
    pub fn set_repeat(&self, repeat: RepeatMode) {
        self.shared.lock().config.repeat = repeat;
    }

    /// Enable or disable shuffle
    pub fn set_shuffle(&self, shuffle: bool) {
        self.shared.lock().config.shuffle = shuffle;
    }

    /// Forward a periodic position update from the device
    pub fn on_position_update(&self, position_secs: f64) {
        self.shared
            .lock()
            .emit(PlayerEvent::PositionUpdate { position_secs });
    }

    // ---- local imports ---------------------------------------------------

    /// Store a device-local audio payload and enqueue a track for it
    ///
    /// The payload is durably written before the track is enqueued; a
    /// failed write surfaces the error and nothing is enqueued.
    pub async fn import_local(
        &self,
        title: impl Into<String>,
        artist: impl Into<String>,
        payload: &[u8],
    ) -> Result<Track> {
        let mut track = Track::local(title, artist, String::new());
        let object_id = format!("blob-{}", track.id);
        track.source = TrackSource::LocalBlob {
            object_id: object_id.clone(),
        };

        self.store.put(&object_id, payload).await?;

        tracing::debug!(track_id = %track.id, object_id, "imported local track");
        self.queue_append(vec![track.clone()]);
        Ok(track)
    }

    // ---- teardown --------------------------------------------------------

    /// End the playback session
    ///
    /// Pauses the device, clears state, and revokes every handle still
    /// live, superseded or bound alike.
    pub async fn close(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let mut device = self.device.lock().await;
        if let Err(err) = device.pause().await {
            tracing::warn!(error = %err, "device pause on close failed");
        }
        drop(device);

        {
            let mut shared = self.shared.lock();
            shared.queue.clear_current();
            shared.current_handle = None;
            shared.emit_state(EngineState::Idle);
            shared.emit(PlayerEvent::TrackChanged { track: None });
        }

        let released = self.ledger.revoke_all();
        tracing::debug!(released, "playback session closed");
    }
}
