//! Chord Player - Playback Core
//!
//! Client-side playback state engine: one output device, one now-playing
//! queue, deterministic state machine.
//!
//! This crate provides:
//! - Playback state machine (`Idle → Loading → Playing ⇄ Paused`)
//! - Source resolution (remote URLs pass through, local blobs become
//!   temporary revocable handles)
//! - Handle ledger with a revoke-exactly-once lifecycle
//! - Queue navigation (linear / shuffle / repeat-one / repeat-all)
//! - Supersede semantics for overlapping loads via request tokens
//!
//! # Architecture
//!
//! `chord-playback` is platform-agnostic: audio output and payload
//! storage arrive through the [`chord_core::OutputDevice`] and
//! [`chord_core::ObjectStore`] traits. The engine is the single owner of
//! the device binding; nothing else binds the device or revokes the
//! handle it is playing from.
//!
//! # Example
//!
//! ```rust,no_run
//! use chord_playback::{PlaybackEngine, PlayerConfig};
//! use chord_core::{ObjectStore, OutputDevice, Track};
//! use std::sync::Arc;
//!
//! # async fn example(device: Box<dyn OutputDevice>, store: Arc<dyn ObjectStore>) -> chord_core::Result<()> {
//! let engine = PlaybackEngine::new(device, store, PlayerConfig::default());
//!
//! engine.queue_append(vec![
//!     Track::remote("My Song", "Artist", "https://cdn.example/song.mp3"),
//! ]);
//! engine.play_at(0).await?;
//!
//! // Device events feed back into the state machine
//! engine.on_track_ended().await?;
//!
//! for event in engine.drain_events() {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod engine;
mod events;
mod handle;
pub mod navigator;
mod queue;
mod resolver;
pub mod types;

pub use engine::PlaybackEngine;
pub use events::PlayerEvent;
pub use handle::HandleLedger;
pub use navigator::NavPlan;
pub use queue::{PlayQueue, RemoveOutcome};
pub use resolver::Resolver;
pub use types::{EngineState, PlayerConfig, RepeatMode};
