//! Chord Player Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling
//! for the Chord playback engine.
//!
//! This crate defines:
//! - **Domain Types**: [`Track`], [`Playlist`], typed ids
//! - **Collaborator Seams**: [`ObjectStore`] (durable blob storage),
//!   [`OutputDevice`] (the single audio output binding)
//! - **Error Handling**: unified [`ChordError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use chord_core::types::{Track, TrackSource};
//! use chord_core::Identity;
//!
//! let track = Track::remote("Blue in Green", "Miles Davis",
//!     "https://cdn.example.com/blue-in-green.mp3");
//! assert!(matches!(track.source, TrackSource::Remote { .. }));
//!
//! let session = Identity::anonymous();
//! assert!(session.user_id().is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod identity;
pub mod traits;
pub mod types;

pub use error::{ChordError, Result};
pub use identity::Identity;
pub use traits::{ObjectStore, OutputDevice};
pub use types::{
    HandleId, LocalHandle, PlayableSource, Playlist, PlaylistId, Track, TrackId, TrackSource,
    UserId,
};
