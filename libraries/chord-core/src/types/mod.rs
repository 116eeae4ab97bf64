//! Domain types for Chord Player

mod ids;
mod playlist;
mod source;
mod track;

pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::Playlist;
pub use source::{HandleId, LocalHandle, PlayableSource};
pub use track::{Track, TrackSource};
