//! Now-playing queue
//!
//! Ordered in-memory track list with a current-position pointer, distinct
//! from any durable playlist. The queue never computes navigation targets;
//! that is [`crate::navigator`]'s job.

use chord_core::{Track, TrackId};

/// Effect of removing a track on the current-position pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No track with that id was present
    NotFound,

    /// A non-current track was removed; playback is unaffected
    Untouched,

    /// The current track was removed; the track now at this index is the
    /// replacement (same ordinal slot, modulo the new size)
    Replaced(usize),

    /// The current track was removed and the queue is now empty
    Emptied,
}

/// The now-playing queue
///
/// Tracks are immutable once enqueued; identity is by id. The same id may
/// appear more than once (queues do not dedup, playlists do).
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlayQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current-position pointer, `None` when nothing is current
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Ordered snapshot of all tracks
    pub fn snapshot(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    /// Append tracks to the end of the queue
    pub fn append(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    /// Point the queue at `index`
    ///
    /// Out-of-range indices are rejected so the pointer can never dangle.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Clear the current-position pointer (queue contents untouched)
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Remove the first track with `track_id`
    ///
    /// Removing a track before the current one shifts the pointer left so
    /// it keeps naming the same track. Removing the current track selects
    /// the track at the same ordinal slot modulo the new size as the
    /// replacement, or empties the pointer when nothing remains.
    pub fn remove_by_id(&mut self, track_id: &TrackId) -> RemoveOutcome {
        let Some(index) = self.tracks.iter().position(|t| &t.id == track_id) else {
            return RemoveOutcome::NotFound;
        };

        self.tracks.remove(index);

        match self.current {
            Some(current) if index < current => {
                self.current = Some(current - 1);
                RemoveOutcome::Untouched
            }
            Some(current) if index == current => {
                if self.tracks.is_empty() {
                    self.current = None;
                    RemoveOutcome::Emptied
                } else {
                    let replacement = index % self.tracks.len();
                    self.current = Some(replacement);
                    RemoveOutcome::Replaced(replacement)
                }
            }
            _ => RemoveOutcome::Untouched,
        }
    }

    /// Remove all tracks and clear the pointer
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }
}
