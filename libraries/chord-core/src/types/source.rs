/// Playable source values produced by the resource resolver
use std::fmt;
use std::sync::Arc;

/// Identifier of a minted local handle
///
/// Monotonically increasing per resolver; used by the handle ledger to
/// track the revoke-exactly-once lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle-{}", self.0)
    }
}

/// A temporary, revocable binding of in-memory audio bytes
///
/// Valid until revoked by the resolver's ledger. The payload is shared
/// so the handle stays cheap to clone while the bytes live exactly once.
#[derive(Debug, Clone)]
pub struct LocalHandle {
    /// Ledger id of this handle
    pub id: HandleId,

    /// Raw audio payload fetched from the object store
    pub payload: Arc<[u8]>,
}

/// A resolved, device-bindable reference to a track's audio bytes
///
/// Remote URLs have no special lifecycle; local handles must be revoked
/// exactly once, and never while bound as the device's active source.
#[derive(Debug, Clone)]
pub enum PlayableSource {
    /// Stable remote URL; the URL is the handle
    Remote(String),

    /// Freshly minted local handle over object-store bytes
    Local(LocalHandle),
}

impl PlayableSource {
    /// Ledger id when this is a local handle
    pub fn handle_id(&self) -> Option<HandleId> {
        match self {
            PlayableSource::Remote(_) => None,
            PlayableSource::Local(handle) => Some(handle.id),
        }
    }
}
