//! Local handle ledger
//!
//! Accounts for every temporary local handle minted by the resolver.
//! A handle is live from mint until its single revocation; the ledger is
//! the authority on liveness so a superseded load, a failed bind, and
//! session teardown can all release handles without double-revoking.

use chord_core::{HandleId, LocalHandle};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Default)]
struct LedgerInner {
    next_id: u64,
    live: HashSet<HandleId>,
    minted: u64,
    revoked: u64,
}

/// Mint/revoke accounting for temporary local handles
#[derive(Debug, Default)]
pub struct HandleLedger {
    inner: Mutex<LedgerInner>,
}

impl HandleLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a live handle over `payload`
    pub fn mint(&self, payload: Arc<[u8]>) -> LocalHandle {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = HandleId(inner.next_id);
        inner.live.insert(id);
        inner.minted += 1;

        tracing::debug!(handle = %id, bytes = payload.len(), "minted local handle");
        LocalHandle { id, payload }
    }

    /// Revoke a handle; returns whether it was live
    ///
    /// Revoking an already-revoked handle is a no-op, which keeps the
    /// exactly-once invariant even when supersede and teardown race.
    pub fn revoke(&self, id: HandleId) -> bool {
        let mut inner = self.inner.lock();
        if inner.live.remove(&id) {
            inner.revoked += 1;
            tracing::debug!(handle = %id, "revoked local handle");
            true
        } else {
            false
        }
    }

    /// Revoke every live handle except `keep`; returns how many dropped
    ///
    /// `keep` is the handle currently bound to the output device, which
    /// must never be revoked while audible.
    pub fn retire_except(&self, keep: Option<HandleId>) -> usize {
        let mut inner = self.inner.lock();
        let doomed: Vec<HandleId> = inner
            .live
            .iter()
            .copied()
            .filter(|id| Some(*id) != keep)
            .collect();

        for id in &doomed {
            inner.live.remove(id);
            inner.revoked += 1;
        }
        doomed.len()
    }

    /// Revoke every live handle (session teardown)
    pub fn revoke_all(&self) -> usize {
        self.retire_except(None)
    }

    /// Whether `id` is live
    pub fn is_live(&self, id: HandleId) -> bool {
        self.inner.lock().live.contains(&id)
    }

    /// Number of currently live handles
    pub fn live_count(&self) -> usize {
        self.inner.lock().live.len()
    }

    /// Total handles minted since construction
    pub fn minted_count(&self) -> u64 {
        self.inner.lock().minted
    }

    /// Total handles revoked since construction
    pub fn revoked_count(&self) -> u64 {
        self.inner.lock().revoked
    }
}
