//! Resource resolver
//!
//! Turns a track reference into a device-bindable source. Remote URLs
//! pass through unchanged; local tracks suspend on the object store and
//! come back as freshly minted ledger handles. Revocation of superseded
//! handles is the engine's job and happens only after the replacement
//! has been bound, never before.

use crate::handle::HandleLedger;
use chord_core::{ChordError, ObjectStore, PlayableSource, Result, Track, TrackSource};
use std::sync::Arc;

/// Resolves track references against the local object store
pub struct Resolver {
    store: Arc<dyn ObjectStore>,
    ledger: Arc<HandleLedger>,
}

impl Resolver {
    /// Create a resolver minting handles into `ledger`
    pub fn new(store: Arc<dyn ObjectStore>, ledger: Arc<HandleLedger>) -> Self {
        Self { store, ledger }
    }

    /// Resolve `track` into a playable source
    ///
    /// Fails with [`ChordError::SourceNotFound`] when a local track's
    /// payload is missing from the object store.
    pub async fn resolve(&self, track: &Track) -> Result<PlayableSource> {
        match &track.source {
            TrackSource::Remote { url } => Ok(PlayableSource::Remote(url.clone())),
            TrackSource::LocalBlob { object_id } => {
                let payload = self
                    .store
                    .get(object_id)
                    .await?
                    .ok_or_else(|| ChordError::SourceNotFound(track.id.clone()))?;

                Ok(PlayableSource::Local(self.ledger.mint(Arc::from(payload))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn put(&self, id: &str, payload: &[u8]) -> Result<()> {
            self.records.lock().insert(id.to_string(), payload.to_vec());
            Ok(())
        }

        async fn get(&self, id: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.records.lock().get(id).cloned())
        }
    }

    fn resolver_with_store() -> (Resolver, Arc<MemoryStore>, Arc<HandleLedger>) {
        let store = Arc::new(MemoryStore::default());
        let ledger = Arc::new(HandleLedger::new());
        (
            Resolver::new(store.clone(), ledger.clone()),
            store,
            ledger,
        )
    }

    #[tokio::test]
    async fn remote_tracks_pass_through() {
        let (resolver, _, ledger) = resolver_with_store();
        let track = Track::remote("Song", "Artist", "https://cdn.example/a.mp3");

        let source = resolver.resolve(&track).await.unwrap();
        assert!(matches!(
            source,
            PlayableSource::Remote(url) if url == "https://cdn.example/a.mp3"
        ));
        assert_eq!(ledger.minted_count(), 0);
    }

    #[tokio::test]
    async fn local_tracks_mint_a_live_handle() {
        let (resolver, store, ledger) = resolver_with_store();
        store.put("blob-1", b"audio").await.unwrap();
        let track = Track::local("Demo", "Me", "blob-1");

        let source = resolver.resolve(&track).await.unwrap();
        let PlayableSource::Local(handle) = source else {
            panic!("expected a local handle");
        };
        assert_eq!(handle.payload.as_ref(), b"audio");
        assert!(ledger.is_live(handle.id));
    }

    #[tokio::test]
    async fn missing_payload_is_source_not_found() {
        let (resolver, _, ledger) = resolver_with_store();
        let track = Track::local("Ghost", "Me", "missing");

        let err = resolver.resolve(&track).await.unwrap_err();
        assert!(matches!(err, ChordError::SourceNotFound(id) if id == track.id));
        assert_eq!(ledger.minted_count(), 0);
    }
}
