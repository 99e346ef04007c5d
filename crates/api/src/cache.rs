//! Shared in-memory copy of the content collections.
//!
//! Reads are served from the cached [`ContentSnapshot`]. The first read
//! after startup or after a write loads all three collections; every
//! successful write calls [`SnapshotCache::invalidate`] after its
//! transaction commits.

use std::sync::Arc;

use regelwerk_core::content::ContentSnapshot;
use regelwerk_db::snapshot::load_snapshot;
use regelwerk_db::DbPool;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: RwLock<Option<Arc<ContentSnapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot, loading it if necessary.
    ///
    /// Concurrent callers on a cold cache wait for a single load. A failed
    /// load leaves the cache empty and returns the error.
    pub async fn get(&self, pool: &DbPool) -> Result<Arc<ContentSnapshot>, sqlx::Error> {
        if let Some(snapshot) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut slot = self.current.write().await;
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let loaded = Arc::new(load_snapshot(pool).await?);
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop the cached snapshot so the next read reloads.
    ///
    /// Waits for any load in progress, so a load that started before the
    /// write committed never survives this call.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }
}
