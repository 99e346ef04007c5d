use std::sync::Arc;

use regelwerk_core::content::ContentSnapshot;

use crate::cache::SnapshotCache;
use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: regelwerk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Content snapshot shared by all read endpoints.
    pub cache: Arc<SnapshotCache>,
}

impl AppState {
    pub fn new(pool: regelwerk_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            cache: Arc::new(SnapshotCache::new()),
        }
    }

    /// Current content snapshot.
    pub async fn snapshot(&self) -> AppResult<Arc<ContentSnapshot>> {
        Ok(self.cache.get(&self.pool).await?)
    }

    /// Forget the cached snapshot after a committed write.
    pub async fn content_changed(&self) {
        self.cache.invalidate().await;
    }
}
