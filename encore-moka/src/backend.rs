//! Moka backend implementation.

use async_trait::async_trait;
use encore_backend::{Backend, BackendLabel, BackendResult, CacheKey, CacheValue, Raw};
use moka::future::Cache;

use crate::builder::{MokaBackendBuilder, NoCapacity};

/// In-memory cache backend powered by Moka.
///
/// Entries expire individually at their [`CacheValue::expire`] time.
///
/// # Caveats
///
/// - Data is **not persisted** — cache is lost on process restart
/// - Data is **not shared** across processes — use redis for that
/// - Expiration is **best-effort** — expired entries may briefly remain
///   readable until Moka's maintenance runs
#[derive(Clone)]
pub struct MokaBackend {
    pub(crate) cache: Cache<CacheKey, CacheValue<Raw>>,
    pub(crate) label: BackendLabel,
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("label", &self.label)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl MokaBackend {
    /// Creates a new builder for `MokaBackend`.
    pub fn builder() -> MokaBackendBuilder<NoCapacity> {
        MokaBackendBuilder::new()
    }

    /// The underlying Moka cache, for maintenance and inspection.
    pub fn cache(&self) -> &Cache<CacheKey, CacheValue<Raw>> {
        &self.cache
    }
}

#[async_trait]
impl Backend for MokaBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        Ok(self.cache.get(key).await)
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.cache.insert(key.clone(), value).await;
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}
