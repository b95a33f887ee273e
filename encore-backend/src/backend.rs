use std::sync::Arc;

use async_trait::async_trait;
use encore_core::{BackendLabel, CacheKey, CacheValue, Raw};

use crate::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// Access contract of a cache store.
///
/// A store keeps raw bytes under a [`CacheKey`] until the value's expire
/// time. Three outcomes of [`read`](Backend::read) matter to callers:
///
/// - `Ok(Some(value))` - hit
/// - `Ok(None)` - miss, the distinguished "not there" signal
/// - `Err(_)` - the store itself failed (connectivity, protocol)
///
/// Stores must tolerate concurrent use from many requests; none of the
/// methods take `&mut self`.
#[async_trait]
pub trait Backend: Sync + Send {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>>;

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// The TTL is taken from [`CacheValue::expire`]; a value without one is
    /// kept until evicted.
    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()>;

    /// Returns the label of this backend for logs and metrics.
    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("backend")
    }
}

#[async_trait]
impl<B> Backend for &B
where
    B: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

#[async_trait]
impl<B> Backend for Box<B>
where
    B: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}

#[async_trait]
impl<B> Backend for Arc<B>
where
    B: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }
}
