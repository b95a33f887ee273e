//! Cache-aside resolution of a single resource.
//!
//! ```text
//! lookup ── hit ──────────────────────────────────────────────► value
//!    │
//!    └─ miss / expired / corrupt / store error
//!          │
//!          ▼
//!     fetch_origin ── transport error, timeout ─► Transport
//!          │       ── 126-byte body ──────────► EntityAbsent
//!          │       ── undecodable ────────────► Decode
//!          ▼
//!        store (failures logged) ─────────────────────────────► value
//! ```
//!
//! Cache store failures are never surfaced: they degrade to an origin fetch.
//! Origin failures are always surfaced and never cached.

use std::time::Duration;

use encore_backend::{Backend, CacheKey, CacheValue, Raw};
use encore_core::{ResourceKind, Upstream, UpstreamError};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::absent::is_absent_marker;
use crate::config::CatalogConfig;
use crate::decode::{DecodeError, Resource};
use crate::error::CatalogError;
use crate::metrics::{self, BackendOperation, UpstreamOutcome};

/// Resolves resources through a cache store in front of the origin.
///
/// Holds no mutable state; share it behind an `Arc` or borrow it.
#[derive(Debug, Clone)]
pub struct Resolver<B, U> {
    backend: B,
    upstream: U,
    ttl: Duration,
    upstream_timeout: Duration,
}

impl<B, U> Resolver<B, U>
where
    B: Backend,
    U: Upstream,
{
    /// Creates a resolver over `backend` and `upstream`.
    pub fn new(backend: B, upstream: U, config: &CatalogConfig) -> Self {
        Resolver {
            backend,
            upstream,
            ttl: config.ttl,
            upstream_timeout: config.upstream_timeout,
        }
    }

    /// The cache store.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The origin.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Time-to-live given to every stored value.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolves the resource stored at `key`.
    pub async fn resolve<T: Resource>(&self, key: &CacheKey) -> Result<T, CatalogError> {
        self.resolve_with(key, T::KIND, T::decode).await
    }

    /// Resolves `key` with an explicit decoder.
    ///
    /// Tries the cache first. On a miss, an expired entry, an undecodable
    /// entry or a store failure, fetches the origin, and on success writes
    /// the value back with the configured TTL.
    #[tracing::instrument(skip(self, key, decode), fields(key = %key), level = "debug")]
    pub async fn resolve_with<T, F>(
        &self,
        key: &CacheKey,
        kind: ResourceKind,
        decode: F,
    ) -> Result<T, CatalogError>
    where
        T: Serialize + Send + Sync,
        F: Fn(&[u8]) -> Result<T, DecodeError> + Send + Sync,
    {
        if let Some(value) = self.lookup(key, kind, &decode).await {
            return Ok(value);
        }
        let value = self.fetch_origin(key.as_str(), kind, &decode).await?;
        self.store(key, kind, &value).await;
        Ok(value)
    }

    /// Reads `key` from the cache store.
    ///
    /// Returns `None` for anything that is not a live, decodable entry. Store
    /// failures and corrupt entries are logged.
    pub async fn lookup<T, F>(&self, key: &CacheKey, kind: ResourceKind, decode: F) -> Option<T>
    where
        F: Fn(&[u8]) -> Result<T, DecodeError>,
    {
        let label = self.backend.label();
        match self.backend.read(key).await {
            Ok(Some(value)) if value.is_expired() => {
                trace!(%key, %kind, "cached value expired");
                metrics::record_cache_miss(kind, label.as_str());
                None
            }
            Ok(Some(value)) => match decode(value.data()) {
                Ok(decoded) => {
                    trace!(%key, %kind, "cache hit");
                    metrics::record_cache_hit(kind, label.as_str());
                    Some(decoded)
                }
                Err(error) => {
                    warn!(%key, %kind, %error, "cached value is undecodable, treating as miss");
                    metrics::record_cache_miss(kind, label.as_str());
                    None
                }
            },
            Ok(None) => {
                trace!(%key, %kind, "cache miss");
                metrics::record_cache_miss(kind, label.as_str());
                None
            }
            Err(error) => {
                warn!(%key, %kind, %error, backend = %label, "cache read failed");
                metrics::record_backend_error(kind, label.as_str(), BackendOperation::Read);
                metrics::record_cache_miss(kind, label.as_str());
                None
            }
        }
    }

    /// Fetches and decodes `url` from the origin, bypassing the cache.
    ///
    /// A body of exactly [`ABSENT_BODY_LEN`](crate::absent::ABSENT_BODY_LEN)
    /// bytes is reported as [`CatalogError::EntityAbsent`] without decoding.
    pub async fn fetch_origin<T, F>(
        &self,
        url: &str,
        kind: ResourceKind,
        decode: F,
    ) -> Result<T, CatalogError>
    where
        F: Fn(&[u8]) -> Result<T, DecodeError>,
    {
        let started = Instant::now();
        let fetched = tokio::time::timeout(self.upstream_timeout, self.upstream.fetch(url)).await;
        let body = match fetched {
            Ok(Ok(body)) => body,
            Ok(Err(error)) => {
                debug!(url, %kind, %error, "origin fetch failed");
                metrics::record_upstream(kind, UpstreamOutcome::TransportError, started.elapsed());
                return Err(error.into());
            }
            Err(_) => {
                debug!(url, %kind, timeout = ?self.upstream_timeout, "origin fetch timed out");
                metrics::record_upstream(kind, UpstreamOutcome::TransportError, started.elapsed());
                return Err(UpstreamError::Timeout {
                    url: url.to_owned(),
                    timeout: self.upstream_timeout,
                }
                .into());
            }
        };

        if is_absent_marker(&body) {
            debug!(url, %kind, "origin reports entity absent");
            metrics::record_upstream(kind, UpstreamOutcome::Absent, started.elapsed());
            return Err(CatalogError::EntityAbsent {
                url: url.to_owned(),
                kind,
            });
        }

        match decode(&body) {
            Ok(value) => {
                metrics::record_upstream(kind, UpstreamOutcome::Ok, started.elapsed());
                Ok(value)
            }
            Err(error) => {
                warn!(url, %kind, %error, "origin body is undecodable");
                metrics::record_upstream(kind, UpstreamOutcome::DecodeError, started.elapsed());
                Err(error.into())
            }
        }
    }

    /// Writes `value` under `key` with the configured TTL.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn store<T>(&self, key: &CacheKey, kind: ResourceKind, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let raw = match serde_json::to_vec(value) {
            Ok(raw) => Raw::from(raw),
            Err(error) => {
                warn!(%key, %kind, %error, "failed to serialize value for the cache");
                return;
            }
        };
        if let Err(error) = self.backend.write(key, CacheValue::with_ttl(raw, self.ttl)).await {
            let label = self.backend.label();
            warn!(%key, %kind, %error, backend = %label, "cache write failed");
            metrics::record_backend_error(kind, label.as_str(), BackendOperation::Write);
        } else {
            trace!(%key, %kind, ttl = ?self.ttl, "value cached");
        }
    }
}
