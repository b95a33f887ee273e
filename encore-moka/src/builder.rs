//! Builder for configuring [`MokaBackend`].

use std::time::{Duration, Instant};

use chrono::Utc;
use encore_backend::{BackendLabel, CacheKey, CacheValue, Raw};
use moka::Expiry;
use moka::future::{Cache, CacheBuilder};
use moka::policy::EvictionPolicy;

use crate::backend::MokaBackend;

/// Per-entry expiration policy that calculates TTL from [`CacheValue::expire`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Expiration;

impl Expiry<CacheKey, CacheValue<Raw>> for Expiration {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CacheValue<Raw>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Self::calculate_ttl(value)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CacheValue<Raw>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // Moka's default keeps the OLD expiration on update; a refreshed entry
        // must live for its own TTL.
        Self::calculate_ttl(value)
    }
}

impl Expiration {
    fn calculate_ttl(value: &CacheValue<Raw>) -> Option<Duration> {
        value.expire().map(|expiration| {
            let millis = (expiration - Utc::now()).num_milliseconds();
            if millis <= 0 {
                Duration::ZERO
            } else {
                Duration::from_millis(millis as u64)
            }
        })
    }
}

/// Marker type: capacity has not been configured yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapacity;

/// Marker type: entry-count capacity has been configured.
#[derive(Debug, Clone, Copy)]
pub struct EntryCapacity(pub(crate) u64);

/// Marker type: byte-based capacity has been configured.
#[derive(Debug, Clone, Copy)]
pub struct ByteCapacity(pub(crate) u64);

/// Builder for creating and configuring a [`MokaBackend`].
///
/// Capacity must be set with exactly one of
/// [`max_entries`](Self::max_entries) or [`max_bytes`](Self::max_bytes);
/// `build()` only exists once it is.
///
/// ```
/// use encore_moka::MokaBackend;
///
/// let backend = MokaBackend::builder()
///     .label("catalog")
///     .max_entries(10_000)
///     .build();
/// ```
pub struct MokaBackendBuilder<Cap> {
    capacity: Cap,
    label: BackendLabel,
    eviction_policy: Option<EvictionPolicy>,
}

impl MokaBackendBuilder<NoCapacity> {
    /// Creates a new builder with no capacity configured.
    pub fn new() -> Self {
        Self {
            capacity: NoCapacity,
            label: BackendLabel::new_static("moka"),
            eviction_policy: None,
        }
    }

    /// Limit the cache to `capacity` entries.
    pub fn max_entries(self, capacity: u64) -> MokaBackendBuilder<EntryCapacity> {
        MokaBackendBuilder {
            capacity: EntryCapacity(capacity),
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }

    /// Limit the cache to roughly `bytes` of keys and values.
    pub fn max_bytes(self, bytes: u64) -> MokaBackendBuilder<ByteCapacity> {
        MokaBackendBuilder {
            capacity: ByteCapacity(bytes),
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }
}

impl Default for MokaBackendBuilder<NoCapacity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cap> MokaBackendBuilder<Cap> {
    /// Sets a custom label for this backend. Defaults to `"moka"`.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Overrides the eviction policy.
    ///
    /// Defaults to TinyLFU for entry capacity and LRU for byte capacity.
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }
}

impl MokaBackendBuilder<EntryCapacity> {
    /// Builds the [`MokaBackend`] with entry-count based capacity.
    pub fn build(self) -> MokaBackend {
        let policy = self
            .eviction_policy
            .unwrap_or_else(EvictionPolicy::tiny_lfu);
        let cache: Cache<CacheKey, CacheValue<Raw>> = CacheBuilder::new(self.capacity.0)
            .eviction_policy(policy)
            .expire_after(Expiration)
            .build();

        MokaBackend {
            cache,
            label: self.label,
        }
    }
}

impl MokaBackendBuilder<ByteCapacity> {
    /// Builds the [`MokaBackend`] with byte-based capacity.
    ///
    /// TinyLFU admission can reject new entries even when eviction would make
    /// room, so the default policy here is LRU.
    pub fn build(self) -> MokaBackend {
        let policy = self.eviction_policy.unwrap_or_else(EvictionPolicy::lru);
        let cache: Cache<CacheKey, CacheValue<Raw>> = CacheBuilder::new(self.capacity.0)
            .weigher(Self::byte_weigher)
            .eviction_policy(policy)
            .expire_after(Expiration)
            .build();

        MokaBackend {
            cache,
            label: self.label,
        }
    }

    fn byte_weigher(key: &CacheKey, value: &CacheValue<Raw>) -> u32 {
        (key.memory_size() + value.memory_size()).min(u32::MAX as usize) as u32
    }
}
