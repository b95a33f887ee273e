//! Cached value type with expiration metadata.
//!
//! A [`CacheValue`] pairs stored data with the instant it stops being valid.
//! Stores that support native expiry (redis `EX`, moka per-entry expiry)
//! derive their TTL from it with [`CacheValue::ttl`]; readers double check
//! with [`CacheValue::is_expired`] because expiry in every store is
//! best-effort.
//!
//! ```
//! use encore_core::CacheValue;
//! use std::time::Duration;
//!
//! let value = CacheValue::with_ttl("cached data", Duration::from_secs(600));
//! assert!(!value.is_expired());
//! assert!(value.ttl().unwrap() <= Duration::from_secs(600));
//! ```

use chrono::{DateTime, Utc};
use std::mem::size_of;
use std::time::Duration;

use crate::Raw;

/// A cached value with an optional expiration timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValue<T> {
    data: T,
    expire: Option<DateTime<Utc>>,
}

impl<T> CacheValue<T> {
    /// Creates a new cache value with the given data and expiration.
    ///
    /// `None` means the value never expires.
    pub fn new(data: T, expire: Option<DateTime<Utc>>) -> Self {
        CacheValue { data, expire }
    }

    /// Creates a cache value that expires `ttl` from now.
    pub fn with_ttl(data: T, ttl: Duration) -> Self {
        let expire = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        CacheValue { data, expire }
    }

    /// Returns a reference to the cached data.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns when the data expires.
    #[inline]
    pub fn expire(&self) -> Option<DateTime<Utc>> {
        self.expire
    }

    /// Consumes the cache value and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Remaining time-to-live, rounded down to whole seconds.
    ///
    /// Returns `None` if there is no expire time or it is less than a second
    /// away.
    pub fn ttl(&self) -> Option<Duration> {
        self.expire.and_then(|expire| {
            let duration = expire.signed_duration_since(Utc::now());
            if duration.num_seconds() > 0 {
                Some(Duration::from_secs(duration.num_seconds() as u64))
            } else {
                None
            }
        })
    }

    /// Whether the expire time has passed.
    pub fn is_expired(&self) -> bool {
        self.expire.is_some_and(|expire| expire <= Utc::now())
    }
}

impl CacheValue<Raw> {
    /// Returns the estimated memory usage of this cache value in bytes.
    ///
    /// This includes the fixed struct overhead and the stored bytes.
    pub fn memory_size(&self) -> usize {
        size_of::<Self>() + self.data.len()
    }
}
