//! Cache key type.
//!
//! Every cached value, whatever its resource kind, is stored under the URL it
//! was fetched from:
//!
//! - the catalog index under the API root,
//! - the artist list under `{index.artists}`,
//! - per-artist resources under `{index.<list>}/{id}`,
//! - the merged full record under the artist URL `{index.artists}/{id}`.
//!
//! Namespaces are separated only by URL shape, so keys are never rewritten or
//! prefixed: the string a [`CacheKey`] displays is exactly the string handed
//! to the cache store.
//!
//! ```
//! use encore_core::CacheKey;
//!
//! let key = CacheKey::from_url("https://x/artists/5");
//! assert_eq!(key.as_str(), "https://x/artists/5");
//! assert_eq!(format!("{}", key), "https://x/artists/5");
//! ```
//!
//! ## Performance
//!
//! [`CacheKey`] uses `Arc` internally for cheap cloning - copying a key
//! only increments a reference count.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::size_of;
use std::sync::Arc;

/// A cache key identifying a cached entry by its origin URL.
#[derive(Clone, Debug)]
pub struct CacheKey {
    url: Arc<str>,
}

impl CacheKey {
    /// Creates a key for the resource served at `url`.
    pub fn from_url(url: impl AsRef<str>) -> Self {
        CacheKey {
            url: Arc::from(url.as_ref()),
        }
    }

    /// Returns the URL this key stands for.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Returns the estimated memory usage of this key in bytes.
    ///
    /// Counts the `Arc` pointer plus the shared string content. Used by
    /// size-bounded in-memory stores as a weight.
    pub fn memory_size(&self) -> usize {
        size_of::<Self>() + self.url.len()
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.url, &other.url) || self.url == other.url
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl From<&str> for CacheKey {
    fn from(url: &str) -> Self {
        CacheKey::from_url(url)
    }
}

impl From<String> for CacheKey {
    fn from(url: String) -> Self {
        CacheKey {
            url: Arc::from(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn clones_compare_equal() {
        let key = CacheKey::from_url("https://x/artists");
        let cloned = key.clone();
        assert_eq!(key, cloned);
        assert_eq!(key, CacheKey::from("https://x/artists".to_owned()));
    }

    #[test]
    fn distinct_urls_are_distinct_keys() {
        let keys: HashSet<CacheKey> = [
            "https://x/artists",
            "https://x/artists/5",
            "https://x/locations/5",
        ]
        .into_iter()
        .map(CacheKey::from)
        .collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn display_is_the_stored_url() {
        let key = CacheKey::from_url("https://x/dates/1");
        assert_eq!(key.to_string(), "https://x/dates/1");
        assert_eq!(key.as_ref(), key.as_str());
    }
}
