//! Catalog configuration.
//!
//! Deserializes from any serde format; durations use humantime strings
//! (`"10m"`, `"7s"`, `"500ms"`).
//!
//! ```
//! use encore::{CatalogConfig, SubFetchMode};
//! use std::time::Duration;
//!
//! let config = CatalogConfig::default()
//!     .ttl(Duration::from_secs(60))
//!     .sub_fetch(SubFetchMode::Parallel);
//! assert_eq!(config.upstream_timeout, Duration::from_secs(7));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root of the public catalog API.
pub const DEFAULT_API_ROOT: &str = "https://groupietrackers.herokuapp.com/api";

/// How long resolved values stay in the cache store.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Upper bound for a single origin fetch.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(7);

/// How the three tour parts of a full record are fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Default)]
pub enum SubFetchMode {
    /// One after another; a failure stops the remaining fetches.
    #[default]
    Sequential,
    /// All three at once; the first failure in fixed order wins.
    Parallel,
}

/// Settings shared by every catalog operation.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL of the catalog index.
    pub api_root: String,
    /// Time-to-live of cached values (e.g. "10m").
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// Timeout of every origin fetch (e.g. "7s").
    #[serde(with = "humantime_serde")]
    pub upstream_timeout: Duration,
    /// How the tour parts of a full record are fetched.
    pub sub_fetch: SubFetchMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_owned(),
            ttl: DEFAULT_TTL,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            sub_fetch: SubFetchMode::default(),
        }
    }
}

impl CatalogConfig {
    /// Sets the catalog index URL.
    pub fn api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Sets the cache time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the origin fetch timeout.
    pub fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Sets the tour part fetch mode.
    pub fn sub_fetch(mut self, mode: SubFetchMode) -> Self {
        self.sub_fetch = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api() {
        let config = CatalogConfig::default();
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.upstream_timeout, Duration::from_secs(7));
        assert_eq!(config.sub_fetch, SubFetchMode::Sequential);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = r#"
api_root: "https://x"
ttl: 30s
sub_fetch: Parallel
"#;
        let config: CatalogConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.api_root, "https://x");
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);
        assert_eq!(config.sub_fetch, SubFetchMode::Parallel);
    }

    #[test]
    fn json_uses_humantime() {
        let config = CatalogConfig::default().upstream_timeout(Duration::from_millis(1500));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["ttl"], "10m");
        assert_eq!(json["upstream_timeout"], "1s 500ms");
    }
}
