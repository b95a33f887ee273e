//! Server configuration.
//!
//! ```yaml
//! listen: "0.0.0.0:8080"
//! catalog:
//!   api_root: "https://groupietrackers.herokuapp.com/api"
//!   ttl: 10m
//!   upstream_timeout: 7s
//!   sub_fetch: Sequential
//! cache:
//!   type: Redis
//!   addr: "127.0.0.1:6379"
//!   password: "secret"
//!   db: 0
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use encore::CatalogConfig;
use encore_backend::Backend;
use encore_moka::MokaBackend;
use encore_redis::{RedisBackend, RedisConfig};
use serde::Deserialize;
use tracing::info;

use crate::error::ServerError;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "encore.yaml";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ENCORE_CONFIG";

/// Which cache store backs the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum CacheConfig {
    /// A shared redis server.
    Redis(RedisConfig),
    /// An in-process cache, lost on restart.
    Moka {
        /// Maximum number of cached entries.
        max_capacity: u64,
    },
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::Redis(RedisConfig::default())
    }
}

impl CacheConfig {
    /// Builds the configured cache store.
    ///
    /// Redis connects lazily, so an unreachable server is not an error here.
    pub fn build(&self) -> Result<Arc<dyn Backend>, ServerError> {
        match self {
            CacheConfig::Redis(config) => {
                info!(addr = %config.addr, db = config.db, "using redis cache store");
                Ok(Arc::new(RedisBackend::builder().config(config).build()?))
            }
            CacheConfig::Moka { max_capacity } => {
                info!(max_capacity, "using in-process cache store");
                Ok(Arc::new(
                    MokaBackend::builder().max_entries(*max_capacity).build(),
                ))
            }
        }
    }
}

/// Everything the server binary reads at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub listen: String,
    /// Catalog settings.
    pub catalog: CatalogConfig,
    /// Cache store settings.
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: "0.0.0.0:8080".to_owned(),
            catalog: CatalogConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ServerError> {
        serde_saphyr::from_str(yaml).map_err(|error| ServerError::ConfigParse(Box::new(error)))
    }

    /// Reads and parses a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Loads the config named by `explicit`, else by [`CONFIG_ENV`], else
    /// [`DEFAULT_CONFIG_PATH`].
    ///
    /// Only a missing default file falls back to [`ServerConfig::default`];
    /// a missing file that was asked for is an error.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ServerError> {
        let requested = explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match requested {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    info!("no {DEFAULT_CONFIG_PATH} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use encore::SubFetchMode;

    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = ServerConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.cache, CacheConfig::Redis(RedisConfig::default()));
    }

    #[test]
    fn reads_redis_store() {
        let yaml = r#"
listen: "127.0.0.1:3000"
catalog:
  ttl: 1m
cache:
  type: Redis
  addr: "redis.internal:6380"
  username: "encore"
  password: "secret"
  db: 2
"#;
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.listen, "127.0.0.1:3000");
        assert_eq!(config.catalog.ttl, Duration::from_secs(60));
        assert_eq!(config.catalog.upstream_timeout, Duration::from_secs(7));
        match config.cache {
            CacheConfig::Redis(redis) => {
                assert_eq!(redis.addr, "redis.internal:6380");
                assert_eq!(redis.username.as_deref(), Some("encore"));
                assert_eq!(redis.password.as_deref(), Some("secret"));
                assert_eq!(redis.db, 2);
            }
            other => panic!("expected redis, got {other:?}"),
        }
    }

    #[test]
    fn reads_moka_store() {
        let yaml = r#"
catalog:
  sub_fetch: Parallel
cache:
  type: Moka
  max_capacity: 5000
"#;
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.catalog.sub_fetch, SubFetchMode::Parallel);
        assert_eq!(config.cache, CacheConfig::Moka { max_capacity: 5000 });
    }

    #[test]
    fn unknown_store_is_rejected() {
        let yaml = "cache:\n  type: Memcached\n";
        assert!(matches!(
            ServerConfig::from_yaml(yaml),
            Err(ServerError::ConfigParse(_))
        ));
    }

    #[test]
    fn missing_requested_file_is_an_error() {
        let result = ServerConfig::load(Some(PathBuf::from("/nonexistent/encore.yaml")));
        assert!(matches!(result, Err(ServerError::ConfigRead { .. })));
    }

    #[tokio::test]
    async fn builds_moka_store() {
        let backend = CacheConfig::Moka { max_capacity: 10 }.build().unwrap();
        assert_eq!(backend.label().as_str(), "moka");
    }
}
