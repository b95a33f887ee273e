//! Redis backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use encore_backend::{
    Backend, BackendError, BackendLabel, BackendResult, CacheKey, CacheValue, Raw,
};
use redis::{
    Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tokio::sync::OnceCell;
use tracing::trace;

use crate::config::RedisConfig;
use crate::error::Error;

/// Redis cache backend based on redis-rs crate.
///
/// Values are stored as plain strings under the URL they were fetched from,
/// with a native redis expiry derived from [`CacheValue::expire`]. Several
/// processes pointed at the same redis share one cache.
///
/// The connection is established lazily on first use through a
/// [`ConnectionManager`], which reconnects on its own after failures.
/// Connecting is attempted once per operation, bounded by the connection
/// timeout, so an unreachable redis fails fast and the caller falls through
/// to the origin.
///
/// [`ConnectionManager`]: redis::aio::ConnectionManager
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    manager_config: ConnectionManagerConfig,
    label: BackendLabel,
}

impl RedisBackend {
    /// Creates new RedisBackend builder with default settings.
    #[must_use]
    pub fn builder() -> RedisBackendBuilder {
        RedisBackendBuilder::default()
    }

    /// Create lazy connection to redis via [`ConnectionManager`]
    pub async fn connection(&self) -> Result<&ConnectionManager, BackendError> {
        trace!("Get connection manager");
        let manager = self
            .connection
            .get_or_try_init(|| {
                trace!("Initialize new redis connection manager");
                self.client
                    .get_connection_manager_with_config(self.manager_config.clone())
            })
            .await
            .map_err(Error::from)?;
        Ok(manager)
    }
}

/// Default bound on establishing a connection.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_millis(250);

/// Default bound on a single command round trip.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

/// Part of builder pattern implementation for RedisBackend.
pub struct RedisBackendBuilder {
    connection_info: String,
    connection_timeout: Duration,
    response_timeout: Duration,
    label: BackendLabel,
}

impl Default for RedisBackendBuilder {
    fn default() -> Self {
        Self {
            connection_info: RedisConfig::default().connection_url(),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            label: BackendLabel::new_static("redis"),
        }
    }
}

impl RedisBackendBuilder {
    /// Set connection URL (`redis://[user:pass@]host:port/db`).
    pub fn server(mut self, connection_info: impl Into<String>) -> Self {
        self.connection_info = connection_info.into();
        self
    }

    /// Take the connection URL from loaded settings.
    pub fn config(self, config: &RedisConfig) -> Self {
        self.server(config.connection_url())
    }

    /// Bound how long establishing a connection may take.
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Bound how long a single command may wait for its reply.
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set a custom label for this backend, used in logs and metrics.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Create new instance of Redis backend with passed settings.
    ///
    /// Only validates the URL; no connection is made until the first cache
    /// operation. Connection attempts are never retried with backoff.
    pub fn build(self) -> Result<RedisBackend, Error> {
        let manager_config = ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(Some(self.connection_timeout))
            .set_response_timeout(Some(self.response_timeout));
        Ok(RedisBackend {
            client: Client::open(self.connection_info)?,
            connection: OnceCell::new(),
            manager_config,
            label: self.label,
        })
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        let mut con = self.connection().await?.clone();

        // Pipeline: GET + PTTL with typed decoding
        let (data, pttl): (Option<Vec<u8>>, i64) = redis::pipe()
            .cmd("GET")
            .arg(key.as_str())
            .cmd("PTTL")
            .arg(key.as_str())
            .query_async(&mut con)
            .await
            .map_err(Error::from)?;

        let data = match data {
            Some(data) => Bytes::from(data),
            None => return Ok(None),
        };

        // PTTL returns: -2 if key doesn't exist, -1 if no TTL, else milliseconds
        let expire = (pttl > 0).then(|| Utc::now() + chrono::Duration::milliseconds(pttl));

        Ok(Some(CacheValue::new(data, expire)))
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        let ttl_ms = match value.expire() {
            Some(expire) => {
                let millis = (expire - Utc::now()).num_milliseconds();
                if millis <= 0 {
                    trace!(key = %key, "skip writing already expired value");
                    return Ok(());
                }
                Some(millis)
            }
            None => None,
        };

        let mut con = self.connection().await?.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key.as_str()).arg(value.data().as_ref());
        if let Some(ttl_ms) = ttl_ms {
            cmd.arg("PX").arg(ttl_ms);
        }

        cmd.query_async::<()>(&mut con)
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accepts_config_url() {
        let config = RedisConfig {
            addr: "cache.internal:6379".into(),
            db: 1,
            ..Default::default()
        };
        let backend = RedisBackend::builder()
            .config(&config)
            .label("shared")
            .build()
            .expect("valid url");
        assert_eq!(backend.label().as_str(), "shared");
    }

    #[test]
    fn builder_rejects_invalid_url() {
        let result = RedisBackend::builder().server("not-a-valid-url").build();
        assert!(matches!(result, Err(Error::Redis(_))));
    }
}
