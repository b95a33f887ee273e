//! Error types for Redis backend operations.
//!
//! All errors can be converted to [`BackendError`] for uniform error handling
//! across cache stores.
//!
//! [`BackendError`]: encore_backend::BackendError

use encore_backend::BackendError;
use redis::RedisError;

/// Error type for Redis backend operations.
///
/// # When You'll Encounter This
///
/// - Using [`RedisBackendBuilder::build`] with an invalid connection URL
/// - Loading a [`RedisConfig`] from a missing or malformed YAML file
/// - Performing the first cache operation when Redis is unreachable
///   (connection is established lazily)
///
/// Errors raised during cache operations are converted to [`BackendError`]
/// and, from there, logged and swallowed by the catalog.
///
/// [`RedisBackendBuilder::build`]: crate::RedisBackendBuilder::build
/// [`RedisConfig`]: crate::RedisConfig
/// [`BackendError`]: encore_backend::BackendError
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying Redis client.
    ///
    /// This includes connection failures, protocol errors, authentication
    /// failures, and command execution errors.
    #[error("Redis backend error: {0}")]
    Redis(#[from] RedisError),

    /// The connection config file could not be read.
    #[error("failed to read redis config {path}: {source}")]
    ConfigRead {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The connection config is not valid YAML of the expected shape.
    #[error("invalid redis config: {0}")]
    ConfigParse(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<Error> for BackendError {
    fn from(error: Error) -> Self {
        match error {
            Error::Redis(error) if error.is_io_error() || error.is_timeout() => {
                Self::ConnectionError(Box::new(error))
            }
            error => Self::InternalError(Box::new(error)),
        }
    }
}
