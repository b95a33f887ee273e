use std::path::PathBuf;

use thiserror::Error;

/// Failure while bootstrapping or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`ServerConfig`](crate::ServerConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The redis cache store could not be set up.
    #[error(transparent)]
    Redis(#[from] encore_redis::error::Error),

    /// The HTTP client for the origin could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Configured listen address.
        addr: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an IO error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Tracing(#[source] Box<dyn std::error::Error + Send + Sync>),
}
