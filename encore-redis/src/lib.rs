//! Redis cache store for encore.
//!
//! ```no_run
//! use encore_redis::{RedisBackend, RedisConfig};
//!
//! # fn main() -> Result<(), encore_redis::error::Error> {
//! let config = RedisConfig::from_file("redis.yaml")?;
//! let backend = RedisBackend::builder().config(&config).build()?;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;

#[doc(inline)]
pub use crate::backend::{RedisBackend, RedisBackendBuilder};
#[doc(inline)]
pub use crate::config::RedisConfig;
