//! In-memory cache store for encore, backed by [Moka](https://docs.rs/moka).
//!
//! Suits single-process deployments and tests; for a cache shared between
//! processes use `encore-redis`.
#![warn(missing_docs)]

mod backend;
mod builder;

pub use backend::MokaBackend;
pub use builder::{ByteCapacity, EntryCapacity, MokaBackendBuilder, NoCapacity};
pub use moka::policy::EvictionPolicy;
