//! # encore
//!
//! A cache-aside layer in front of the read-only artist catalog API.
//!
//! Every resource the origin serves is cached under its URL for a fixed TTL.
//! On top of single-resource resolution, [`Aggregator`] stitches an artist
//! and its locations, concert dates and relations into one
//! [`FullArtistRecord`], all or nothing.
//!
//! The cache store is any [`encore_backend::Backend`] (redis, moka, or a test
//! double) and the origin any [`Upstream`]; both are passed in at
//! construction.
//!
//! ## Failure semantics
//!
//! - Cache store failures and corrupt entries degrade to an origin fetch and
//!   are only logged.
//! - Origin failures surface as [`CatalogError`] and are never cached.
//! - The origin signals a missing entity with a 126-byte body rather than a
//!   status code; see [`absent`].
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// The origin's "entity does not exist" body.
pub mod absent;

/// Composite record assembly.
pub mod aggregator;

/// The three catalog entry points and their builder.
pub mod catalog;

/// Catalog configuration: API root, TTL, timeouts and sub-fetch mode.
pub mod config;

/// Typed decoding of origin bodies and cached values.
pub mod decode;

/// Error types for catalog operations.
///
/// Defines [`CatalogError`] which covers:
/// - Transport failures (including timeouts and error statuses)
/// - Absent entities
/// - Undecodable bodies
/// - Composite integrity faults
pub mod error;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module provides counters
/// and histograms for:
/// - Cache hits, misses and store failures
/// - Origin requests by outcome, and their latency
pub mod metrics;

/// Single-resource cache-aside resolution.
pub mod resolver;

pub use aggregator::Aggregator;
pub use catalog::{Catalog, CatalogBuilder, NotSet};
pub use config::{CatalogConfig, SubFetchMode};
pub use decode::{DecodeError, Resource};
pub use error::CatalogError;
pub use resolver::Resolver;

pub use encore_core::{
    ArtistSummary, ArtistsPage, BackendLabel, CacheKey, CacheValue, CatalogIndex, ConcertDateSet,
    FullArtistRecord, LocationSet, Raw, RelationSet, ResourceKind, Upstream, UpstreamError,
};
