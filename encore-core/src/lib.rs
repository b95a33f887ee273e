#![warn(missing_docs)]
//! # encore-core
//!
//! Core types for the encore read-through catalog cache.
//!
//! This crate holds everything the other encore crates agree on:
//!
//! - **Catalog resources** ([`CatalogIndex`], [`ArtistSummary`],
//!   [`LocationSet`], [`ConcertDateSet`], [`RelationSet`],
//!   [`FullArtistRecord`]) as they appear on the wire and in the cache
//! - **Cache addressing** ([`CacheKey`]) and stored values ([`CacheValue`])
//! - **Origin access** ([`Upstream`]) implemented by `encore-reqwest` and by
//!   test doubles
//!
//! Cache stores live in `encore-backend` and its implementations; the
//! cache-aside logic lives in `encore`.

pub mod key;
mod kind;
pub mod label;
#[allow(missing_docs)]
pub mod model;
pub mod upstream;
pub mod value;

pub use key::CacheKey;
pub use kind::ResourceKind;
pub use label::BackendLabel;
pub use model::{
    ArtistSummary, ArtistsPage, CatalogIndex, ConcertDateSet, FullArtistRecord, LocationSet,
    RelationSet,
};
pub use upstream::{Upstream, UpstreamError};
pub use value::CacheValue;

/// Raw byte data type used for fetched bodies and serialized cache values.
/// Using `Bytes` provides efficient zero-copy cloning via reference counting.
pub type Raw = bytes::Bytes;
