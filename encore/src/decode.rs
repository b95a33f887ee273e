//! Resource decoding.
//!
//! Decoding is pure: bytes in, typed value or [`DecodeError`] out. The same
//! decoders read origin bodies and cached values, since the cache stores each
//! resource as JSON in its wire shape.
//!
//! The absence placeholder is not special-cased here; see [`crate::absent`].

use encore_core::{
    ArtistSummary, CatalogIndex, ConcertDateSet, FullArtistRecord, LocationSet, RelationSet,
    ResourceKind,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A body that is not a valid resource of the expected kind.
#[derive(Debug, Error)]
#[error("failed to decode {kind}: {source}")]
pub struct DecodeError {
    kind: ResourceKind,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    /// Wraps a JSON error raised while decoding `kind`.
    pub fn new(kind: ResourceKind, source: serde_json::Error) -> Self {
        DecodeError { kind, source }
    }

    /// The kind that failed to decode.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

/// A catalog resource that can be fetched, cached and decoded.
///
/// The default [`decode`](Resource::decode) reads the upstream JSON shape,
/// which is also the shape written to the cache.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// What this resource is called in logs, errors and metrics.
    const KIND: ResourceKind;

    /// Decodes a body into this resource.
    fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(raw).map_err(|source| DecodeError::new(Self::KIND, source))
    }
}

impl Resource for CatalogIndex {
    const KIND: ResourceKind = ResourceKind::CatalogIndex;
}

impl Resource for Vec<ArtistSummary> {
    const KIND: ResourceKind = ResourceKind::ArtistList;
}

impl Resource for ArtistSummary {
    const KIND: ResourceKind = ResourceKind::Artist;
}

impl Resource for LocationSet {
    const KIND: ResourceKind = ResourceKind::Locations;
}

impl Resource for ConcertDateSet {
    const KIND: ResourceKind = ResourceKind::ConcertDates;
}

impl Resource for RelationSet {
    const KIND: ResourceKind = ResourceKind::Relations;
}

impl Resource for FullArtistRecord {
    const KIND: ResourceKind = ResourceKind::FullRecord;
}

/// Decodes the API root.
pub fn decode_catalog_index(raw: &[u8]) -> Result<CatalogIndex, DecodeError> {
    CatalogIndex::decode(raw)
}

/// Decodes the list of all artists.
pub fn decode_artist_list(raw: &[u8]) -> Result<Vec<ArtistSummary>, DecodeError> {
    Vec::<ArtistSummary>::decode(raw)
}

/// Decodes one artist summary.
pub fn decode_artist(raw: &[u8]) -> Result<ArtistSummary, DecodeError> {
    ArtistSummary::decode(raw)
}

/// Decodes the locations of one artist.
pub fn decode_locations(raw: &[u8]) -> Result<LocationSet, DecodeError> {
    LocationSet::decode(raw)
}

/// Decodes the concert dates of one artist.
pub fn decode_concert_dates(raw: &[u8]) -> Result<ConcertDateSet, DecodeError> {
    ConcertDateSet::decode(raw)
}

/// Decodes the dates-per-location mapping of one artist.
pub fn decode_relations(raw: &[u8]) -> Result<RelationSet, DecodeError> {
    RelationSet::decode(raw)
}

/// Decodes a merged record, as the catalog caches it.
pub fn decode_full_record(raw: &[u8]) -> Result<FullArtistRecord, DecodeError> {
    FullArtistRecord::decode(raw)
}
