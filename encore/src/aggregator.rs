//! Composition of a full artist record from four origin resources.
//!
//! All or nothing: either every part resolves and the merged record is
//! returned (and cached under the artist URL), or the first failure is
//! returned and no merged record is written.

use encore_backend::{Backend, CacheKey};
use encore_core::{
    ArtistSummary, CatalogIndex, ConcertDateSet, FullArtistRecord, LocationSet, RelationSet,
    Upstream,
};
use tracing::{debug, warn};

use crate::config::SubFetchMode;
use crate::decode::Resource;
use crate::error::CatalogError;
use crate::resolver::Resolver;

/// A resource that belongs to a single artist.
trait ArtistPart: Resource {
    fn artist_id(&self) -> u32;

    fn ensure_artist(&self, expected: u32) -> Result<(), CatalogError> {
        let found = self.artist_id();
        if found == expected {
            Ok(())
        } else {
            Err(CatalogError::IdMismatch {
                kind: Self::KIND,
                expected,
                found,
            })
        }
    }
}

impl ArtistPart for ArtistSummary {
    fn artist_id(&self) -> u32 {
        self.id
    }
}

impl ArtistPart for LocationSet {
    fn artist_id(&self) -> u32 {
        self.id
    }
}

impl ArtistPart for ConcertDateSet {
    fn artist_id(&self) -> u32 {
        self.id
    }
}

impl ArtistPart for RelationSet {
    fn artist_id(&self) -> u32 {
        self.id
    }
}

/// Builds [`FullArtistRecord`]s on top of a [`Resolver`].
///
/// The merged record owns the artist URL key. The bare artist summary is
/// therefore always fetched from the origin and never cached on its own,
/// while locations, dates and relations go through the cache under their
/// own URLs.
#[derive(Debug)]
pub struct Aggregator<'a, B, U> {
    resolver: &'a Resolver<B, U>,
    mode: SubFetchMode,
}

impl<'a, B, U> Aggregator<'a, B, U>
where
    B: Backend,
    U: Upstream,
{
    /// Creates an aggregator borrowing `resolver`.
    pub fn new(resolver: &'a Resolver<B, U>, mode: SubFetchMode) -> Self {
        Aggregator { resolver, mode }
    }

    /// Resolves the full record of artist `id`.
    ///
    /// Locations, dates and relations are resolved in that order. In
    /// [`SubFetchMode::Sequential`] a failure prevents the later fetches; in
    /// [`SubFetchMode::Parallel`] all three run and the first failure in that
    /// order is returned.
    #[tracing::instrument(skip(self, index), fields(mode = ?self.mode), level = "debug")]
    pub async fn full_record(
        &self,
        index: &CatalogIndex,
        id: u32,
    ) -> Result<FullArtistRecord, CatalogError> {
        let key = CacheKey::from_url(index.artist_url(id));
        if let Some(record) = self
            .resolver
            .lookup(&key, FullArtistRecord::KIND, FullArtistRecord::decode)
            .await
        {
            if record.id == id {
                return Ok(record);
            }
            warn!(%key, found = record.id, "cached record belongs to another artist, refetching");
        }

        let artist: ArtistSummary = self
            .resolver
            .fetch_origin(key.as_str(), ArtistSummary::KIND, ArtistSummary::decode)
            .await?;
        artist.ensure_artist(id)?;

        let locations_key = CacheKey::from_url(index.location_url(id));
        let dates_key = CacheKey::from_url(index.dates_url(id));
        let relations_key = CacheKey::from_url(index.relation_url(id));

        let (locations, concert_dates, relations) = match self.mode {
            SubFetchMode::Sequential => {
                let locations = self.part::<LocationSet>(&locations_key, id).await?;
                let concert_dates = self.part::<ConcertDateSet>(&dates_key, id).await?;
                let relations = self.part::<RelationSet>(&relations_key, id).await?;
                (locations, concert_dates, relations)
            }
            SubFetchMode::Parallel => {
                let (locations, concert_dates, relations) = futures::future::join3(
                    self.part::<LocationSet>(&locations_key, id),
                    self.part::<ConcertDateSet>(&dates_key, id),
                    self.part::<RelationSet>(&relations_key, id),
                )
                .await;
                (locations?, concert_dates?, relations?)
            }
        };

        let record = FullArtistRecord::compose(artist, locations, concert_dates, relations);
        self.resolver
            .store(&key, FullArtistRecord::KIND, &record)
            .await;
        debug!(%key, "full record composed");
        Ok(record)
    }

    /// Resolves one part of artist `id` through the cache.
    ///
    /// A part belonging to another artist is an error and is never stored; a
    /// cached one is treated as a miss.
    async fn part<T: ArtistPart>(&self, key: &CacheKey, id: u32) -> Result<T, CatalogError> {
        if let Some(part) = self.resolver.lookup(key, T::KIND, T::decode).await {
            if part.artist_id() == id {
                return Ok(part);
            }
            warn!(%key, found = part.artist_id(), "cached part belongs to another artist, refetching");
        }
        let part: T = self
            .resolver
            .fetch_origin(key.as_str(), T::KIND, T::decode)
            .await?;
        part.ensure_artist(id)?;
        self.resolver.store(key, T::KIND, &part).await;
        Ok(part)
    }
}
