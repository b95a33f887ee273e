//! The catalog's entry points.

use encore_backend::{Backend, CacheKey};
use encore_core::{ArtistSummary, CatalogIndex, FullArtistRecord, Upstream};

use crate::aggregator::Aggregator;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::resolver::Resolver;

/// Cached read access to the artist catalog.
///
/// # Example
///
/// ```no_run
/// use encore::{Catalog, CatalogConfig};
/// # use encore_core::{Raw, Upstream, UpstreamError};
/// # struct Http;
/// # #[async_trait::async_trait]
/// # impl Upstream for Http {
/// #     async fn fetch(&self, _url: &str) -> Result<Raw, UpstreamError> { unimplemented!() }
/// # }
/// # async fn run(backend: impl encore_backend::Backend) -> Result<(), encore::CatalogError> {
/// let catalog = Catalog::builder()
///     .backend(backend)
///     .upstream(Http)
///     .config(CatalogConfig::default())
///     .build();
///
/// let index = catalog.catalog_index().await?;
/// let artists = catalog.artists(&index).await?;
/// let first = catalog.full_artist(&index, artists[0].id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Catalog<B, U> {
    resolver: Resolver<B, U>,
    config: CatalogConfig,
    api_root: CacheKey,
}

impl Catalog<NotSet, NotSet> {
    /// Creates a new [`CatalogBuilder`].
    pub fn builder() -> CatalogBuilder<NotSet, NotSet> {
        CatalogBuilder::new()
    }
}

impl<B, U> Catalog<B, U>
where
    B: Backend,
    U: Upstream,
{
    /// Creates a catalog reading through `backend` from `upstream`.
    pub fn new(backend: B, upstream: U, config: CatalogConfig) -> Self {
        Catalog {
            resolver: Resolver::new(backend, upstream, &config),
            api_root: CacheKey::from_url(&config.api_root),
            config,
        }
    }

    /// The resolver used for every lookup.
    pub fn resolver(&self) -> &Resolver<B, U> {
        &self.resolver
    }

    /// The configuration the catalog was built with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// An aggregator over this catalog's resolver.
    pub fn aggregator(&self) -> Aggregator<'_, B, U> {
        Aggregator::new(&self.resolver, self.config.sub_fetch)
    }

    /// Resolves the catalog index at the configured API root.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn catalog_index(&self) -> Result<CatalogIndex, CatalogError> {
        self.resolver.resolve(&self.api_root).await
    }

    /// Resolves the list of all artists.
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn artists(&self, index: &CatalogIndex) -> Result<Vec<ArtistSummary>, CatalogError> {
        self.resolver
            .resolve(&CacheKey::from_url(&index.artists))
            .await
    }

    /// Resolves the full record of artist `id`.
    pub async fn full_artist(
        &self,
        index: &CatalogIndex,
        id: u32,
    ) -> Result<FullArtistRecord, CatalogError> {
        self.aggregator().full_record(index, id).await
    }
}

/// Marker type for an unset builder field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for [`Catalog`].
///
/// `build()` only exists once both a backend and an upstream are set. The
/// configuration defaults to [`CatalogConfig::default`].
#[derive(Debug)]
pub struct CatalogBuilder<B, U> {
    backend: B,
    upstream: U,
    config: CatalogConfig,
}

impl CatalogBuilder<NotSet, NotSet> {
    /// Creates a new builder with nothing set.
    pub fn new() -> Self {
        CatalogBuilder {
            backend: NotSet,
            upstream: NotSet,
            config: CatalogConfig::default(),
        }
    }
}

impl Default for CatalogBuilder<NotSet, NotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, U> CatalogBuilder<B, U> {
    /// Sets the cache store.
    pub fn backend<NewB: Backend>(self, backend: NewB) -> CatalogBuilder<NewB, U> {
        CatalogBuilder {
            backend,
            upstream: self.upstream,
            config: self.config,
        }
    }

    /// Sets the origin.
    pub fn upstream<NewU: Upstream>(self, upstream: NewU) -> CatalogBuilder<B, NewU> {
        CatalogBuilder {
            backend: self.backend,
            upstream,
            config: self.config,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }
}

impl<B, U> CatalogBuilder<B, U>
where
    B: Backend,
    U: Upstream,
{
    /// Builds the [`Catalog`].
    pub fn build(self) -> Catalog<B, U> {
        Catalog::new(self.backend, self.upstream, self.config)
    }
}
