//! HTTP front for the encore catalog.
//!
//! Routes:
//!
//! - `GET /artists` lists every artist as an [`ArtistsPage`](encore::ArtistsPage).
//! - `GET /artist?id=N` returns one [`FullArtistRecord`](encore::FullArtistRecord).
//!   Without an id it redirects to `/artists`; an unknown or malformed id is
//!   a 404.
//! - `GET /health` answers `OK`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use encore::{Catalog, Upstream};
use encore_reqwest::ReqwestUpstream;

pub use config::{CacheConfig, ServerConfig};
pub use error::ServerError;
pub use routes::{SharedCatalog, router};

/// Builds the catalog described by `config`, fetching over HTTP.
pub fn build_catalog(config: &ServerConfig) -> Result<SharedCatalog, ServerError> {
    let backend = config.cache.build()?;
    let client = reqwest::Client::builder().build()?;
    let upstream: Arc<dyn Upstream> = Arc::new(ReqwestUpstream::new(client));
    Ok(Arc::new(Catalog::new(
        backend,
        upstream,
        config.catalog.clone(),
    )))
}
