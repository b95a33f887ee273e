//! HTTP routes over a shared [`Catalog`].

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use encore::{ArtistsPage, Catalog, CatalogError, FullArtistRecord, Upstream};
use encore_backend::Backend;
use serde::Deserialize;
use tracing::{error, info};

/// Shown for any failure that is not a missing artist.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Shown when the requested artist does not exist.
pub const NOT_FOUND: &str = "Page not found";

/// The catalog as the routes see it: any store, any origin.
pub type SharedCatalog = Arc<Catalog<Arc<dyn Backend>, Arc<dyn Upstream>>>;

/// Builds the application router.
pub fn router(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/artists", get(artists_page))
        .route("/artist", get(artist_page))
        .route("/health", get(health))
        .with_state(catalog)
}

async fn artists_page(State(catalog): State<SharedCatalog>) -> (StatusCode, Json<ArtistsPage>) {
    let index = match catalog.catalog_index().await {
        Ok(index) => index,
        Err(error) => return failed_page(&error),
    };
    match catalog.artists(&index).await {
        Ok(artists) => (StatusCode::OK, Json(ArtistsPage::new(index, artists))),
        Err(error) => failed_page(&error),
    }
}

fn failed_page(error: &CatalogError) -> (StatusCode, Json<ArtistsPage>) {
    error!(%error, "failed to resolve artist list");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ArtistsPage::failed(INTERNAL_ERROR)),
    )
}

#[derive(Debug, Deserialize)]
struct ArtistQuery {
    id: Option<String>,
}

async fn artist_page(
    State(catalog): State<SharedCatalog>,
    Query(query): Query<ArtistQuery>,
) -> Response {
    let Some(raw_id) = query.id.filter(|id| !id.is_empty()) else {
        return Redirect::to("/artists").into_response();
    };
    let Ok(id) = raw_id.parse::<u32>() else {
        info!(id = %raw_id, "artist id is not a number");
        return failed_record(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    let index = match catalog.catalog_index().await {
        Ok(index) => index,
        Err(error) => {
            error!(%error, "failed to resolve catalog index");
            return failed_record(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    match catalog.full_artist(&index, id).await {
        Ok(record) => Json(record).into_response(),
        Err(error) if error.is_absent() => {
            info!(id, "artist does not exist");
            failed_record(StatusCode::NOT_FOUND, NOT_FOUND)
        }
        Err(error) => {
            error!(id, %error, "failed to resolve artist");
            failed_record(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

fn failed_record(status: StatusCode, message: &str) -> Response {
    (status, Json(FullArtistRecord::failed(message))).into_response()
}

async fn health() -> &'static str {
    "OK"
}
