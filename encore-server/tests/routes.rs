use std::sync::Arc;

use axum::body::{Body, to_bytes};
use encore::{ArtistsPage, Catalog, CatalogConfig, FullArtistRecord, Upstream};
use encore_backend::Backend;
use encore_server::{SharedCatalog, router};
use encore_test::fixtures::{API_ROOT, artists, catalog_upstream, full_record, index};
use encore_test::{MockBackend, MockUpstream};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn catalog(backend: &MockBackend, upstream: &MockUpstream) -> SharedCatalog {
    let backend: Arc<dyn Backend> = Arc::new(backend.clone());
    let upstream: Arc<dyn Upstream> = Arc::new(upstream.clone());
    Arc::new(Catalog::new(
        backend,
        upstream,
        CatalogConfig::default().api_root(API_ROOT),
    ))
}

async fn get(catalog: SharedCatalog, uri: &str) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let response = router(catalog)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn artists_page_lists_everyone() {
    let upstream = catalog_upstream(&[1, 2]);
    let (status, _, body) = get(catalog(&MockBackend::new(), &upstream), "/artists").await;

    assert_eq!(status, StatusCode::OK);
    let page: ArtistsPage = serde_json::from_slice(&body).unwrap();
    assert_eq!(page, ArtistsPage::new(index(), artists(&[1, 2])));
}

#[tokio::test]
async fn artists_page_reports_origin_failure() {
    let upstream = catalog_upstream(&[1]);
    upstream.status("https://x/artists", 502);
    let (status, _, body) = get(catalog(&MockBackend::new(), &upstream), "/artists").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let page: ArtistsPage = serde_json::from_slice(&body).unwrap();
    assert_eq!(page.error.as_deref(), Some("Internal server error"));
    assert!(page.artists.is_empty());
}

#[tokio::test]
async fn artist_page_returns_full_record() {
    let backend = MockBackend::new();
    let upstream = catalog_upstream(&[5]);
    let (status, _, body) = get(catalog(&backend, &upstream), "/artist?id=5").await;

    assert_eq!(status, StatusCode::OK);
    let record: FullArtistRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record, full_record(5));
    assert!(backend.contains("https://x/artists/5"));
}

#[tokio::test]
async fn artist_page_without_id_redirects() {
    let upstream = catalog_upstream(&[5]);
    for uri in ["/artist", "/artist?id="] {
        let (status, headers, _) = get(catalog(&MockBackend::new(), &upstream), uri).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/artists");
    }
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn non_numeric_id_is_not_found() {
    let upstream = catalog_upstream(&[5]);
    let (status, _, body) = get(catalog(&MockBackend::new(), &upstream), "/artist?id=abc").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let record: FullArtistRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.error.as_deref(), Some("Page not found"));
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn absent_artist_is_not_found() {
    let upstream = catalog_upstream(&[5]);
    upstream.absent("https://x/artists/999");
    let (status, _, body) = get(catalog(&MockBackend::new(), &upstream), "/artist?id=999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let record: FullArtistRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.error.as_deref(), Some("Page not found"));
}

#[tokio::test]
async fn failing_part_is_internal_error() {
    let upstream = catalog_upstream(&[5]);
    upstream.raw("https://x/dates/5", "not json at all");
    let (status, _, body) = get(catalog(&MockBackend::new(), &upstream), "/artist?id=5").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let record: FullArtistRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.error.as_deref(), Some("Internal server error"));
    assert_eq!(record.id, 0);
}

#[tokio::test]
async fn health_answers_ok() {
    let (status, _, body) =
        get(catalog(&MockBackend::new(), &MockUpstream::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
