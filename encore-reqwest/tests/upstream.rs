//! Integration tests for ReqwestUpstream using wiremock.

use std::time::Duration;

use encore_core::{Upstream, UpstreamError};
use encore_reqwest::ReqwestUpstream;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn success_returns_body_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "name": "Queen"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let upstream = ReqwestUpstream::default();
    let url = format!("{}/api/artists/1", mock_server.uri());

    let body = upstream.fetch(&url).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "Queen");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/artists"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let upstream = ReqwestUpstream::default();
    let url = format!("{}/api/artists", mock_server.uri());

    match upstream.fetch(&url).await {
        Err(UpstreamError::Status { status, url: failed }) => {
            assert_eq!(status, 503);
            assert_eq!(failed, url);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn short_placeholder_body_is_passed_through() {
    // The origin answers unknown ids with 200 and a fixed-size placeholder;
    // recognising it is the catalog's job, not the fetcher's.
    let mock_server = MockServer::start().await;
    let placeholder = "x".repeat(126);

    Mock::given(method("GET"))
        .and(path("/api/artists/999"))
        .respond_with(ResponseTemplate::new(200).set_body_string(placeholder.clone()))
        .mount(&mock_server)
        .await;

    let upstream = ReqwestUpstream::default();
    let body = upstream
        .fetch(&format!("{}/api/artists/999", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body.len(), 126);
}

#[tokio::test]
async fn slow_origin_hits_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dates/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let upstream = ReqwestUpstream::default().with_timeout(Duration::from_millis(100));
    let result = upstream
        .fetch(&format!("{}/api/dates/1", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(UpstreamError::Timeout { timeout, .. }) if timeout == Duration::from_millis(100)
    ));
}

#[tokio::test]
async fn unreachable_origin_is_a_transport_error() {
    let upstream = ReqwestUpstream::default();
    // Port 9 (discard) on localhost is expected to refuse connections.
    let result = upstream.fetch("http://127.0.0.1:9/api").await;
    assert!(matches!(result, Err(UpstreamError::Transport { .. })));
}
