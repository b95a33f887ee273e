//! Metrics recorded by the resolver, with their labels.

#![cfg(feature = "metrics")]

use encore::{CatalogConfig, Resolver};
use encore_core::{CacheKey, LocationSet};
use encore_test::fixtures::locations;
use encore_test::{MockBackend, MockUpstream};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};

type SnapshotEntry = (
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
);

const LOCATIONS_5: &str = "https://x/locations/5";
const LOCATIONS_6: &str = "https://x/locations/6";

fn find_counter(entries: &[SnapshotEntry], name: &str, label: (&str, &str)) -> u64 {
    entries
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| {
            key.key()
                .labels()
                .any(|l| l.key() == label.0 && l.value() == label.1)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn has_histogram(entries: &[SnapshotEntry], name: &str) -> bool {
    entries
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

#[test]
fn records_hits_misses_and_origin_outcomes() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        // Single-threaded runtime keeps everything on the recorder's thread.
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let backend = MockBackend::new();
            let upstream = MockUpstream::new();
            upstream.json(LOCATIONS_5, &locations(5));
            upstream.absent(LOCATIONS_6);
            let resolver = Resolver::new(backend, upstream, &CatalogConfig::default());

            let key = CacheKey::from_url(LOCATIONS_5);
            resolver.resolve::<LocationSet>(&key).await.unwrap();
            resolver.resolve::<LocationSet>(&key).await.unwrap();
            resolver
                .resolve::<LocationSet>(&CacheKey::from_url(LOCATIONS_6))
                .await
                .unwrap_err();
        });
    });

    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(find_counter(&entries, "encore_cache_hit_total", ("kind", "locations")), 1);
    assert_eq!(find_counter(&entries, "encore_cache_miss_total", ("kind", "locations")), 2);
    assert_eq!(find_counter(&entries, "encore_cache_miss_total", ("backend", "mock")), 2);
    assert_eq!(find_counter(&entries, "encore_upstream_request_total", ("outcome", "ok")), 1);
    assert_eq!(
        find_counter(&entries, "encore_upstream_request_total", ("outcome", "absent")),
        1
    );
    assert!(has_histogram(&entries, "encore_upstream_duration_seconds"));
}

#[test]
fn records_store_failures() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let backend = MockBackend::new();
            backend.fail_reads(true);
            backend.fail_writes(true);
            let upstream = MockUpstream::new();
            upstream.json(LOCATIONS_5, &locations(5));
            let resolver = Resolver::new(backend, upstream, &CatalogConfig::default());

            resolver
                .resolve::<LocationSet>(&CacheKey::from_url(LOCATIONS_5))
                .await
                .unwrap();
        });
    });

    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        find_counter(&entries, "encore_cache_backend_error_total", ("operation", "read")),
        1
    );
    assert_eq!(
        find_counter(&entries, "encore_cache_backend_error_total", ("operation", "write")),
        1
    );
}
