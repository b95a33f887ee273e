//! Metrics declaration and recording.
//!
//! Every recording function exists with and without the `metrics` feature;
//! without it they are empty and inlined away.

use std::time::Duration;

use encore_core::ResourceKind;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "encore_cache_hit_total",
            "Total number of lookups served from the cache store."
        );
        "encore_cache_hit_total"
    };
    /// Track number of cache miss events, including expired and corrupt entries.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "encore_cache_miss_total",
            "Total number of lookups that fell through to the origin."
        );
        "encore_cache_miss_total"
    };
    /// Track failed cache store reads and writes.
    pub static ref CACHE_BACKEND_ERRORS: &'static str = {
        metrics::describe_counter!(
            "encore_cache_backend_error_total",
            "Total number of cache store operations that failed."
        );
        "encore_cache_backend_error_total"
    };
    /// Track origin requests by outcome.
    pub static ref UPSTREAM_REQUEST_COUNTER: &'static str = {
        metrics::describe_counter!(
            "encore_upstream_request_total",
            "Total number of origin requests by outcome."
        );
        "encore_upstream_request_total"
    };
    /// Metric of origin request timings.
    pub static ref UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "encore_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of origin requests in seconds."
        );
        "encore_upstream_duration_seconds"
    };
}

/// How an origin request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// Decoded successfully.
    Ok,
    /// Transport failure, error status or timeout.
    TransportError,
    /// The origin's "does not exist" placeholder.
    Absent,
    /// Body could not be decoded.
    DecodeError,
}

impl UpstreamOutcome {
    /// Label value for the `outcome` label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UpstreamOutcome::Ok => "ok",
            UpstreamOutcome::TransportError => "transport_error",
            UpstreamOutcome::Absent => "absent",
            UpstreamOutcome::DecodeError => "decode_error",
        }
    }
}

/// Which cache store operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    /// A read.
    Read,
    /// A write.
    Write,
}

impl BackendOperation {
    /// Label value for the `operation` label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackendOperation::Read => "read",
            BackendOperation::Write => "write",
        }
    }
}

/// Record a lookup answered by the cache store.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_cache_hit(kind: ResourceKind, backend: &str) {
    metrics::counter!(
        *CACHE_HIT_COUNTER,
        "kind" => kind.as_str(),
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// Record a lookup that fell through to the origin.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_cache_miss(kind: ResourceKind, backend: &str) {
    metrics::counter!(
        *CACHE_MISS_COUNTER,
        "kind" => kind.as_str(),
        "backend" => backend.to_string()
    )
    .increment(1);
}

/// Record a failed cache store operation.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_backend_error(kind: ResourceKind, backend: &str, operation: BackendOperation) {
    metrics::counter!(
        *CACHE_BACKEND_ERRORS,
        "kind" => kind.as_str(),
        "backend" => backend.to_string(),
        "operation" => operation.as_str()
    )
    .increment(1);
}

/// Record one origin request and how long it took.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream(kind: ResourceKind, outcome: UpstreamOutcome, duration: Duration) {
    metrics::counter!(
        *UPSTREAM_REQUEST_COUNTER,
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!(*UPSTREAM_DURATION, "kind" => kind.as_str())
        .record(duration.as_secs_f64());
}

/// Record a lookup answered by the cache store.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_cache_hit(_kind: ResourceKind, _backend: &str) {}

/// Record a lookup that fell through to the origin.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_cache_miss(_kind: ResourceKind, _backend: &str) {}

/// Record a failed cache store operation.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_backend_error(_kind: ResourceKind, _backend: &str, _operation: BackendOperation) {}

/// Record one origin request and how long it took.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream(_kind: ResourceKind, _outcome: UpstreamOutcome, _duration: Duration) {}
