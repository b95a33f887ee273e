use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use encore_backend::{Backend, BackendError, BackendResult};
use encore_core::{BackendLabel, CacheKey, CacheValue, Raw};

#[derive(Debug, Default)]
pub struct BackendCounters {
    pub read_count: AtomicUsize,
    pub read_hit_count: AtomicUsize,
    pub read_miss_count: AtomicUsize,
    pub write_count: AtomicUsize,
}

impl BackendCounters {
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    pub fn read_hit_count(&self) -> usize {
        self.read_hit_count.load(Ordering::SeqCst)
    }

    pub fn read_miss_count(&self) -> usize {
        self.read_miss_count.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.read_count.store(0, Ordering::SeqCst);
        self.read_hit_count.store(0, Ordering::SeqCst);
        self.read_miss_count.store(0, Ordering::SeqCst);
        self.write_count.store(0, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct Faults {
    reads: AtomicBool,
    writes: AtomicBool,
}

/// In-memory [`Backend`] that counts every call and can be told to fail.
///
/// Clones share the same store, counters and fault switches, so a test can
/// keep one handle while the catalog owns another.
#[derive(Clone, Debug)]
pub struct MockBackend {
    pub cache: Arc<DashMap<CacheKey, CacheValue<Raw>>>,
    pub counters: Arc<BackendCounters>,
    faults: Arc<Faults>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            counters: Arc::new(BackendCounters::default()),
            faults: Arc::new(Faults::default()),
        }
    }

    pub fn read_count(&self) -> usize {
        self.counters.read_count()
    }

    pub fn read_hit_count(&self) -> usize {
        self.counters.read_hit_count()
    }

    pub fn read_miss_count(&self) -> usize {
        self.counters.read_miss_count()
    }

    pub fn write_count(&self) -> usize {
        self.counters.write_count()
    }

    pub fn reset_counters(&self) {
        self.counters.reset();
    }

    pub fn cache_entry_count(&self) -> usize {
        self.cache.len()
    }

    /// Make every following read fail with a connection error.
    pub fn fail_reads(&self, fail: bool) {
        self.faults.reads.store(fail, Ordering::SeqCst);
    }

    /// Make every following write fail with a connection error.
    pub fn fail_writes(&self, fail: bool) {
        self.faults.writes.store(fail, Ordering::SeqCst);
    }

    /// Put raw bytes under `url`, bypassing the counters.
    pub fn insert(&self, url: &str, value: CacheValue<Raw>) {
        self.cache.insert(CacheKey::from_url(url), value);
    }

    /// Put a JSON value under `url` that never expires.
    pub fn insert_json<T: serde::Serialize>(&self, url: &str, value: &T) {
        let raw = serde_json::to_vec(value).expect("fixture serializes");
        self.insert(url, CacheValue::new(Raw::from(raw), None));
    }

    /// The entry stored under `url`, bypassing the counters.
    pub fn get(&self, url: &str) -> Option<CacheValue<Raw>> {
        self.cache
            .get(&CacheKey::from_url(url))
            .map(|entry| entry.value().clone())
    }

    /// Decode the entry stored under `url` as JSON.
    pub fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Option<T> {
        self.get(url)
            .map(|value| serde_json::from_slice(value.data()).expect("cached value is valid JSON"))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.cache.contains_key(&CacheKey::from_url(url))
    }
}

fn injected(operation: &str) -> BackendError {
    BackendError::ConnectionError(
        std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            format!("injected {operation} failure"),
        )
        .into(),
    )
}

#[async_trait]
impl Backend for MockBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        self.counters.read_count.fetch_add(1, Ordering::SeqCst);
        if self.faults.reads.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        let result = self.cache.get(key).map(|v| v.value().clone());
        if result.is_some() {
            self.counters.read_hit_count.fetch_add(1, Ordering::SeqCst);
        } else {
            self.counters.read_miss_count.fetch_add(1, Ordering::SeqCst);
        }
        Ok(result)
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.counters.write_count.fetch_add(1, Ordering::SeqCst);
        if self.faults.writes.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        self.cache.insert(key.clone(), value);
        Ok(())
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("mock")
    }
}
