//! Test doubles for encore: a counting cache store with fault injection, a
//! scripted origin, and a small fixture catalog.

pub mod fixtures;
pub mod mock_backend;
pub mod mock_upstream;

pub use mock_backend::{BackendCounters, MockBackend};
pub use mock_upstream::MockUpstream;
