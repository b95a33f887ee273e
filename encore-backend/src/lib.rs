//! Traits and structs for encore cache store interaction.
//!
//! If you want to plug in your own cache store, you are in the right place:
//! implement [`Backend`] and hand it to the catalog.
mod backend;

pub use backend::{Backend, BackendResult};
pub use encore_core::{BackendLabel, CacheKey, CacheValue, Raw};
use thiserror::Error;

/// Failure of a cache store read or write.
///
/// None of these reach catalog callers: a failing store is logged and the
/// request falls through to the origin.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The store answered but the operation failed, or the store itself is
    /// misconfigured.
    #[error(transparent)]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    /// The store could not be reached or did not answer in time.
    #[error(transparent)]
    ConnectionError(Box<dyn std::error::Error + Send + Sync>),
}
