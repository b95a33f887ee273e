use encore_core::{ResourceKind, UpstreamError};
use thiserror::Error;

use crate::decode::DecodeError;

/// Failure of a catalog operation.
///
/// Cache store failures never show up here: the resolver recovers from them
/// by going to the origin. Everything that goes wrong with the origin does.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The origin could not be reached, answered with an error status, or
    /// did not answer in time.
    #[error(transparent)]
    Transport(#[from] UpstreamError),

    /// The origin answered with its "does not exist" placeholder body.
    #[error("{kind} at {url} does not exist")]
    EntityAbsent {
        /// Requested URL.
        url: String,
        /// What was being resolved.
        kind: ResourceKind,
    },

    /// The origin's body is not a valid resource of the expected kind.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A part of a composite record belongs to a different artist.
    #[error("{kind} has id {found}, expected {expected}")]
    IdMismatch {
        /// The offending part.
        kind: ResourceKind,
        /// The requested artist id.
        expected: u32,
        /// The id the part carried.
        found: u32,
    },
}

impl CatalogError {
    /// Whether the requested entity does not exist at the origin.
    ///
    /// Consumers map this to "not found"; every other variant is a generic
    /// failure.
    pub fn is_absent(&self) -> bool {
        matches!(self, CatalogError::EntityAbsent { .. })
    }

    /// Whether the origin failed to deliver a response at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport(_))
    }
}
