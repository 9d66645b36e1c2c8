//! Error type shared by the graph container and its algorithms.
//!
//! Every fallible operation returns a [`GraphError`] instead of panicking.
//! `NotFound`, `Duplicate`, `MissingEndpoint`, `NotIsolated`, `Cycle` and
//! `InvalidCursor` are ordinary outcomes a caller is expected to branch on;
//! `AllocationFailure` is surfaced from `try_reserve` rather than aborting the process.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors produced by graph and sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A start vertex or lookup key is not present.
    #[error("vertex not found")]
    NotFound,
    /// The vertex or edge being inserted already exists.
    #[error("vertex or edge already present")]
    Duplicate,
    /// An edge operation referenced an absent vertex (or an absent edge on removal).
    #[error("edge endpoint missing")]
    MissingEndpoint,
    /// A vertex cannot be removed while edges still touch it.
    #[error("vertex is not isolated")]
    NotIsolated,
    /// The graph contains a cycle where an acyclic graph is required.
    #[error("graph contains a cycle")]
    Cycle,
    /// A sequence cursor names a slot that holds no element.
    #[error("cursor names a vacant slot")]
    InvalidCursor,
    /// Growing a container failed.
    #[error("memory allocation failed")]
    AllocationFailure,
}

impl From<TryReserveError> for GraphError {
    fn from(_: TryReserveError) -> Self {
        GraphError::AllocationFailure
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GraphError>;
