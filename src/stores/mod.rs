//! Read-only access to the state admission decisions depend on.
//!
//! Validation reads two things: the release catalog and a cluster's lifecycle
//! history. Both are behind narrow traits so the decision logic never sees a
//! concrete client:
//! - `kubernetes`: backed by the Kubernetes API, with a per-read deadline
//! - `memory`: in-process maps, for tests and local tooling

mod catalog;
pub mod kubernetes;
pub mod memory;
mod status;

pub use catalog::{ReleaseCatalog, ReleaseLookup, lookup_release};
pub use status::{ClusterKey, ClusterStatusSource};

#[cfg(test)]
pub use catalog::MockReleaseCatalog;
#[cfg(test)]
pub use status::MockClusterStatusSource;

use thiserror::Error;

/// Errors raised by a store read.
///
/// These are dependency faults: they say nothing about whether a request is
/// valid, only that it could not be evaluated.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// The read did not complete within the store's deadline
    #[error("read deadline exceeded")]
    DeadlineExceeded,

    /// No infrastructure object exists for the cluster
    #[error("no infrastructure cluster found for {0}")]
    ClusterNotFound(String),

    /// Any other backend failure
    #[error("store backend error: {0}")]
    Backend(String),
}
