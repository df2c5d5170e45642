//! Test fixtures and builder patterns for cluster snapshots, catalogs and
//! lifecycle histories.

#![allow(dead_code)]

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use release_admission::crd::{CLUSTER_ID_LABEL, ReleaseState};
use release_admission::lifecycle::{ConditionHistory, ConditionKind, LifecycleCondition};
use release_admission::stores::memory::{InMemoryClusterStatus, InMemoryReleaseCatalog};
use release_admission::{ClusterSnapshot, TransitionValidator};

/// Cluster ID used by fixtures unless a test picks its own.
pub const CLUSTER_ID: &str = "abc12";

/// Namespace used by fixtures.
pub const NAMESPACE: &str = "org-acme";

/// Builder for creating cluster snapshot fixtures.
///
/// # Example
/// ```
/// let snapshot = ClusterBuilder::new("abc12")
///     .namespace("org-acme")
///     .release_version("3.0.0")
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct ClusterBuilder {
    cluster_id: String,
    namespace: String,
    release_version: Option<String>,
}

impl ClusterBuilder {
    /// Create a new builder for the given cluster ID.
    pub fn new(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            namespace: NAMESPACE.to_string(),
            release_version: None,
        }
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the release version label.
    pub fn release_version(mut self, version: impl Into<String>) -> Self {
        self.release_version = Some(version.into());
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> ClusterSnapshot {
        let snapshot = ClusterSnapshot::new(&self.cluster_id)
            .with_namespace(&self.namespace)
            .with_label(CLUSTER_ID_LABEL, &self.cluster_id);
        match self.release_version {
            Some(version) => snapshot.with_release_version(&version),
            None => snapshot,
        }
    }
}

/// Snapshot of the default cluster at `version`.
pub fn cluster(version: &str) -> ClusterSnapshot {
    ClusterBuilder::new(CLUSTER_ID).release_version(version).build()
}

/// The release catalog used by the table-driven release version cases.
pub fn release_catalog() -> InMemoryReleaseCatalog {
    InMemoryReleaseCatalog::new()
        .with_release("v5.0.0", ReleaseState::Active)
        .with_release("v4.0.0", ReleaseState::Active)
        .with_release("v3.4.1", ReleaseState::Active)
        .with_release("v3.2.2", ReleaseState::Active)
        .with_release("v3.2.1", ReleaseState::Active)
        .with_release("v3.2.0", ReleaseState::Deprecated)
        .with_release("v3.1.0", ReleaseState::Active)
        .with_release("v2.0.0", ReleaseState::Active)
}

/// Lifecycle history, most recent first, with entries 15 minutes apart.
pub fn history(kinds: &[ConditionKind]) -> ConditionHistory {
    let now = Timestamp::now();
    kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let minutes_ago = 15 * i as i64;
            LifecycleCondition::new(
                kind.clone(),
                Some(now - SignedDuration::from_mins(minutes_ago)),
            )
        })
        .collect()
}

/// Status store holding one history for the default cluster.
pub fn cluster_status(kinds: &[ConditionKind]) -> InMemoryClusterStatus {
    InMemoryClusterStatus::new().with_cluster(CLUSTER_ID, history(kinds))
}

/// Validator over clones of the given stores. Clones share read counters, so
/// the originals can be used to assert reads.
pub fn validator(
    catalog: &InMemoryReleaseCatalog,
    status: &InMemoryClusterStatus,
) -> TransitionValidator {
    TransitionValidator::new(Arc::new(catalog.clone()), Arc::new(status.clone()))
}
