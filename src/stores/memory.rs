//! In-memory stores.
//!
//! Fixed snapshots of a catalog and of cluster histories, with read counters
//! so callers can assert how many reads a validation performed.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ClusterKey, ClusterStatusSource, ReleaseCatalog, StoreError};
use crate::crd::{Release, ReleaseState};
use crate::lifecycle::ConditionHistory;

/// Release catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReleaseCatalog {
    releases: HashMap<String, Release>,
    unavailable: bool,
    reads: Arc<AtomicUsize>,
}

impl InMemoryReleaseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog whose every read fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Add a release named `name` (e.g. `v3.2.1`) in the given state.
    pub fn with_release(mut self, name: &str, state: ReleaseState) -> Self {
        self.releases
            .insert(name.to_string(), Release::with_state(name, state));
        self
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseCatalog for InMemoryReleaseCatalog {
    async fn get_release(&self, name: &str) -> Result<Option<Release>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(StoreError::Backend("release catalog offline".to_string()));
        }
        Ok(self.releases.get(name).cloned())
    }
}

/// Cluster lifecycle histories held in memory, keyed by cluster ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClusterStatus {
    clusters: HashMap<String, ConditionHistory>,
    unavailable: bool,
    reads: Arc<AtomicUsize>,
}

impl InMemoryClusterStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A status store whose every read fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_cluster(mut self, cluster_id: &str, history: impl Into<ConditionHistory>) -> Self {
        self.clusters.insert(cluster_id.to_string(), history.into());
        self
    }

    /// Number of reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterStatusSource for InMemoryClusterStatus {
    async fn cluster_conditions(&self, cluster: &ClusterKey) -> Result<ConditionHistory, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(StoreError::Backend("cluster status offline".to_string()));
        }
        self.clusters
            .get(&cluster.cluster_id)
            .cloned()
            .ok_or_else(|| StoreError::ClusterNotFound(cluster.to_string()))
    }
}
