//! Cluster lifecycle status access.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::StoreError;
use crate::lifecycle::ConditionHistory;

/// Identifies the cluster a validation is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    /// Namespace the cluster's resources live in (`None` for cluster-wide lookup)
    pub namespace: Option<String>,
    /// Cluster ID shared by all resources of the cluster
    pub cluster_id: String,
}

impl ClusterKey {
    pub fn new(namespace: Option<&str>, cluster_id: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            cluster_id: cluster_id.to_string(),
        }
    }
}

impl std::fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.cluster_id),
            None => write!(f, "{}", self.cluster_id),
        }
    }
}

/// Read access to cluster lifecycle status.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterStatusSource: Send + Sync {
    /// Fetch the cluster's lifecycle history, most recent transition first.
    async fn cluster_conditions(&self, cluster: &ClusterKey)
    -> Result<ConditionHistory, StoreError>;
}
