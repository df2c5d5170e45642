//! Kubernetes-backed stores.
//!
//! Every read is bounded by a deadline so a slow API server surfaces as
//! `StoreError::DeadlineExceeded` instead of holding the admission request
//! open until the API server's own webhook timeout fires.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client};
use tracing::{debug, warn};

use super::{ClusterKey, ClusterStatusSource, ReleaseCatalog, StoreError};
use crate::crd::{AwsCluster, CLUSTER_ID_LABEL, Release};
use crate::lifecycle::{ConditionHistory, LifecycleCondition};
use crate::scoped_api;

/// Default deadline for a single store read
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

async fn with_deadline<T, F>(deadline: Duration, read: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, kube::Error>>,
{
    match tokio::time::timeout(deadline, read).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::DeadlineExceeded),
    }
}

/// Release catalog read from cluster-scoped `Release` resources.
#[derive(Clone)]
pub struct KubeReleaseCatalog {
    api: Api<Release>,
    read_timeout: Duration,
}

impl KubeReleaseCatalog {
    pub fn new(client: Client, read_timeout: Duration) -> Self {
        Self {
            api: Api::all(client),
            read_timeout,
        }
    }
}

#[async_trait]
impl ReleaseCatalog for KubeReleaseCatalog {
    async fn get_release(&self, name: &str) -> Result<Option<Release>, StoreError> {
        debug!(release = %name, "Fetching release");
        with_deadline(self.read_timeout, self.api.get_opt(name)).await
    }
}

/// Cluster status read from the cluster's `AWSCluster` resource.
#[derive(Clone)]
pub struct KubeClusterStatus {
    client: Client,
    read_timeout: Duration,
}

impl KubeClusterStatus {
    pub fn new(client: Client, read_timeout: Duration) -> Self {
        Self {
            client,
            read_timeout,
        }
    }
}

#[async_trait]
impl ClusterStatusSource for KubeClusterStatus {
    async fn cluster_conditions(&self, cluster: &ClusterKey) -> Result<ConditionHistory, StoreError> {
        let api: Api<AwsCluster> = scoped_api(self.client.clone(), cluster.namespace.as_deref());
        let params =
            ListParams::default().labels(&format!("{}={}", CLUSTER_ID_LABEL, cluster.cluster_id));

        debug!(cluster = %cluster, "Fetching cluster conditions");
        let list = with_deadline(self.read_timeout, api.list(&params)).await?;

        if list.items.len() > 1 {
            warn!(
                cluster = %cluster,
                count = list.items.len(),
                "Multiple AWSCluster objects match cluster ID, using the first"
            );
        }

        let Some(aws_cluster) = list.items.into_iter().next() else {
            return Err(StoreError::ClusterNotFound(cluster.to_string()));
        };

        let history: ConditionHistory = aws_cluster
            .conditions()
            .iter()
            .map(LifecycleCondition::from)
            .collect();

        if !history.is_most_recent_first() {
            warn!(
                cluster = %cluster,
                "Cluster conditions are not ordered most recent first"
            );
        }

        Ok(history)
    }
}
