//! Cluster stability policy.
//!
//! Enforced only when the release version changes:
//! - The cluster's most recent lifecycle condition must not be a transition
//!   in progress (Creating, Updating, Deleting)
//!
//! A cluster with no recorded conditions is treated as stable.

use tracing::debug;

use crate::error::{Error, Rejection, Result};
use crate::lifecycle::ConditionHistory;
use crate::stores::{ClusterKey, ClusterStatusSource};

/// Read the cluster's lifecycle history and check it is stable.
pub async fn validate<S>(source: &S, cluster: &ClusterKey) -> Result<()>
where
    S: ClusterStatusSource + ?Sized,
{
    let history = source
        .cluster_conditions(cluster)
        .await
        .map_err(Error::StatusUnavailable)?;

    evaluate(cluster, &history)?;
    Ok(())
}

/// Check that no transition is in progress according to `history`.
pub fn evaluate(
    cluster: &ClusterKey,
    history: &ConditionHistory,
) -> std::result::Result<(), Rejection> {
    let Some(latest) = history.latest() else {
        debug!(cluster = %cluster, "No lifecycle conditions recorded, treating as stable");
        return Ok(());
    };

    if latest.kind.is_transient() {
        return Err(Rejection::TransitionInProgress {
            cluster: cluster.to_string(),
            condition: latest.kind.clone(),
        });
    }

    debug!(cluster = %cluster, condition = %latest.kind, "Cluster is stable");
    Ok(())
}
