//! AWSCluster Custom Resource Definition.
//!
//! Only the parts of the infrastructure cluster this webhook reads are
//! modelled: identifying spec fields and the lifecycle condition history.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// AWSCluster is the provider-specific infrastructure object of a workload
/// cluster. Its status records every lifecycle transition, most recent first.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "infrastructure.giantswarm.io",
    version = "v1alpha2",
    kind = "AWSCluster",
    root = "AwsCluster",
    plural = "awsclusters",
    status = "AwsClusterStatus",
    namespaced,
    printcolumn = r#"{"name":"Condition", "type":"string", "jsonPath":".status.cluster.conditions[0].condition"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AwsClusterSpec {
    /// Cluster-level settings.
    #[serde(default)]
    pub cluster: AwsClusterSpecCluster,

    /// Provider-level settings.
    #[serde(default)]
    pub provider: AwsClusterSpecProvider,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsClusterSpecCluster {
    /// User-friendly description of the cluster.
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsClusterSpecProvider {
    /// AWS region the cluster runs in.
    #[serde(default)]
    pub region: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsClusterStatus {
    #[serde(default)]
    pub cluster: CommonClusterStatus,
}

/// Provider-independent cluster status.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonClusterStatus {
    /// Lifecycle transitions, most recent first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ClusterStatusCondition>,

    /// Release version the cluster currently runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_version: Option<String>,
}

/// One lifecycle transition of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatusCondition {
    /// Condition kind, e.g. "Creating", "Created", "Updating", "Updated".
    pub condition: String,

    /// When the transition happened (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl AwsCluster {
    /// Condition history as stored, most recent first. Empty when the
    /// status has not been written yet.
    pub fn conditions(&self) -> &[ClusterStatusCondition] {
        self.status
            .as_ref()
            .map(|s| s.cluster.conditions.as_slice())
            .unwrap_or_default()
    }
}
