//! Custom Resource Definitions read by the admission webhook.
//!
//! - `Release`: catalog entry describing a release version and its lifecycle state
//! - `AwsCluster`: infrastructure cluster carrying the lifecycle condition history
//!
//! Both are owned by other controllers; this crate only reads them.

mod aws_cluster;
mod release;

pub use aws_cluster::*;
pub use release::*;

/// Label carrying the release version of a cluster resource (without `v` prefix)
pub const RELEASE_VERSION_LABEL: &str = "release.giantswarm.io/version";

/// Label carrying the cluster ID shared by all resources of one cluster
pub const CLUSTER_ID_LABEL: &str = "giantswarm.io/cluster";
