//! Validation policies for cluster release transitions.
//!
//! Policies run in order and the first rejection wins:
//! - Release version (`release_version`): target must be an active release
//!   reachable by the major-step rule
//! - Cluster status (`cluster_status`): only when the version changes, the
//!   cluster must not be mid-transition
//!
//! Each call reads at most one release and one condition history. Nothing is
//! cached between calls, so a single `TransitionValidator` can serve any
//! number of concurrent requests.

pub mod cluster_status;
pub mod release_version;

use std::collections::BTreeMap;
use std::sync::Arc;

use kube::Resource;
use tracing::debug;

use crate::crd::{CLUSTER_ID_LABEL, RELEASE_VERSION_LABEL};
use crate::error::{Rejection, Result, Snapshot};
use crate::stores::{ClusterKey, ClusterStatusSource, ReleaseCatalog};
use crate::version::ReleaseVersion;

/// Read-only copy of the fields of a cluster object validation looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSnapshot {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
}

impl ClusterSnapshot {
    /// Snapshot any Kubernetes object.
    pub fn from_resource<K: Resource>(resource: &K) -> Self {
        let meta = resource.meta();
        Self {
            name: meta.name.clone(),
            namespace: meta.namespace.clone(),
            labels: meta.labels.clone().unwrap_or_default(),
        }
    }

    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_release_version(self, version: &str) -> Self {
        self.with_label(RELEASE_VERSION_LABEL, version)
    }

    /// Raw release version label, if set.
    pub fn release_version_label(&self) -> Option<&str> {
        self.labels.get(RELEASE_VERSION_LABEL).map(String::as_str)
    }

    /// Parse the release version label. Absent or malformed labels are
    /// rejections, not errors.
    pub fn release_version(&self, which: Snapshot) -> std::result::Result<ReleaseVersion, Rejection> {
        let label = self
            .release_version_label()
            .ok_or_else(|| Rejection::MissingReleaseVersion {
                which,
                label: RELEASE_VERSION_LABEL.to_string(),
            })?;

        ReleaseVersion::parse(label)
            .map_err(|source| Rejection::MalformedReleaseVersion { which, source })
    }

    /// Key of the cluster this object belongs to: the cluster ID label, or
    /// the object name when the label is missing.
    pub fn cluster_key(&self) -> std::result::Result<ClusterKey, Rejection> {
        let cluster_id = self
            .labels
            .get(CLUSTER_ID_LABEL)
            .filter(|id| !id.is_empty())
            .or(self.name.as_ref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Rejection::MissingClusterId {
                label: CLUSTER_ID_LABEL.to_string(),
            })?;

        Ok(ClusterKey::new(self.namespace.as_deref(), cluster_id))
    }
}

/// Parse both release version labels of an UPDATE.
fn parse_versions(
    old: &ClusterSnapshot,
    new: &ClusterSnapshot,
) -> std::result::Result<(ReleaseVersion, ReleaseVersion), Rejection> {
    Ok((
        old.release_version(Snapshot::Old)?,
        new.release_version(Snapshot::New)?,
    ))
}

/// Validates cluster release transitions against the catalog and the
/// cluster's lifecycle status.
#[derive(Clone)]
pub struct TransitionValidator {
    catalog: Arc<dyn ReleaseCatalog>,
    status: Arc<dyn ClusterStatusSource>,
}

impl TransitionValidator {
    pub fn new(catalog: Arc<dyn ReleaseCatalog>, status: Arc<dyn ClusterStatusSource>) -> Self {
        Self { catalog, status }
    }

    /// Check the release version change alone.
    pub async fn release_version_valid(
        &self,
        old: &ClusterSnapshot,
        new: &ClusterSnapshot,
    ) -> Result<()> {
        let (old_version, new_version) = parse_versions(old, new)?;
        release_version::validate(self.catalog.as_ref(), &old_version, &new_version).await
    }

    /// Check the cluster is stable enough for a release version change.
    /// Accepts without reading status when the version is unchanged.
    pub async fn cluster_status_valid(
        &self,
        old: &ClusterSnapshot,
        new: &ClusterSnapshot,
    ) -> Result<()> {
        let (old_version, new_version) = parse_versions(old, new)?;
        if old_version == new_version {
            return Ok(());
        }
        self.check_stability(new).await
    }

    /// Full transition check: release version policy, then cluster stability
    /// if the version changes.
    pub async fn validate(&self, old: &ClusterSnapshot, new: &ClusterSnapshot) -> Result<()> {
        let (old_version, new_version) = parse_versions(old, new)?;

        release_version::validate(self.catalog.as_ref(), &old_version, &new_version).await?;

        if old_version == new_version {
            return Ok(());
        }

        self.check_stability(new).await?;

        debug!(old = %old_version, new = %new_version, "Cluster release transition allowed");
        Ok(())
    }

    async fn check_stability(&self, new: &ClusterSnapshot) -> Result<()> {
        let cluster = new.cluster_key()?;
        cluster_status::validate(self.status.as_ref(), &cluster).await
    }
}
