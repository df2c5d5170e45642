//! Release Custom Resource Definition.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Release describes a deployable release version and where it is in its
/// lifecycle. Releases are cluster-scoped and named after their version.
///
/// Example:
/// ```yaml
/// apiVersion: release.giantswarm.io/v1alpha1
/// kind: Release
/// metadata:
///   name: v14.1.0
/// spec:
///   state: active
///   date: "2021-01-20T12:00:00Z"
///   components:
///     - name: kubernetes
///       version: 1.19.6
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "release.giantswarm.io",
    version = "v1alpha1",
    kind = "Release",
    plural = "releases",
    printcolumn = r#"{"name":"State", "type":"string", "jsonPath":".spec.state"}"#,
    printcolumn = r#"{"name":"Release Date", "type":"string", "jsonPath":".spec.date"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    /// Lifecycle state of the release.
    #[serde(default)]
    pub state: ReleaseState,

    /// Date the release was published (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Components shipped with this release.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ReleaseComponent>,
}

/// A versioned component of a release.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ReleaseComponent {
    pub name: String,
    pub version: String,
}

/// Lifecycle state of a release.
///
/// Only `Active` releases are valid upgrade targets. Unrecognized states
/// deserialize to `Unknown` so a newer catalog never breaks admission.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseState {
    Active,
    Deprecated,
    Wip,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReleaseState {
    pub fn is_active(&self) -> bool {
        matches!(self, ReleaseState::Active)
    }
}

impl std::fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseState::Active => write!(f, "active"),
            ReleaseState::Deprecated => write!(f, "deprecated"),
            ReleaseState::Wip => write!(f, "wip"),
            ReleaseState::Deleted => write!(f, "deleted"),
            ReleaseState::Unknown => write!(f, "unknown"),
        }
    }
}

impl Release {
    /// Build a release entry with the given name and state.
    pub fn with_state(name: &str, state: ReleaseState) -> Self {
        Release::new(
            name,
            ReleaseSpec {
                state,
                ..Default::default()
            },
        )
    }
}
