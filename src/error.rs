//! Error types for transition validation.
//!
//! Validation has two kinds of non-success outcome and they never mix:
//! - `Rejection`: the request broke a rule (or carried malformed input). This
//!   is an expected outcome and its message is shown to the requester.
//! - A dependency fault: a store read failed, so no rule could be evaluated.
//!   The admission layer decides what to do with it.

use thiserror::Error;

use crate::lifecycle::ConditionKind;
use crate::stores::StoreError;
use crate::version::{ReleaseVersion, VersionParseError};

/// A request that failed validation, with the rule that rejected it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A snapshot has no release version label
    #[error("{which} object has no release version label '{label}'")]
    MissingReleaseVersion { which: Snapshot, label: String },

    /// A snapshot's release version label is not a version
    #[error("{which} release version label is malformed: {source}")]
    MalformedReleaseVersion {
        which: Snapshot,
        #[source]
        source: VersionParseError,
    },

    /// The cluster a version change applies to cannot be identified
    #[error("cannot identify the cluster: no '{label}' label and no object name")]
    MissingClusterId { label: String },

    /// The target release is not in the catalog
    #[error("target release {release} does not exist")]
    ReleaseNotFound { release: String },

    /// The target release exists but cannot be upgraded to
    #[error("target release {release} is not active (state: {state})")]
    ReleaseNotActive { release: String, state: String },

    /// The major version would regress or skip a generation
    #[error(
        "major version change from {from} to {to} is not allowed: major version must \
         advance by exactly one, or stay within the current major"
    )]
    InvalidMajorVersionChange {
        from: ReleaseVersion,
        to: ReleaseVersion,
    },

    /// The cluster is still transitioning
    #[error("cluster {cluster} has a transition in progress (latest condition: {condition})")]
    TransitionInProgress {
        cluster: String,
        condition: ConditionKind,
    },
}

impl Rejection {
    /// Machine-readable reason code, stable across message wording changes.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::MissingReleaseVersion { .. } => "MissingReleaseVersion",
            Rejection::MalformedReleaseVersion { .. } => "MalformedReleaseVersion",
            Rejection::MissingClusterId { .. } => "MissingClusterId",
            Rejection::ReleaseNotFound { .. } => "ReleaseNotFound",
            Rejection::ReleaseNotActive { .. } => "ReleaseNotActive",
            Rejection::InvalidMajorVersionChange { .. } => "InvalidMajorVersionChange",
            Rejection::TransitionInProgress { .. } => "TransitionInProgress",
        }
    }
}

/// Which side of an UPDATE a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Old,
    New,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Snapshot::Old => write!(f, "old"),
            Snapshot::New => write!(f, "new"),
        }
    }
}

/// Error type for validation entry points
#[derive(Error, Debug)]
pub enum Error {
    /// The request was evaluated and rejected
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The release catalog could not be read
    #[error("release catalog unavailable: {0}")]
    CatalogUnavailable(#[source] StoreError),

    /// The cluster status could not be read
    #[error("cluster status unavailable: {0}")]
    StatusUnavailable(#[source] StoreError),
}

impl Error {
    /// Check if this is a policy or input rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected(_))
    }

    /// Check if a dependency failed before a decision could be made
    pub fn is_dependency_fault(&self) -> bool {
        matches!(
            self,
            Error::CatalogUnavailable(_) | Error::StatusUnavailable(_)
        )
    }

    /// The rejection, if this error is one
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Result type alias for validation entry points
pub type Result<T> = std::result::Result<T, Error>;
