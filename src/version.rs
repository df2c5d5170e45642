//! Release version model.
//!
//! A release version is a plain `major.minor.patch` triple. Labels on cluster
//! resources carry the bare triple (`3.2.1`), release catalog entries are
//! named with a `v` prefix (`v3.2.1`). Pre-release and build metadata are not
//! part of a release identifier and are rejected.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use thiserror::Error;

/// Errors returned when a string is not a release version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// The input was empty (or only a `v` prefix)
    #[error("release version is empty")]
    Empty,

    /// The input is not three dot-separated non-negative integers
    #[error("'{input}' is not a major.minor.patch version: {detail}")]
    Invalid { input: String, detail: String },

    /// The input carries pre-release or build metadata
    #[error("'{input}' carries pre-release or build metadata, which releases never have")]
    Qualified { input: String },
}

/// A `major.minor.patch` release version.
///
/// Ordering is lexicographic on `(major, minor, patch)`, which the field order
/// of the derive gives us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ReleaseVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release version, accepting an optional leading `v`.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let bare = input.strip_prefix('v').unwrap_or(input);
        if bare.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let parsed = Version::parse(bare).map_err(|e| VersionParseError::Invalid {
            input: input.to_string(),
            detail: e.to_string(),
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(VersionParseError::Qualified {
                input: input.to_string(),
            });
        }

        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Signed number of major versions from `self` to `target`.
    ///
    /// Positive when `target` is a later major, negative when earlier.
    pub fn major_delta(&self, target: &ReleaseVersion) -> i128 {
        i128::from(target.major) - i128::from(self.major)
    }

    /// Name of the catalog entry describing this version (`v3.2.1`).
    pub fn release_name(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ReleaseVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
