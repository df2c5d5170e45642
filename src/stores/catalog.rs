//! Release catalog access.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::debug;

use super::StoreError;
use crate::crd::{Release, ReleaseState};
use crate::error::{Error, Result};
use crate::version::ReleaseVersion;

/// Read access to the release catalog.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseCatalog: Send + Sync {
    /// Fetch a release by name (`v3.2.1`). `Ok(None)` when no such release exists.
    async fn get_release(&self, name: &str) -> std::result::Result<Option<Release>, StoreError>;
}

/// Outcome of resolving a version against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseLookup {
    Found(ReleaseState),
    NotFound,
}

/// Resolve a release version to its lifecycle state.
///
/// Performs exactly one catalog read. A failed read is reported as
/// `Error::CatalogUnavailable`, never as `NotFound`.
pub async fn lookup_release<C>(catalog: &C, version: &ReleaseVersion) -> Result<ReleaseLookup>
where
    C: ReleaseCatalog + ?Sized,
{
    let name = version.release_name();
    let release = catalog
        .get_release(&name)
        .await
        .map_err(Error::CatalogUnavailable)?;

    let lookup = match release {
        Some(release) => ReleaseLookup::Found(release.spec.state),
        None => ReleaseLookup::NotFound,
    };
    debug!(release = %name, lookup = ?lookup, "Resolved release");
    Ok(lookup)
}
