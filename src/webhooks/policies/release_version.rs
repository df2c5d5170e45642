//! Release version transition policy.
//!
//! Enforced on every release version change:
//! - The target release must exist in the catalog and be active
//! - The major version may stay the same (any minor/patch move, including
//!   rollback) or advance by exactly one
//!
//! An unchanged version is always accepted without consulting the catalog, so
//! a cluster on a release that has since been deprecated or removed can still
//! be reconciled.

use tracing::debug;

use crate::error::{Rejection, Result};
use crate::stores::{ReleaseCatalog, ReleaseLookup, lookup_release};
use crate::version::ReleaseVersion;

/// Validate a release version transition, reading the catalog if needed.
pub async fn validate<C>(catalog: &C, old: &ReleaseVersion, new: &ReleaseVersion) -> Result<()>
where
    C: ReleaseCatalog + ?Sized,
{
    if old == new {
        debug!(version = %old, "Release version unchanged");
        return Ok(());
    }

    let lookup = lookup_release(catalog, new).await?;
    evaluate(old, new, lookup)?;

    debug!(old = %old, new = %new, "Release version transition allowed");
    Ok(())
}

/// Apply the transition rules to an already resolved target release.
pub fn evaluate(
    old: &ReleaseVersion,
    new: &ReleaseVersion,
    target: ReleaseLookup,
) -> std::result::Result<(), Rejection> {
    if old == new {
        return Ok(());
    }

    match target {
        ReleaseLookup::NotFound => {
            return Err(Rejection::ReleaseNotFound {
                release: new.release_name(),
            });
        }
        ReleaseLookup::Found(state) if !state.is_active() => {
            return Err(Rejection::ReleaseNotActive {
                release: new.release_name(),
                state: state.to_string(),
            });
        }
        ReleaseLookup::Found(_) => {}
    }

    check_major_step(old, new)
}

/// Check that the major version stays put or advances by exactly one.
pub fn check_major_step(
    old: &ReleaseVersion,
    new: &ReleaseVersion,
) -> std::result::Result<(), Rejection> {
    match old.major_delta(new) {
        0 | 1 => Ok(()),
        _ => Err(Rejection::InvalidMajorVersionChange {
            from: *old,
            to: *new,
        }),
    }
}
