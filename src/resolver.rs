//! The core resolution algorithm.
//!
//! Given a catalog, a user constraint and the entity's currently active
//! version, [`resolve`] decides the concrete version to place into the
//! outgoing provisioning request. It is a pure, synchronous function: no
//! I/O, no caching, no retries — every failure is a caller-input condition.
//!
//! The same algorithm serves both the control-plane and the machine-image
//! domains; the [`crate::cluster`] module wires it to each call site.

use crate::catalog::{LifecycleState, VersionCatalog, VersionRecord};
use crate::error::{ResolveError, Result};
use crate::version::{Version, VersionConstraint};
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// The concrete version to request
    pub version: Version,
    /// Whether the selected catalog record is in the `deprecated` state;
    /// callers surface this as a user-facing warning
    pub deprecated: bool,
}

/// Resolve a version constraint against a catalog.
///
/// - `Unset` with no current version defaults to the latest `Supported`
///   record (`Preview` and `Deprecated` both excluded).
/// - `Unset` with a current version re-validates the running version instead
///   of silently drifting.
/// - `Full` constraints are exact pins and match records in any lifecycle
///   state, `Preview` included: an operator pinning an exact version may
///   deliberately want a preview build. Flagged for product confirmation but
///   preserved as observed behavior.
/// - `Partial` constraints select the greatest patch of the named minor line
///   among non-`Preview` records.
/// - A floor below the currently active version is replaced by the current
///   version: the resolved version for an entity is never lower than what
///   the entity already runs (the no-downgrade guarantee).
pub fn resolve(
    catalog: &VersionCatalog,
    constraint: &VersionConstraint,
    current: Option<Version>,
) -> Result<ResolutionResult> {
    if catalog.is_empty() {
        return Err(ResolveError::NoAvailableVersions);
    }

    // Effective floor: an unconstrained resolve on an existing entity
    // re-validates the running version rather than drifting to latest.
    let floor = match (constraint, current) {
        (VersionConstraint::Unset, None) => {
            let record = catalog
                .latest_supported()
                .ok_or(ResolveError::NoSupportedVersion)?;
            debug!("no constraint and no current version, defaulting to latest supported {}", record.version);
            return Ok(ResolutionResult {
                version: record.version,
                deprecated: false,
            });
        }
        (VersionConstraint::Unset, Some(cur)) => VersionConstraint::Full(cur),
        (explicit, _) => *explicit,
    };

    // Downgrade guard: a stale floor left in configuration after the
    // platform already upgraded the entity must not force a downgrade.
    let floor = match (floor, current) {
        (VersionConstraint::Full(v), Some(cur)) if v < cur => {
            debug!("constraint {} is below current version {}, keeping current", v, cur);
            VersionConstraint::Full(cur)
        }
        (VersionConstraint::Partial { major, minor }, Some(cur))
            if (major, minor) < (cur.major, cur.minor) =>
        {
            debug!("constraint {}.{} is below current version {}, keeping current", major, minor, cur);
            VersionConstraint::Full(cur)
        }
        (floor, _) => floor,
    };

    let selected = match_floor(catalog, &floor)?;

    // A partial match within the current minor line can still land below the
    // running patch; the guard applies to the resolved value as well.
    let selected = match current {
        Some(cur) if selected.version < cur => {
            debug!("matched {} is below current version {}, re-resolving at current", selected.version, cur);
            match_floor(catalog, &VersionConstraint::Full(cur))?
        }
        _ => selected,
    };

    debug!("resolved {} to {} ({})", floor, selected.version, selected.state);
    Ok(ResolutionResult {
        version: selected.version,
        deprecated: selected.state == LifecycleState::Deprecated,
    })
}

/// Match an explicit floor against the catalog.
///
/// `Full` takes the first record (catalog order) with the exact version, in
/// any lifecycle state. `Partial` takes the greatest patch of the minor line
/// among non-`Preview` records.
fn match_floor<'a>(
    catalog: &'a VersionCatalog,
    floor: &VersionConstraint,
) -> Result<&'a VersionRecord> {
    let found = match floor {
        VersionConstraint::Full(v) => catalog.records().iter().find(|r| r.version == *v),
        VersionConstraint::Partial { major, minor } => catalog
            .records()
            .iter()
            .filter(|r| {
                r.version.major == *major
                    && r.version.minor == *minor
                    && r.state != LifecycleState::Preview
            })
            .max_by_key(|r| r.version.patch),
        VersionConstraint::Unset => unreachable!("unset constraints are substituted before matching"),
    };

    found.ok_or_else(|| ResolveError::VersionNotAvailable {
        requested: floor.to_string(),
        available: catalog.version_strings(),
    })
}
