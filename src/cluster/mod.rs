//! Call-site wiring for the two resolution domains.
//!
//! The control plane and the node-pool machine images share the resolution
//! algorithm verbatim; they differ only in how the catalog and the "current"
//! version are scoped:
//!
//! - the control plane resolves against the full catalog, with the current
//!   version taken from the entity's last observed state as a whole;
//! - each machine image resolves against the catalog pre-filtered to the
//!   pool's configured OS family, with the current version looked up
//!   independently per named pool — a newly added or renamed pool has no
//!   current version even though the parent cluster already exists.

use crate::catalog::VersionCatalog;
use crate::error::Result;
use crate::resolver::{ResolutionResult, resolve};
use crate::version::{Version, VersionConstraint};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Machine-image configuration of one node pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePoolSpec {
    /// Pool name; the key under which prior state is looked up
    pub name: String,
    /// Configured OS family of the pool's machine image
    pub image_family: String,
    /// User constraint on the image version
    pub image_constraint: VersionConstraint,
}

impl NodePoolSpec {
    /// Create a pool spec.
    pub fn new(
        name: impl Into<String>,
        image_family: impl Into<String>,
        image_constraint: VersionConstraint,
    ) -> Self {
        Self {
            name: name.into(),
            image_family: image_family.into(),
            image_constraint,
        }
    }
}

/// The machine image a pool was last observed running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedImage {
    /// OS family of the observed image
    pub family: String,
    /// Observed image version
    pub version: Version,
}

impl ObservedImage {
    /// Create an observed image.
    pub fn new(family: impl Into<String>, version: Version) -> Self {
        Self {
            family: family.into(),
            version,
        }
    }
}

/// Resolve the control-plane Kubernetes version.
///
/// `current` is the version the cluster was last observed running, absent on
/// first creation.
pub fn resolve_kubernetes_version(
    catalog: &VersionCatalog,
    constraint: &VersionConstraint,
    current: Option<Version>,
) -> Result<ResolutionResult> {
    resolve(catalog, constraint, current)
}

/// Resolve the machine-image version for one node pool.
///
/// The catalog is pre-filtered to the pool's configured OS family. An
/// observed image whose family differs from the configured one is discarded:
/// version numbers are not comparable across families, so after an OS rename
/// the pool resolves as if freshly created.
pub fn resolve_machine_image(
    catalog: &VersionCatalog,
    pool: &NodePoolSpec,
    observed: Option<&ObservedImage>,
) -> Result<ResolutionResult> {
    let current = match observed {
        Some(image) if image.family == pool.image_family => Some(image.version),
        Some(image) => {
            debug!(
                "pool {}: observed image family {} differs from configured {}, treating as fresh",
                pool.name, image.family, pool.image_family
            );
            None
        }
        None => None,
    };

    let family_catalog = catalog.filter_family(&pool.image_family);
    resolve(&family_catalog, &pool.image_constraint, current)
}

/// Resolve the machine image of every pool, keyed by pool name.
///
/// Each pool resolves independently; one pool failing does not affect the
/// others, and there is no partial success within a single pool.
pub fn resolve_machine_images(
    catalog: &VersionCatalog,
    pools: &[NodePoolSpec],
    observed: &BTreeMap<String, ObservedImage>,
) -> BTreeMap<String, Result<ResolutionResult>> {
    pools
        .iter()
        .map(|pool| {
            let result = resolve_machine_image(catalog, pool, observed.get(&pool.name));
            (pool.name.clone(), result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LifecycleState, VersionRecord};
    use crate::error::ResolveError;

    fn v(major: u64, minor: u64, patch: u64) -> Version {
        Version::new(major, minor, patch)
    }

    fn image_catalog() -> VersionCatalog {
        VersionCatalog::new(vec![
            VersionRecord::with_family("flatcar", v(3815, 2, 0), LifecycleState::Supported),
            VersionRecord::with_family("flatcar", v(3815, 2, 5), LifecycleState::Supported),
            VersionRecord::with_family("ubuntu", v(22, 4, 0), LifecycleState::Supported),
            VersionRecord::with_family("ubuntu", v(24, 4, 0), LifecycleState::Preview),
        ])
    }

    #[test]
    fn test_control_plane_uses_unfiltered_catalog() {
        let catalog = VersionCatalog::new(vec![
            VersionRecord::new(v(1, 25, 0), LifecycleState::Supported),
            VersionRecord::new(v(1, 26, 0), LifecycleState::Supported),
        ]);
        let result =
            resolve_kubernetes_version(&catalog, &VersionConstraint::Unset, None).unwrap();
        assert_eq!(result.version, v(1, 26, 0));
    }

    #[test]
    fn test_machine_image_filters_by_family() {
        let result = resolve_machine_image(
            &image_catalog(),
            &NodePoolSpec::new("workers", "flatcar", VersionConstraint::Unset),
            None,
        )
        .unwrap();
        assert_eq!(result.version, v(3815, 2, 5));
    }

    #[test]
    fn test_machine_image_unknown_family_is_empty_catalog() {
        let result = resolve_machine_image(
            &image_catalog(),
            &NodePoolSpec::new("workers", "debian", VersionConstraint::Unset),
            None,
        );
        assert_eq!(result, Err(ResolveError::NoAvailableVersions));
    }

    #[test]
    fn test_machine_image_family_mismatch_resets_current() {
        // Pool renamed its OS from ubuntu to flatcar; the observed ubuntu
        // version must not act as a floor for flatcar numbers.
        let observed = ObservedImage::new("ubuntu", v(22, 4, 0));
        let result = resolve_machine_image(
            &image_catalog(),
            &NodePoolSpec::new("workers", "flatcar", VersionConstraint::Unset),
            Some(&observed),
        )
        .unwrap();
        assert_eq!(result.version, v(3815, 2, 5));
    }

    #[test]
    fn test_machine_image_same_family_keeps_current() {
        let observed = ObservedImage::new("flatcar", v(3815, 2, 0));
        let result = resolve_machine_image(
            &image_catalog(),
            &NodePoolSpec::new(
                "workers",
                "flatcar",
                VersionConstraint::Full(v(3815, 2, 0)),
            ),
            Some(&observed),
        )
        .unwrap();
        assert_eq!(result.version, v(3815, 2, 0));
    }

    #[test]
    fn test_pools_resolve_independently() {
        let pools = vec![
            NodePoolSpec::new("old-pool", "flatcar", VersionConstraint::Unset),
            NodePoolSpec::new("new-pool", "flatcar", VersionConstraint::Unset),
            NodePoolSpec::new("broken-pool", "debian", VersionConstraint::Unset),
        ];
        let mut observed = BTreeMap::new();
        observed.insert(
            "old-pool".to_string(),
            ObservedImage::new("flatcar", v(3815, 2, 0)),
        );

        let results = resolve_machine_images(&image_catalog(), &pools, &observed);

        // old-pool re-validates its running image, new-pool defaults to the
        // latest supported, broken-pool fails alone.
        assert_eq!(
            results["old-pool"].as_ref().unwrap().version,
            v(3815, 2, 0)
        );
        assert_eq!(
            results["new-pool"].as_ref().unwrap().version,
            v(3815, 2, 5)
        );
        assert_eq!(
            results["broken-pool"],
            Err(ResolveError::NoAvailableVersions)
        );
    }
}
