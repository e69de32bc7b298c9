//! # Cluster Version Resolver
//!
//! Version-resolution policy for provisioning and upgrading a managed
//! Kubernetes cluster: decides which concrete version of a platform
//! component to request, given a user constraint (exact or partial), a
//! catalog of available versions tagged with lifecycle state, and a
//! no-silent-downgrade guarantee.
//!
//! ## Features
//!
//! - **Constraint Classification**: `X.Y.Z` exact pins and `X.Y` minor lines
//! - **Lifecycle Awareness**: supported/preview/deprecated eligibility rules
//! - **No-Downgrade Guarantee**: a stale floor never forces a downgrade
//! - **Dual Domains**: control-plane versions and per-pool machine images
//!   share one algorithm
//!
//! ## Example
//!
//! ```rust
//! use cluster_version_resolver::{
//!     resolve, LifecycleState, Version, VersionCatalog, VersionConstraint, VersionRecord,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = VersionCatalog::new(vec![
//!     VersionRecord::new(Version::new(1, 25, 0), LifecycleState::Supported),
//!     VersionRecord::new(Version::new(1, 25, 1), LifecycleState::Supported),
//!     VersionRecord::new(Version::new(1, 26, 0), LifecycleState::Preview),
//! ]);
//!
//! let constraint = VersionConstraint::parse("1.25")?;
//! let resolved = resolve(&catalog, &constraint, None)?;
//! assert_eq!(resolved.version, Version::new(1, 25, 1));
//! assert!(!resolved.deprecated);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cluster;
pub mod error;
pub mod resolver;
pub mod version;

// Re-export commonly used types and functions
pub use catalog::{LifecycleState, VersionCatalog, VersionRecord};
pub use cluster::{
    NodePoolSpec, ObservedImage, resolve_kubernetes_version, resolve_machine_image,
    resolve_machine_images,
};
pub use error::{ResolveError, Result};
pub use resolver::{ResolutionResult, resolve};
pub use version::{Version, VersionConstraint};

/// The current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
