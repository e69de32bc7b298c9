//! Error types for version resolution
//!
//! Every failure here is a caller-input condition, not a transient fault:
//! the resolver never retries and never falls back silently.

use thiserror::Error;

/// Errors that can occur while resolving a cluster or machine-image version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The constraint string is neither `X.Y` nor `X.Y.Z`
    #[error("invalid version format: {input:?} (expected `X.Y` or `X.Y.Z`)")]
    InvalidVersionFormat {
        /// The rejected input string
        input: String,
    },

    /// Both mutually exclusive version fields were set in the configuration.
    /// Only produced at the configuration boundary, never by `resolve` itself.
    #[error("conflicting version fields: set either the exact version or the minimum version, not both")]
    ConflictingVersionFields,

    /// The catalog is empty, possibly after filtering to one image family
    #[error("no available versions in the catalog")]
    NoAvailableVersions,

    /// An unconstrained default-latest was requested but no record is in the
    /// `supported` state
    #[error("no supported version available to default to")]
    NoSupportedVersion,

    /// An explicit constraint matched no catalog record under its matching rule
    #[error("version {requested} is not available, available versions are: {}", available.join(", "))]
    VersionNotAvailable {
        /// The constraint string that failed to match
        requested: String,
        /// Every version present in the catalog, for user self-correction
        available: Vec<String>,
    },
}

/// Result type alias for version-resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;
