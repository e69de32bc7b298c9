//! The read-only version catalog.
//!
//! A catalog is a table of `(family, version, lifecycle state)` records
//! supplied fresh per call by the platform's discovery API — globally scoped
//! for the control plane, or pre-filtered to one OS family for machine
//! images. Records are never cached across calls.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a catalog record.
///
/// Governs eligibility for implicit (non-explicit) selection: an
/// unconstrained default never lands on `Preview` or `Deprecated`, a partial
/// constraint skips `Preview` only, and an exact pin matches any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Generally available and recommended
    Supported,
    /// Pre-release; opt-in via an exact pin only
    Preview,
    /// Still selectable but scheduled for removal
    Deprecated,
}

impl LifecycleState {
    /// Parse a lifecycle state from a string (case-insensitive).
    ///
    /// The discovery API sends the literal strings `supported`, `preview`
    /// and `deprecated`; anything else is unknown and yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supported" => Some(Self::Supported),
            "preview" => Some(Self::Preview),
            "deprecated" => Some(Self::Deprecated),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Preview => "preview",
            Self::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One available version as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Upgrade lineage the version belongs to: an OS image name for machine
    /// images, absent for control-plane versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// The concrete version
    pub version: Version,
    /// Lifecycle state at discovery time
    pub state: LifecycleState,
}

impl VersionRecord {
    /// Create a record with no family (control-plane domain).
    pub fn new(version: Version, state: LifecycleState) -> Self {
        Self {
            family: None,
            version,
            state,
        }
    }

    /// Create a record belonging to a named family (machine-image domain).
    pub fn with_family(family: impl Into<String>, version: Version, state: LifecycleState) -> Self {
        Self {
            family: Some(family.into()),
            version,
            state,
        }
    }
}

/// A collection of [`VersionRecord`]s, in the order the platform listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionCatalog {
    records: Vec<VersionRecord>,
}

impl VersionCatalog {
    /// Build a catalog from records, preserving their order.
    pub fn new(records: Vec<VersionRecord>) -> Self {
        Self { records }
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in catalog order.
    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    /// Sub-catalog holding only the records of one family, in catalog order.
    pub fn filter_family(&self, family: &str) -> VersionCatalog {
        VersionCatalog::new(
            self.records
                .iter()
                .filter(|r| r.family.as_deref() == Some(family))
                .cloned()
                .collect(),
        )
    }

    /// Every version present in the catalog, rendered as strings, for the
    /// diagnostics carried by `VersionNotAvailable`.
    pub fn version_strings(&self) -> Vec<String> {
        self.records.iter().map(|r| r.version.to_string()).collect()
    }

    /// The maximum version among `Supported`-only records.
    ///
    /// Deliberately stricter than partial matching (which excludes `Preview`
    /// only): a brand-new entity with no explicit constraint must never
    /// default onto a `Deprecated` version.
    pub fn latest_supported(&self) -> Option<&VersionRecord> {
        self.records
            .iter()
            .filter(|r| r.state == LifecycleState::Supported)
            .max_by_key(|r| r.version)
    }
}

impl FromIterator<VersionRecord> for VersionCatalog {
    fn from_iter<I: IntoIterator<Item = VersionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
