//! Version triples and user-supplied constraints.
//!
//! A platform version is an ordered `(major, minor, patch)` triple with
//! standard numeric-field precedence and no pre-release or build metadata.
//! User configuration supplies a constraint in exactly two surface forms:
//! `"X.Y.Z"` (an exact pin) or `"X.Y"` (a minor line that auto-advances to
//! the latest eligible patch).

use crate::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete platform version as an ordered `(major, minor, patch)` triple.
///
/// Derived `Ord` gives numeric-field precedence: majors compare first, then
/// minors, then patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a version from its three numeric fields.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether `other` shares this version's `major.minor` line.
    pub fn same_minor_line(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ResolveError;

    /// Parse a full `X.Y.Z` version. Partial forms are not versions; they
    /// only exist as constraints.
    fn from_str(s: &str) -> Result<Self> {
        match VersionConstraint::parse(s)? {
            VersionConstraint::Full(v) => Ok(v),
            _ => Err(ResolveError::InvalidVersionFormat {
                input: s.to_string(),
            }),
        }
    }
}

/// A user-supplied version constraint.
///
/// Exactly one constraint source is active per resolution call: reconciling
/// the two mutually exclusive user-facing fields into one constraint happens
/// at the configuration boundary (see [`VersionConstraint::from_fields`]),
/// never inside the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Exact `X.Y.Z` pin
    Full(Version),
    /// `X.Y` minor line; the patch auto-advances
    Partial { major: u64, minor: u64 },
    /// No constraint supplied
    Unset,
}

impl VersionConstraint {
    /// Classify a version string as `Full` (`X.Y.Z`) or `Partial` (`X.Y`).
    ///
    /// Anything else, including empty strings, leading/trailing dots, signs,
    /// and extra components, fails with `InvalidVersionFormat`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || ResolveError::InvalidVersionFormat {
            input: s.to_string(),
        };
        let parse_field = |field: &str| -> Result<u64> {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            field.parse::<u64>().map_err(|_| invalid())
        };

        let fields: Vec<&str> = s.split('.').collect();
        match fields.as_slice() {
            [major, minor] => Ok(Self::Partial {
                major: parse_field(major)?,
                minor: parse_field(minor)?,
            }),
            [major, minor, patch] => Ok(Self::Full(Version::new(
                parse_field(major)?,
                parse_field(minor)?,
                parse_field(patch)?,
            ))),
            _ => Err(invalid()),
        }
    }

    /// Reconcile the two mutually exclusive user-facing version fields into
    /// one constraint, at the configuration boundary.
    ///
    /// `exact` is the legacy exact-version field, `minimum` the current
    /// minimum-version field; both accept `X.Y` and `X.Y.Z`. Setting both is
    /// a configuration error, setting neither yields `Unset`.
    pub fn from_fields(exact: Option<&str>, minimum: Option<&str>) -> Result<Self> {
        match (exact, minimum) {
            (Some(_), Some(_)) => Err(ResolveError::ConflictingVersionFields),
            (Some(s), None) | (None, Some(s)) => Self::parse(s),
            (None, None) => Ok(Self::Unset),
        }
    }

    /// Whether no constraint was supplied.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(v) => write!(f, "{}", v),
            Self::Partial { major, minor } => write!(f, "{}.{}", major, minor),
            Self::Unset => write!(f, "*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        assert_eq!(
            VersionConstraint::parse("1.25.3").unwrap(),
            VersionConstraint::Full(Version::new(1, 25, 3))
        );
    }

    #[test]
    fn test_parse_partial() {
        assert_eq!(
            VersionConstraint::parse("1.25").unwrap(),
            VersionConstraint::Partial {
                major: 1,
                minor: 25
            }
        );
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        for input in [
            "", "1", "1.", ".1", "1..2", "1.2.3.4", "v1.2.3", "1.2.x", "1.-2", "1.2.3 ", " 1.2",
            "01a.2",
        ] {
            assert!(
                matches!(
                    VersionConstraint::parse(input),
                    Err(ResolveError::InvalidVersionFormat { .. })
                ),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_accepts_leading_zeros() {
        // "1.02" is still two numeric fields
        assert_eq!(
            VersionConstraint::parse("1.02").unwrap(),
            VersionConstraint::Partial { major: 1, minor: 2 }
        );
    }

    #[test]
    fn test_version_from_str_rejects_partial() {
        assert!("1.25".parse::<Version>().is_err());
        assert_eq!("1.25.0".parse::<Version>().unwrap(), Version::new(1, 25, 0));
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(1, 25, 3) < Version::new(1, 26, 0));
        assert!(Version::new(1, 25, 3) < Version::new(2, 0, 0));
        assert!(Version::new(1, 25, 3) < Version::new(1, 25, 10));
        assert_eq!(Version::new(1, 25, 3), Version::new(1, 25, 3));
    }

    #[test]
    fn test_same_minor_line() {
        assert!(Version::new(1, 25, 3).same_minor_line(&Version::new(1, 25, 9)));
        assert!(!Version::new(1, 25, 3).same_minor_line(&Version::new(1, 26, 3)));
    }

    #[test]
    fn test_from_fields() {
        assert_eq!(
            VersionConstraint::from_fields(None, None).unwrap(),
            VersionConstraint::Unset
        );
        assert_eq!(
            VersionConstraint::from_fields(Some("1.25.3"), None).unwrap(),
            VersionConstraint::Full(Version::new(1, 25, 3))
        );
        assert_eq!(
            VersionConstraint::from_fields(None, Some("1.25")).unwrap(),
            VersionConstraint::Partial {
                major: 1,
                minor: 25
            }
        );
        assert_eq!(
            VersionConstraint::from_fields(Some("1.25.3"), Some("1.25")),
            Err(ResolveError::ConflictingVersionFields)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 25, 3).to_string(), "1.25.3");
        assert_eq!(
            VersionConstraint::Partial {
                major: 1,
                minor: 25
            }
            .to_string(),
            "1.25"
        );
    }
}
