//! Version parsing, classification and bump arithmetic.
//!
//! Tags are normalised (one leading `v` removed) and must then be exactly
//! `MAJOR.MINOR.PATCH`. Commit subjects are classified by
//! [`conventional`], and [`resolve`] combines both into the next version.

pub mod conventional;
pub mod resolve;

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{UpcomingError, UpcomingResult};

/// Prefix stripped from tags before parsing.
pub const TAG_PREFIX: char = 'v';

static RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("release tag pattern is valid")
});

/// Semver bump level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    /// Patch release (x.y.Z).
    Patch,
    /// Minor release (x.Y.0).
    Minor,
    /// Major release (X.0.0).
    Major,
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

/// Compute the next version by applying a bump level.
///
/// Returns `None` if the bumped component would overflow.
pub fn next_version(current: &Version, level: BumpLevel) -> Option<Version> {
    let next = match level {
        BumpLevel::Patch => Version::new(current.major, current.minor, current.patch.checked_add(1)?),
        BumpLevel::Minor => Version::new(current.major, current.minor.checked_add(1)?, 0),
        BumpLevel::Major => Version::new(current.major.checked_add(1)?, 0, 0),
    };
    Some(next)
}

/// Strip a single leading `v` from a tag.
///
/// Blank tags are returned untouched.
pub fn normalize_tag(tag: &str) -> &str {
    if tag.trim().is_empty() {
        return tag;
    }
    tag.strip_prefix(TAG_PREFIX).unwrap_or(tag)
}

/// Parse an already normalised tag as `MAJOR.MINOR.PATCH`.
///
/// Pre-release and build suffixes, missing or extra components and
/// components that do not fit in a `u64` are all rejected.
pub fn parse_version(tag: &str) -> UpcomingResult<Version> {
    let invalid = || UpcomingError::InvalidSemanticVersion {
        tag: tag.to_string(),
    };

    let captures = RELEASE_TAG.captures(tag).ok_or_else(invalid)?;
    let component = |index: usize| captures[index].parse::<u64>().map_err(|_| invalid());

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Format a version as `MAJOR.MINOR.PATCH`, without prefix.
pub fn format_version(version: &Version) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_patch() {
        let v = Version::new(1, 2, 3);
        assert_eq!(next_version(&v, BumpLevel::Patch), Some(Version::new(1, 2, 4)));
    }

    #[test]
    fn bump_minor() {
        let v = Version::new(1, 2, 3);
        assert_eq!(next_version(&v, BumpLevel::Minor), Some(Version::new(1, 3, 0)));
    }

    #[test]
    fn bump_major() {
        let v = Version::new(1, 2, 3);
        assert_eq!(next_version(&v, BumpLevel::Major), Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn bump_overflow_is_none() {
        let v = Version::new(u64::MAX, 0, 0);
        assert_eq!(next_version(&v, BumpLevel::Major), None);
        assert_eq!(next_version(&v, BumpLevel::Minor), Some(Version::new(u64::MAX, 1, 0)));
    }

    #[test]
    fn normalize_strips_single_v() {
        assert_eq!(normalize_tag("v1.2.3"), "1.2.3");
        assert_eq!(normalize_tag("1.2.3"), "1.2.3");
        assert_eq!(normalize_tag("vv1.2.3"), "v1.2.3");
    }

    #[test]
    fn normalize_is_idempotent_for_release_tags() {
        for tag in ["v1.2.3", "1.2.3", "v0.0.1", "10.20.30"] {
            let once = normalize_tag(tag);
            assert_eq!(normalize_tag(once), once);
        }
    }

    #[test]
    fn normalize_leaves_blank_and_other_prefixes() {
        assert_eq!(normalize_tag(""), "");
        assert_eq!(normalize_tag("   "), "   ");
        assert_eq!(normalize_tag("V1.2.3"), "V1.2.3");
        assert_eq!(normalize_tag("release-1.2.3"), "release-1.2.3");
    }

    #[test]
    fn parse_three_components() {
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("0.0.1").unwrap(), Version::new(0, 0, 1));
    }

    #[test]
    fn parse_accepts_leading_zeros() {
        assert_eq!(parse_version("01.002.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn parse_rejects_wrong_shapes() {
        for tag in [
            "1.2",
            "1.2.3.4",
            "v1.2.3",
            "1.2.x",
            "1.2.3-rc.1",
            "1.2.3+build",
            " 1.2.3",
            "1.2.3\n",
            "",
        ] {
            let err = parse_version(tag).unwrap_err();
            assert!(
                matches!(err, UpcomingError::InvalidSemanticVersion { tag: ref t } if t == tag),
                "expected InvalidSemanticVersion for {tag:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_non_ascii_digits() {
        assert!(parse_version("١.٢.٣").is_err());
    }

    #[test]
    fn parse_rejects_overflowing_component() {
        assert!(parse_version("18446744073709551616.0.0").is_err());
        assert!(parse_version("18446744073709551615.0.0").is_ok());
    }

    #[test]
    fn format_has_no_prefix() {
        assert_eq!(format_version(&Version::new(2, 0, 0)), "2.0.0");
    }

    #[test]
    fn bump_levels_order_by_precedence() {
        assert!(BumpLevel::Major > BumpLevel::Minor);
        assert!(BumpLevel::Minor > BumpLevel::Patch);
        assert_eq!(BumpLevel::Minor.to_string(), "minor");
    }
}
