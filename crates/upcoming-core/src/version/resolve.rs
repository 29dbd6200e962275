//! Next-version resolution from a tag and the commits since it.

use tracing::instrument;

use super::conventional::BumpDecision;
use super::{format_version, next_version, normalize_tag, parse_version};
use crate::error::{UpcomingError, UpcomingResult};
use crate::observer::{NoopObserver, Unchanged, VersionObserver};

/// Derives the next version string.
pub struct VersionResolver<'a> {
    observer: &'a dyn VersionObserver,
}

impl Default for VersionResolver<'_> {
    fn default() -> Self {
        Self {
            observer: &NoopObserver,
        }
    }
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver that reports to `observer`.
    pub const fn new(observer: &'a dyn VersionObserver) -> Self {
        Self { observer }
    }

    /// Compute the next version for `current_tag` given `commits`.
    ///
    /// - A blank tag is returned as-is. Only the tag as given counts: `v`
    ///   is not blank, and fails validation once commits exist.
    /// - No commits: the normalised tag is returned as-is.
    /// - Otherwise the tag must be `MAJOR.MINOR.PATCH` after stripping one
    ///   leading `v`, and the highest classified bump wins.
    ///
    /// The result never carries a `v` prefix.
    #[instrument(skip_all, fields(current_tag = %current_tag, commits = commits.len()))]
    pub fn compute<S: AsRef<str>>(&self, current_tag: &str, commits: &[S]) -> UpcomingResult<String> {
        if current_tag.trim().is_empty() {
            self.observer.unchanged(current_tag, Unchanged::BlankTag);
            return Ok(current_tag.to_string());
        }

        let normalized = normalize_tag(current_tag);

        if commits.is_empty() {
            self.observer.unchanged(normalized, Unchanged::NoCommits);
            return Ok(normalized.to_string());
        }

        let current = parse_version(normalized)?;
        let decision = BumpDecision::scan(commits);

        let next = match decision.level() {
            Some(level) => next_version(&current, level).ok_or_else(|| {
                UpcomingError::InvalidSemanticVersion {
                    tag: normalized.to_string(),
                }
            })?,
            None => {
                self.observer
                    .unchanged(normalized, Unchanged::NoConventionalCommits);
                current
            }
        };

        let formatted = format_version(&next);
        self.observer.computed(&formatted);
        Ok(formatted)
    }
}

/// Compute the next version without reporting progress.
///
/// See [`VersionResolver::compute`].
pub fn compute<S: AsRef<str>>(current_tag: &str, commits: &[S]) -> UpcomingResult<String> {
    VersionResolver::default().compute(current_tag, commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    const NONE: [&str; 0] = [];

    #[test]
    fn no_commits_keeps_version() {
        assert_eq!(compute("1.2.3", &NONE).unwrap(), "1.2.3");
    }

    #[test]
    fn no_commits_returns_normalized_tag() {
        assert_eq!(compute("v1.2.3", &NONE).unwrap(), "1.2.3");
    }

    #[test]
    fn no_commits_skips_validation() {
        assert_eq!(compute("v1.2", &NONE).unwrap(), "1.2");
    }

    #[test]
    fn fix_bumps_patch() {
        assert_eq!(compute("1.2.3", &["fix: correct typo"]).unwrap(), "1.2.4");
    }

    #[test]
    fn feat_bumps_minor() {
        assert_eq!(compute("1.2.3", &["feat: add new endpoint"]).unwrap(), "1.3.0");
    }

    #[test]
    fn bang_bumps_major() {
        assert_eq!(compute("1.2.3", &["feat!: change API contract"]).unwrap(), "2.0.0");
    }

    #[test]
    fn major_wins_over_minor_and_patch() {
        let commits = [
            "fix: small bug",
            "feat: new feature",
            "BREAKING CHANGE: removed deprecated API",
        ];
        assert_eq!(compute("1.2.3", &commits).unwrap(), "2.0.0");
    }

    #[test]
    fn minor_wins_over_patch() {
        let commits = ["fix: a", "fix: b", "feat: c", "fix: d"];
        assert_eq!(compute("0.9.7", &commits).unwrap(), "0.10.0");
    }

    #[test]
    fn v_prefix_is_stripped() {
        assert_eq!(compute("v1.2.3", &["fix: bug"]).unwrap(), "1.2.4");
    }

    #[test]
    fn two_components_is_invalid() {
        let err = compute("v1.2", &["fix: bug"]).unwrap_err();
        assert!(matches!(err, UpcomingError::InvalidSemanticVersion { ref tag } if tag == "1.2"));
    }

    #[test]
    fn four_components_is_invalid() {
        assert!(compute("1.2.3.4", &["fix: bug"]).is_err());
    }

    #[test]
    fn non_conventional_commits_keep_version() {
        assert_eq!(compute("v3.1.4", &["chore: tidy", "docs: readme"]).unwrap(), "3.1.4");
    }

    #[test]
    fn non_conventional_commits_still_validate_tag() {
        assert!(compute("latest", &["chore: tidy"]).is_err());
    }

    #[test]
    fn blank_tag_is_returned_unchanged() {
        assert_eq!(compute("", &["feat: x"]).unwrap(), "");
        assert_eq!(compute("  ", &NONE).unwrap(), "  ");
    }

    #[test]
    fn bare_prefix_tag_is_invalid() {
        let err = compute("v", &["fix: bug"]).unwrap_err();
        assert!(matches!(err, UpcomingError::InvalidSemanticVersion { ref tag } if tag.is_empty()));

        let err = compute("v ", &["feat: x"]).unwrap_err();
        assert!(matches!(err, UpcomingError::InvalidSemanticVersion { ref tag } if tag == " "));
    }

    #[test]
    fn fallback_version_flows_through_bumps() {
        assert_eq!(compute("0.0.1", &["feat: first feature"]).unwrap(), "0.1.0");
        assert_eq!(compute("0.0.1", &["fix: first fix"]).unwrap(), "0.0.2");
    }

    #[test]
    fn result_ignores_commit_order() {
        let a = compute("2.4.6", &["fix: a", "feat: b"]).unwrap();
        let b = compute("2.4.6", &["feat: b", "fix: a"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "2.5.0");
    }

    #[test]
    fn owned_commit_strings_are_accepted() {
        let commits = vec!["fix: owned".to_string()];
        assert_eq!(compute("1.0.0", commits.as_slice()).unwrap(), "1.0.1");
    }

    #[test]
    fn major_overflow_is_invalid() {
        let tag = format!("{}.0.0", u64::MAX);
        assert!(compute(&tag, &["feat!: boom"]).is_err());
    }

    #[test]
    fn observer_sees_unchanged_and_computed() {
        let observer = RecordingObserver::default();
        let resolver = VersionResolver::new(&observer);

        resolver.compute("1.0.0", &NONE).unwrap();
        resolver.compute("1.0.0", &["chore: x"]).unwrap();
        resolver.compute("1.0.0", &["fix: x"]).unwrap();

        assert_eq!(
            observer.events(),
            vec![
                "unchanged 1.0.0 NoCommits",
                "unchanged 1.0.0 NoConventionalCommits",
                "computed 1.0.0",
                "computed 1.0.1",
            ]
        );
    }
}
