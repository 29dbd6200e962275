//! Commit subject classification.
//!
//! Matching is deliberately loose: a case-insensitive substring check for
//! breaking changes and a prefix check for `feat` and `fix`. There is no
//! conventional-commit grammar here, so `feature: x` counts as `feat` and
//! `Something!: else` counts as breaking.

use super::BumpLevel;

const BREAKING_CHANGE: &str = "breaking change";
const BREAKING_MARKER: &str = "!:";
const FEAT: &str = "feat";
const FIX: &str = "fix";

/// Classify a single commit subject.
///
/// The breaking check runs first, so `fix!: x` is a major bump.
pub fn classify(message: &str) -> Option<BumpLevel> {
    let lower = message.to_lowercase();

    if lower.contains(BREAKING_CHANGE) || lower.contains(BREAKING_MARKER) {
        Some(BumpLevel::Major)
    } else if lower.starts_with(FEAT) {
        Some(BumpLevel::Minor)
    } else if lower.starts_with(FIX) {
        Some(BumpLevel::Patch)
    } else {
        None
    }
}

/// Which bump levels a batch of commits asked for.
///
/// Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpDecision {
    /// At least one breaking change.
    pub major: bool,
    /// At least one `feat` commit.
    pub minor: bool,
    /// At least one `fix` commit.
    pub patch: bool,
}

impl BumpDecision {
    /// Scan every message and record its classification.
    pub fn scan<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut decision = Self::default();
        for message in messages {
            if let Some(level) = classify(message.as_ref()) {
                decision.record(level);
            }
        }
        decision
    }

    /// Set the flag for `level`.
    pub const fn record(&mut self, level: BumpLevel) {
        match level {
            BumpLevel::Major => self.major = true,
            BumpLevel::Minor => self.minor = true,
            BumpLevel::Patch => self.patch = true,
        }
    }

    /// The highest requested level: major > minor > patch.
    pub const fn level(&self) -> Option<BumpLevel> {
        if self.major {
            Some(BumpLevel::Major)
        } else if self.minor {
            Some(BumpLevel::Minor)
        } else if self.patch {
            Some(BumpLevel::Patch)
        } else {
            None
        }
    }
}
