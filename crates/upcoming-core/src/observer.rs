//! Progress reporting hooks for the inference pipeline.
//!
//! The pipeline reports what it is doing through a [`VersionObserver`]
//! instead of writing diagnostics itself, so the engine can run silently in
//! tests and loudly in the CLI.

use tracing::{info, warn};

use crate::git::GitCommand;

/// Why a resolution left the version as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    /// No commits since the tag.
    NoCommits,
    /// Commits exist but none is breaking, `feat` or `fix`.
    NoConventionalCommits,
    /// The tag was blank, so there was nothing to compute from.
    BlankTag,
}

/// Receives pipeline progress. Every hook defaults to doing nothing.
pub trait VersionObserver {
    /// A git command is about to run.
    fn command(&self, _command: &GitCommand) {}

    /// The latest tag was found.
    fn latest_tag(&self, _tag: &str) {}

    /// No tag exists; the fallback version is used instead.
    fn fallback(&self, _version: &str) {}

    /// A commit subject was read from the history.
    fn commit(&self, _message: &str) {}

    /// The version stays the same.
    fn unchanged(&self, _version: &str, _reason: Unchanged) {}

    /// A new version was computed.
    fn computed(&self, _version: &str) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl VersionObserver for NoopObserver {}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl VersionObserver for TracingObserver {
    fn command(&self, command: &GitCommand) {
        info!(stage = %command.stage(), command = %command, "running git");
    }

    fn latest_tag(&self, tag: &str) {
        info!(%tag, "latest git tag found");
    }

    fn fallback(&self, version: &str) {
        warn!(%version, "no git tags found, using fallback version");
    }

    fn commit(&self, message: &str) {
        info!(%message, "commit");
    }

    fn unchanged(&self, version: &str, reason: Unchanged) {
        info!(%version, ?reason, "version remains the same");
    }

    fn computed(&self, version: &str) {
        info!(%version, "computed next version");
    }
}

/// Records events as strings, for asserting on pipeline progress.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) events: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
impl VersionObserver for RecordingObserver {
    fn command(&self, command: &GitCommand) {
        self.push(format!("command {command}"));
    }

    fn latest_tag(&self, tag: &str) {
        self.push(format!("tag {tag}"));
    }

    fn fallback(&self, version: &str) {
        self.push(format!("fallback {version}"));
    }

    fn commit(&self, message: &str) {
        self.push(format!("commit {message}"));
    }

    fn unchanged(&self, version: &str, reason: Unchanged) {
        self.push(format!("unchanged {version} {reason:?}"));
    }

    fn computed(&self, version: &str) {
        self.push(format!("computed {version}"));
    }
}
