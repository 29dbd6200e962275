//! Error types for upcoming-core

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The git invocation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `git fetch --tags`
    FetchTags,
    /// `git for-each-ref` over `refs/tags`
    ListTags,
    /// `git log <tag>..HEAD`
    Log,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchTags => write!(f, "git fetch"),
            Self::ListTags => write!(f, "git for-each-ref"),
            Self::Log => write!(f, "git log"),
        }
    }
}

/// Why a git invocation did not produce a usable result.
#[derive(Error, Debug)]
pub enum CommandFailure {
    /// The command ran but exited unsuccessfully.
    #[error("exited with {}{}", describe_exit(.code), describe_stderr(.stderr))]
    ExitStatus {
        /// Exit code, `None` when the process was terminated by a signal.
        code: Option<i32>,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// The command could not be started.
    #[error("failed to start git (is it installed and on your PATH?)")]
    Spawn(#[source] std::io::Error),
}

impl CommandFailure {
    /// Exit code of the failed command, if it ran to completion.
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitStatus { code, .. } => *code,
            Self::Spawn(_) => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("exit code {c}"),
    )
}

fn describe_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Errors from the version inference pipeline.
#[derive(Error, Debug)]
pub enum UpcomingError {
    /// The target directory has no `.git` marker.
    #[error("{root} is not a git repository; run `git init` before computing a version")]
    NotAVersionControlledProject {
        /// Directory that was checked.
        root: Utf8PathBuf,
    },

    /// Synchronising tags from the remote failed.
    #[error("failed to fetch git tags from remote `{remote}`")]
    TagFetchFailed {
        /// Remote the tags were fetched from.
        remote: String,
        /// Underlying failure.
        #[source]
        cause: CommandFailure,
    },

    /// Listing tags failed.
    #[error("failed to determine the latest git tag")]
    TagDiscoveryFailed {
        /// Underlying failure.
        #[source]
        cause: CommandFailure,
    },

    /// Reading the commit subjects since the tag failed.
    #[error("failed to read the commit history since `{tag}`")]
    CommitHistoryFailed {
        /// Tag the history was scoped to.
        tag: String,
        /// Underlying failure.
        #[source]
        cause: CommandFailure,
    },

    /// The normalised tag is not `MAJOR.MINOR.PATCH`.
    #[error("current tag '{tag}' is not semantic version format (X.Y.Z)")]
    InvalidSemanticVersion {
        /// The offending tag, verbatim after normalisation.
        tag: String,
    },

    /// Waiting on a git process was interrupted.
    #[error("{stage} was interrupted")]
    Interrupted {
        /// Stage that was running.
        stage: Stage,
    },
}

impl UpcomingError {
    /// Whether this failure came from an interruption rather than from git.
    ///
    /// Callers that support cancellation should check this before reporting.
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Result alias for the version inference pipeline.
pub type UpcomingResult<T> = Result<T, UpcomingError>;
