//! Git command lines used by the inference pipeline.
//!
//! Shells out to `git` for all operations through a [`CommandExecutor`].
//! This ensures we inherit the user's SSH keys, credential helpers and other
//! configuration when fetching tags.

use std::fmt;

use camino::Utf8Path;

use crate::error::{CommandFailure, Stage, UpcomingError};
use crate::exec::{CommandExecutor, CommandOutput, ExecError, ExecResult};

/// Program name used for every invocation.
pub const GIT: &str = "git";

/// Remote tags are fetched from unless configured otherwise.
pub const DEFAULT_REMOTE: &str = "origin";

/// Marker whose presence makes a directory a git project.
pub const GIT_DIR: &str = ".git";

/// Settings that shape the git invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSettings {
    /// Remote to fetch tags from.
    pub remote: String,
    /// Whether to fetch tags before listing them.
    pub fetch: bool,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            fetch: true,
        }
    }
}

/// A single git command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    stage: Stage,
    args: Vec<String>,
}

impl GitCommand {
    /// `git fetch <remote> --tags`
    pub fn fetch_tags(remote: &str) -> Self {
        Self {
            stage: Stage::FetchTags,
            args: vec!["fetch".into(), remote.into(), "--tags".into()],
        }
    }

    /// Tags sorted newest version first, one short name per line.
    pub fn list_tags() -> Self {
        Self {
            stage: Stage::ListTags,
            args: vec![
                "for-each-ref".into(),
                "--sort=-v:refname".into(),
                "--format=%(refname:short)".into(),
                "refs/tags".into(),
            ],
        }
    }

    /// Subjects of the commits reachable from `HEAD` but not from `tag`.
    pub fn log_since(tag: &str) -> Self {
        Self {
            stage: Stage::Log,
            args: vec![
                "log".into(),
                format!("{tag}..HEAD"),
                "--pretty=format:%s".into(),
            ],
        }
    }

    /// Pipeline stage this command belongs to.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Arguments passed after the program name.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run this command in `repo_root`.
    pub fn run<E>(&self, executor: &E, repo_root: &Utf8Path) -> ExecResult<CommandOutput>
    where
        E: CommandExecutor + ?Sized,
    {
        executor.run(GIT, &self.args, repo_root)
    }

    /// Run this command and turn every non-success into a stage error.
    ///
    /// `wrap` builds the stage-specific error from the failure cause;
    /// interruptions always become [`UpcomingError::Interrupted`].
    pub(crate) fn run_checked<E, F>(
        &self,
        executor: &E,
        repo_root: &Utf8Path,
        wrap: F,
    ) -> Result<CommandOutput, UpcomingError>
    where
        E: CommandExecutor + ?Sized,
        F: FnOnce(CommandFailure) -> UpcomingError,
    {
        match self.run(executor, repo_root) {
            Ok(output) if output.is_success() => Ok(output),
            Ok(output) => Err(wrap(CommandFailure::ExitStatus {
                code: output.exit_code,
                stderr: output.stderr,
            })),
            Err(ExecError::Interrupted { .. }) => Err(UpcomingError::Interrupted {
                stage: self.stage,
            }),
            Err(ExecError::Spawn { source, .. }) => Err(wrap(CommandFailure::Spawn(source))),
        }
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GIT} {}", self.args.join(" "))
    }
}

/// Check whether `root` carries a `.git` directory or file.
///
/// Worktrees and submodules use a `.git` file, so only existence is checked.
pub fn is_git_project(root: &Utf8Path) -> bool {
    root.join(GIT_DIR).exists()
}
