//! Commit subjects since a tag.

use camino::Utf8Path;
use tracing::{debug, instrument};

use crate::error::{UpcomingError, UpcomingResult};
use crate::exec::CommandExecutor;
use crate::git::GitCommand;
use crate::observer::{NoopObserver, VersionObserver};

/// Reads the commit subjects reachable from `HEAD` but not from a tag.
pub struct HistoryReader<'a> {
    executor: &'a dyn CommandExecutor,
    observer: &'a dyn VersionObserver,
}

impl<'a> HistoryReader<'a> {
    /// Create a reader backed by `executor`.
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self {
            executor,
            observer: &NoopObserver,
        }
    }

    /// Report progress to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn VersionObserver) -> Self {
        self.observer = observer;
        self
    }

    /// One subject per commit, in the order git printed them.
    ///
    /// An empty result means nothing changed since `tag`.
    ///
    /// # Errors
    ///
    /// [`UpcomingError::CommitHistoryFailed`] if `git log` fails to start or
    /// exits non-zero (for example because `tag` does not exist), and
    /// [`UpcomingError::Interrupted`] if the wait is interrupted.
    #[instrument(skip(self))]
    pub fn commits_since(&self, repo_root: &Utf8Path, tag: &str) -> UpcomingResult<Vec<String>> {
        let log = GitCommand::log_since(tag);
        self.observer.command(&log);

        let output = log.run_checked(self.executor, repo_root, |cause| {
            UpcomingError::CommitHistoryFailed {
                tag: tag.to_string(),
                cause,
            }
        })?;

        for message in &output.lines {
            self.observer.commit(message);
        }
        debug!(count = output.lines.len(), "commits since tag");
        Ok(output.lines)
    }
}
