//! Latest release tag discovery.

use camino::Utf8Path;
use tracing::{debug, instrument};

use crate::error::{UpcomingError, UpcomingResult};
use crate::exec::CommandExecutor;
use crate::git::{GitCommand, GitSettings};
use crate::observer::{NoopObserver, VersionObserver};

/// Version used when the repository has no tags yet.
pub const FALLBACK_VERSION: &str = "0.0.1";

/// Finds the most recent tag, after syncing tags from the remote.
pub struct TagLocator<'a> {
    executor: &'a dyn CommandExecutor,
    observer: &'a dyn VersionObserver,
    settings: GitSettings,
}

impl<'a> TagLocator<'a> {
    /// Create a locator with default [`GitSettings`].
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self {
            executor,
            observer: &NoopObserver,
            settings: GitSettings::default(),
        }
    }

    /// Report progress to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn VersionObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Use `settings` for the remote and fetch behaviour.
    #[must_use]
    pub fn with_settings(mut self, settings: GitSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Return the latest tag, or [`FALLBACK_VERSION`] if there is none.
    ///
    /// Runs `git fetch <remote> --tags` first (unless disabled), then lists
    /// tags newest-version-first and keeps only the first line.
    ///
    /// # Errors
    ///
    /// - [`UpcomingError::TagFetchFailed`] if the fetch fails; the listing is
    ///   not attempted.
    /// - [`UpcomingError::TagDiscoveryFailed`] if the listing exits non-zero.
    /// - [`UpcomingError::Interrupted`] if either wait is interrupted.
    #[instrument(skip(self), fields(remote = %self.settings.remote, fetch = self.settings.fetch))]
    pub fn latest_tag(&self, repo_root: &Utf8Path) -> UpcomingResult<String> {
        if self.settings.fetch {
            self.fetch_tags(repo_root)?;
        } else {
            debug!("tag fetch disabled");
        }

        let list = GitCommand::list_tags();
        self.observer.command(&list);
        let output = list.run_checked(self.executor, repo_root, |cause| {
            UpcomingError::TagDiscoveryFailed { cause }
        })?;

        match output.lines.first().map(|line| line.trim()) {
            Some(tag) if !tag.is_empty() => {
                self.observer.latest_tag(tag);
                Ok(tag.to_string())
            }
            _ => {
                self.observer.fallback(FALLBACK_VERSION);
                Ok(FALLBACK_VERSION.to_string())
            }
        }
    }

    fn fetch_tags(&self, repo_root: &Utf8Path) -> UpcomingResult<()> {
        let fetch = GitCommand::fetch_tags(&self.settings.remote);
        self.observer.command(&fetch);
        fetch.run_checked(self.executor, repo_root, |cause| {
            UpcomingError::TagFetchFailed {
                remote: self.settings.remote.clone(),
                cause,
            }
        })?;
        Ok(())
    }
}
