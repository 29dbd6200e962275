//! The full inference pipeline: tag → history → next version.
//!
//! [`NextVersion`] is the deferred computation a host exposes. Building one
//! does no work; each call to [`NextVersion::compute`] or
//! [`NextVersion::resolve`] checks the repository and re-runs every git
//! query, so results always reflect the current repository state.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{UpcomingError, UpcomingResult};
use crate::exec::CommandExecutor;
use crate::git::{self, GitSettings};
use crate::history::HistoryReader;
use crate::observer::{NoopObserver, VersionObserver};
use crate::tags::TagLocator;
use crate::version::resolve::VersionResolver;

/// Everything one pipeline run found out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Latest tag, or the fallback version when there was none.
    pub current_tag: String,
    /// Commit subjects since `current_tag`, in git's order.
    pub commits: Vec<String>,
    /// The computed next version, without prefix.
    pub next_version: String,
}

/// Next-version computation for one repository.
pub struct NextVersion<'a> {
    repo_root: Utf8PathBuf,
    executor: &'a dyn CommandExecutor,
    observer: &'a dyn VersionObserver,
    settings: GitSettings,
}

impl<'a> NextVersion<'a> {
    /// Prepare a computation for the repository at `repo_root`.
    pub fn new(repo_root: impl AsRef<Utf8Path>, executor: &'a dyn CommandExecutor) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
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

    /// Use `settings` for the git invocations.
    #[must_use]
    pub fn with_settings(mut self, settings: GitSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Repository this computation runs against.
    pub fn repo_root(&self) -> &Utf8Path {
        &self.repo_root
    }

    /// Compute the next version string.
    pub fn compute(&self) -> UpcomingResult<String> {
        self.resolve().map(|resolution| resolution.next_version)
    }

    /// Run the pipeline and keep the intermediate results.
    ///
    /// # Errors
    ///
    /// [`UpcomingError::NotAVersionControlledProject`] before any git command
    /// runs if the root has no `.git`; otherwise whatever the failing stage
    /// reports.
    #[instrument(skip(self), fields(repo_root = %self.repo_root))]
    pub fn resolve(&self) -> UpcomingResult<Resolution> {
        if !git::is_git_project(&self.repo_root) {
            return Err(UpcomingError::NotAVersionControlledProject {
                root: self.repo_root.clone(),
            });
        }

        let current_tag = TagLocator::new(self.executor)
            .with_observer(self.observer)
            .with_settings(self.settings.clone())
            .latest_tag(&self.repo_root)?;

        let commits = HistoryReader::new(self.executor)
            .with_observer(self.observer)
            .commits_since(&self.repo_root, &current_tag)?;

        let next_version =
            VersionResolver::new(self.observer).compute(&current_tag, commits.as_slice())?;
        debug!(%current_tag, %next_version, commits = commits.len(), "resolved");

        Ok(Resolution {
            current_tag,
            commits,
            next_version,
        })
    }
}
