//! Next command: run the full inference pipeline on the current repository.

use anyhow::Context;
use clap::Args;
use tracing::{debug, instrument};

use upcoming_core::config::Config;
use upcoming_core::{NextVersion, SystemExecutor, TracingObserver};

/// Arguments for the `next` subcommand.
#[derive(Args, Debug, Default)]
pub struct NextArgs {
    /// Remote to fetch tags from (overrides config)
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Use local tags only; skip `git fetch --tags`
    #[arg(long)]
    pub no_fetch: bool,
}

/// Compute and print the next version.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `cwd` - Repository root
#[instrument(name = "cmd_next", skip_all, fields(json_output))]
pub fn cmd_next(
    args: NextArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    let mut settings = config.git_settings();
    if let Some(remote) = args.remote {
        settings.remote = remote;
    }
    if args.no_fetch {
        settings.fetch = false;
    }
    debug!(json_output = global_json, ?settings, "executing next command");

    let spinner = super::progress_spinner("Resolving next version...", global_json);
    let observer = TracingObserver;
    let resolution = NextVersion::new(cwd, &SystemExecutor)
        .with_observer(&observer)
        .with_settings(settings)
        .resolve();
    spinner.finish_and_clear();

    let resolution = resolution.context("failed to compute next version")?;
    super::print_resolution(&resolution, global_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_repository_fails_with_context() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cwd = camino::Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let err = cmd_next(NextArgs::default(), true, &Config::default(), &cwd).unwrap_err();
        assert_eq!(err.to_string(), "failed to compute next version");
        let cause = err.root_cause().to_string();
        assert!(cause.contains("not a git repository"), "{cause}");
    }
}
