//! Compute command: run only the version resolver, without git.
//!
//! Useful for checking how a set of commit subjects would be classified.

use std::io::BufRead;

use anyhow::Context;
use clap::Args;
use tracing::{debug, instrument};

use upcoming_core::version::resolve::VersionResolver;
use upcoming_core::{Resolution, TracingObserver};

/// Arguments for the `compute` subcommand.
#[derive(Args, Debug, Default)]
pub struct ComputeArgs {
    /// Current tag (e.g., "v1.2.3")
    pub tag: String,

    /// Commit subjects, one per argument
    pub messages: Vec<String>,

    /// Also read commit subjects from stdin, one per line
    #[arg(long)]
    pub stdin: bool,
}

/// Compute and print the next version for the given tag and subjects.
#[instrument(name = "cmd_compute", skip_all, fields(json_output))]
pub fn cmd_compute(args: ComputeArgs, global_json: bool) -> anyhow::Result<()> {
    let mut commits = args.messages;
    if args.stdin {
        for line in std::io::stdin().lock().lines() {
            commits.push(line.context("failed to read commit subjects from stdin")?);
        }
    }
    debug!(
        json_output = global_json,
        commits = commits.len(),
        "executing compute command"
    );

    let observer = TracingObserver;
    let next_version = VersionResolver::new(&observer)
        .compute(&args.tag, commits.as_slice())
        .with_context(|| format!("failed to compute next version from tag '{}'", args.tag))?;

    let resolution = Resolution {
        current_tag: args.tag,
        commits,
        next_version,
    };
    super::print_resolution(&resolution, global_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tag: &str, messages: &[&str]) -> ComputeArgs {
        ComputeArgs {
            tag: tag.to_string(),
            messages: messages.iter().map(|m| (*m).to_string()).collect(),
            stdin: false,
        }
    }

    #[test]
    fn valid_tag_succeeds() {
        assert!(cmd_compute(args("v1.2.3", &["feat: x"]), true).is_ok());
    }

    #[test]
    fn invalid_tag_fails() {
        let err = cmd_compute(args("v1.2", &["fix: bug"]), false).unwrap_err();
        assert!(err.root_cause().to_string().contains("'1.2'"));
    }
}
