//! Info command: show package, config, and repository information.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use upcoming_core::config::{self, Config};
use upcoming_core::git;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    remote: String,
    fetch: bool,
}

impl ConfigInfo {
    fn from_config(config: &Config, cwd: &camino::Utf8Path) -> Self {
        let settings = config.git_settings();
        Self {
            config_file: config::find_project_config(cwd).map(|p| p.to_string()),
            user_config_dir: config::user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            remote: settings.remote,
            fetch: settings.fetch,
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
    git_repository: bool,
}

/// Print package information.
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `cwd` - Current working directory for config discovery
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    cwd: &camino::Utf8Path,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, cwd),
        git_repository: git::is_git_project(cwd),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        info.package.name.bold(),
        info.package.version.green()
    );
    if !info.package.description.is_empty() {
        println!("{}", info.package.description);
    }
    if !info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), info.package.license);
    }
    if !info.package.repository.is_empty() {
        println!(
            "{}: {}",
            "Repository".dimmed(),
            info.package.repository.cyan()
        );
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = info.config.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    if let Some(ref dir) = info.config.user_config_dir {
        println!("{}: {}", "User config dir".dimmed(), dir);
    }
    println!("{}: {}", "Log level".dimmed(), info.config.log_level);
    if let Some(ref dir) = info.config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    println!("{}: {}", "Remote".dimmed(), info.config.remote.cyan());
    println!("{}: {}", "Fetch tags".dimmed(), info.config.fetch);

    println!();
    println!("{}", "Repository".bold().underline());
    if info.git_repository {
        println!("  {} {}", "✓".green(), cwd);
    } else {
        println!(
            "  {} {}",
            "○".yellow(),
            "Not a git repository (no .git found)".yellow()
        );
    }

    Ok(())
}
