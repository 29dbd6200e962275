//! Command implementations

pub mod compute;

pub mod info;

pub mod next;

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use upcoming_core::Resolution;

/// Spinner on stderr while git runs; hidden for JSON output or when stderr
/// is not a terminal.
pub fn progress_spinner(message: &'static str, global_json: bool) -> ProgressBar {
    if global_json || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print a resolution: the bare version on stdout, or the full record as JSON.
///
/// In text mode a short summary also goes to stderr when it is a terminal,
/// so `$(upcoming next)` still captures only the version.
pub fn print_resolution(resolution: &Resolution, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(resolution)?);
        return Ok(());
    }

    if std::io::stderr().is_terminal() {
        eprintln!(
            "{}: {} → {} ({} commit{})",
            "Version".bold(),
            resolution.current_tag.dimmed(),
            resolution.next_version.green().bold(),
            resolution.commits.len(),
            if resolution.commits.len() == 1 { "" } else { "s" }
        );
    }
    println!("{}", resolution.next_version);
    Ok(())
}
