//! Maintenance tasks for the upcoming workspace.
//!
//! - `completions` writes shell completion scripts
//! - `man` writes roff manpages for `upcoming` and its subcommands
//! - `dist` does both into the default `dist/share` layout
//!
//! Run `cargo xtask --help` to see available commands.

#![deny(unsafe_code)]

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Name of the installed binary.
pub const BIN_NAME: &str = "upcoming";

#[derive(Parser, Debug)]
#[command(name = "xtask")]
#[command(about = "Project maintenance tasks")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand, Debug)]
enum Task {
    /// Generate shell completions for the upcoming CLI.
    Completions(commands::completions::CompletionsArgs),

    /// Generate manpages for the upcoming CLI.
    Man(commands::man::ManArgs),

    /// Generate completions and manpages under dist/share.
    Dist,
}

fn main() -> Result<(), String> {
    match Xtask::parse().command {
        Task::Completions(args) => commands::completions::cmd_completions(args),
        Task::Man(args) => commands::man::cmd_man(args),
        Task::Dist => {
            commands::completions::cmd_completions(commands::completions::CompletionsArgs::default())?;
            commands::man::cmd_man(commands::man::ManArgs::default())
        }
    }
}

pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(&manifest_dir).to_path_buf()
}
