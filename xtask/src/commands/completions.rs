use std::fs;
use std::path::PathBuf;

use clap::Args;
use clap_complete::{Shell, generate_to};

const DEFAULT_OUT_DIR: &str = "dist/share/completions";

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Output directory, relative to the workspace root
    #[arg(long = "out-dir", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Generate only for one shell (default: bash, zsh, fish, powershell)
    #[arg(long, value_enum)]
    pub shell: Option<Shell>,
}

impl Default for CompletionsArgs {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            shell: None,
        }
    }
}

pub fn cmd_completions(args: CompletionsArgs) -> Result<(), String> {
    let out_dir = crate::workspace_root().join(args.out_dir);
    fs::create_dir_all(&out_dir).map_err(|e| format!("{}: {e}", out_dir.display()))?;

    let mut cmd = upcoming::command();
    let shells = args.shell.map_or_else(
        || vec![Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell],
        |shell| vec![shell],
    );

    for shell in shells {
        let path = generate_to(shell, &mut cmd, crate::BIN_NAME, &out_dir)
            .map_err(|e| format!("{shell} completions: {e}"))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
