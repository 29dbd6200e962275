use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

const DEFAULT_OUT_DIR: &str = "dist/share/man/man1";

#[derive(Args, Debug)]
pub struct ManArgs {
    /// Output directory, relative to the workspace root
    #[arg(long = "out-dir", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
}

impl Default for ManArgs {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

pub fn cmd_man(args: ManArgs) -> Result<(), String> {
    let out_dir = crate::workspace_root().join(args.out_dir);
    fs::create_dir_all(&out_dir).map_err(|e| format!("{}: {e}", out_dir.display()))?;

    let cmd = upcoming::command();
    write_page(cmd.clone(), crate::BIN_NAME, &out_dir)?;

    // One page per subcommand, named like `git-log.1`
    for subcommand in cmd.get_subcommands() {
        let page = format!("{}-{}", crate::BIN_NAME, subcommand.get_name());
        write_page(subcommand.clone(), &page, &out_dir)?;
    }

    Ok(())
}

fn write_page(cmd: clap::Command, title: &str, out_dir: &Path) -> Result<(), String> {
    let path = out_dir.join(format!("{title}.1"));
    let mut buffer: Vec<u8> = Vec::new();
    clap_mangen::Man::new(cmd)
        .title(title.to_uppercase())
        .render(&mut buffer)
        .map_err(|e| format!("render {}: {e}", path.display()))?;
    fs::write(&path, buffer).map_err(|e| format!("{}: {e}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
