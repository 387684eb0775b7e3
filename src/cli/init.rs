//! Init command implementation.
//!
//! Creates the workspace layout, a default include.txt and discmos.yaml.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::workspace::{Workspace, MANIFEST_FILENAME};

/// Create a discmos workspace
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Workspace directory (default: current directory)
    #[arg(default_value = ".")]
    pub workspace: PathBuf,

    /// Overwrite an existing discmos.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let workspace = Workspace::new(&args.workspace);
    let report = workspace.init(args.force)?;

    for path in &report.created {
        printer.status("Created", &display_path(path));
    }
    for path in &report.kept {
        let hint = if path.ends_with(MANIFEST_FILENAME) {
            " (use --force to overwrite)"
        } else {
            ""
        };
        printer.info("Kept", &format!("{}{}", display_path(path), hint));
    }

    printer.status(
        "Initialized",
        &format!(
            "{}; put emoji-data.json there and emoji images in {}",
            display_path(workspace.root()),
            display_path(&workspace.emoji_dir())
        ),
    );

    Ok(())
}
