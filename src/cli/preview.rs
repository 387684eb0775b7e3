//! Preview command implementation.
//!
//! Prints every emoji include.txt selects so the script can be checked
//! before building a mosaic.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::Printer;
use crate::render::render_preview;
use crate::validation::{check_images, print_diagnostics};
use crate::workspace::Workspace;

/// List the emojis include.txt selects
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Workspace directory (default: current directory)
    #[arg(default_value = ".")]
    pub workspace: PathBuf,

    /// Match /regex/ emoji lines only within the current servers
    #[arg(long)]
    pub scoped_regex: bool,
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    run_to(args, printer, &mut std::io::stdout().lock())
}

fn run_to(args: PreviewArgs, printer: &Printer, out: &mut impl Write) -> Result<()> {
    let workspace = Workspace::new(&args.workspace);
    let manifest = workspace.manifest()?;
    let scope = super::regex_scope(manifest.regex_scope, args.scoped_regex);

    let selected = super::load_selection(&workspace, scope, printer)?;

    out.write_all(render_preview(&selected).as_bytes())?;
    print_diagnostics(&check_images(&selected, &workspace.images()), printer);

    Ok(())
}
