pub mod completions;
pub mod init;
pub mod mosaic;
pub mod preview;

use std::collections::BTreeSet;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::selection::{select_with, RegexScope, SelectOptions};
use crate::types::EmojiRecord;
use crate::validation::{print_diagnostics, validate_catalog};
use crate::workspace::Workspace;

/// discmos - Discord emoji mosaic generator
#[derive(Parser, Debug)]
#[command(name = "discmos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a workspace (directories, include.txt, discmos.yaml)
    Init(init::InitArgs),

    /// List the emojis include.txt selects
    Preview(preview::PreviewArgs),

    /// Build a mosaic of a source image
    Mosaic(mosaic::MosaicArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the catalog, report its diagnostics and evaluate include.txt.
fn load_selection(
    workspace: &Workspace,
    regex_scope: RegexScope,
    printer: &Printer,
) -> Result<BTreeSet<EmojiRecord>> {
    printer.status("Loading", &display_path(&workspace.catalog_path()));
    let catalog = workspace.load_catalog()?;
    print_diagnostics(&validate_catalog(&catalog), printer);

    let script = workspace.read_script()?;
    let selected = select_with(&catalog, &script, SelectOptions { regex_scope })?;

    printer.status(
        "Selected",
        &format!("{} of {}", plural(selected.len(), "emoji", "emojis"), catalog.len()),
    );

    Ok(selected)
}

/// The regex scope from the manifest, narrowed by `--scoped-regex`.
fn regex_scope(manifest_scope: RegexScope, scoped_flag: bool) -> RegexScope {
    if scoped_flag {
        RegexScope::CurrentServers
    } else {
        manifest_scope
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mosaic_with_positionals_and_subcommand() {
        let cli = Cli::try_parse_from([
            "discmos", "mosaic", "ws", "cat.png", "20", "4", "--hue-weight", "2", "text", "--save",
        ])
        .unwrap();

        let Commands::Mosaic(args) = cli.command else {
            panic!("expected mosaic command");
        };
        assert_eq!(args.width, Some(20));
        assert_eq!(args.resize, Some(4));
        assert_eq!(args.hue_weight, Some(2.0));
        assert!(matches!(args.output, mosaic::MosaicOutput::Text(ref t) if t.save));
    }

    #[test]
    fn test_regex_scope_flag() {
        assert_eq!(regex_scope(RegexScope::Catalog, false), RegexScope::Catalog);
        assert_eq!(regex_scope(RegexScope::Catalog, true), RegexScope::CurrentServers);
        assert_eq!(regex_scope(RegexScope::CurrentServers, false), RegexScope::CurrentServers);
    }

    #[test]
    fn test_load_selection() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = test_workspace::create(dir.path(), "- all\n\"A\"\n    + /^r/\n");

        let selected = load_selection(&workspace, RegexScope::Catalog, &Printer::plain()).unwrap();

        let names: Vec<_> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["red"]);
    }
}
