//! Mosaic command implementation.
//!
//! Selects emojis, matches them against a source image and writes the
//! result as paste-able text or as a composite PNG.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::error::{MosaicError, Result};
use crate::mosaic::{build_mosaic, MosaicParams, OutputGrid, ResampleFilter};
use crate::output::{display_path, plural, Printer};
use crate::render::{
    fits_in_message, render_composite, render_text, resize_to_width, write_png, MESSAGE_LIMIT,
};
use crate::workspace::{format_suffix, Manifest, Workspace};

/// Build a mosaic of a source image
#[derive(Args, Debug)]
pub struct MosaicArgs {
    /// Workspace directory
    pub workspace: PathBuf,

    /// Source image, a name in sources/ or any path
    pub source: PathBuf,

    /// Mosaic width in emojis [manifest default: 40]
    pub width: Option<u32>,

    /// Tile size used for matching [manifest default: 8]
    pub resize: Option<u32>,

    /// Weight of hue differences
    #[arg(long)]
    pub hue_weight: Option<f64>,

    /// Weight of saturation differences
    #[arg(long)]
    pub saturation_weight: Option<f64>,

    /// Weight of value (brightness) differences
    #[arg(long)]
    pub value_weight: Option<f64>,

    /// Resampling filter for tiles and the source image
    #[arg(long, value_enum)]
    pub resample: Option<ResampleFilter>,

    /// Output name suffix; {we} {r} {hw} {sw} {vw} are replaced
    #[arg(long)]
    pub suffix: Option<String>,

    /// Match /regex/ emoji lines only within the current servers
    #[arg(long)]
    pub scoped_regex: bool,

    #[command(subcommand)]
    pub output: MosaicOutput,
}

#[derive(Subcommand, Debug)]
pub enum MosaicOutput {
    /// Print the mosaic as emoji shortcodes
    Text(TextArgs),

    /// Render the mosaic as an image
    Composite(CompositeArgs),
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Also write the text to output-text/
    #[arg(long)]
    pub save: bool,
}

#[derive(Args, Debug)]
pub struct CompositeArgs {
    /// Width of the written image in pixels
    pub resize_width: u32,

    /// Write here instead of output-images/
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: MosaicArgs, printer: &Printer) -> Result<()> {
    run_to(args, printer, &mut std::io::stdout().lock())
}

fn run_to(args: MosaicArgs, printer: &Printer, out: &mut impl Write) -> Result<()> {
    let workspace = Workspace::new(&args.workspace);
    let manifest = settings(&args, workspace.manifest()?)?;
    let source = workspace.source_path(&args.source);
    let grid = make_grid(&manifest, &workspace, &source, printer)?;
    let suffix = format_suffix(&manifest.suffix, manifest.width, manifest.resize, manifest.weights());

    match &args.output {
        MosaicOutput::Text(text_args) => {
            let text = render_text(&grid);
            out.write_all(text.as_bytes())?;

            if !fits_in_message(&text) {
                printer.warning(
                    "warning",
                    &format!(
                        "mosaic is {} characters, over Discord's {} character message limit",
                        text.trim_end().chars().count(),
                        MESSAGE_LIMIT
                    ),
                );
            }

            if text_args.save {
                let path = workspace.text_output(&source, &suffix);
                write_text(&path, &text)?;
                printer.status("Wrote", &display_path(&path));
            }
        }
        MosaicOutput::Composite(composite_args) => {
            printer.status("Rendering", &format!("{} emojis", grid.cells().len()));
            let image = render_composite(
                &grid,
                &workspace.images(),
                manifest.emoji_size,
                manifest.background,
            )?;
            let image = resize_to_width(&image, composite_args.resize_width, manifest.resample);

            let path = composite_args
                .output
                .clone()
                .unwrap_or_else(|| workspace.image_output(&source, &suffix));
            write_png(&image, &path)?;
            printer.status(
                "Wrote",
                &format!("{} ({}x{})", display_path(&path), image.width(), image.height()),
            );
        }
    }

    Ok(())
}

/// Manifest values with command-line overrides applied.
fn settings(args: &MosaicArgs, mut manifest: Manifest) -> Result<Manifest> {
    if let Some(width) = args.width {
        manifest.width = width;
    }
    if let Some(resize) = args.resize {
        manifest.resize = resize;
    }
    if let Some(weight) = args.hue_weight {
        manifest.hue_weight = weight;
    }
    if let Some(weight) = args.saturation_weight {
        manifest.saturation_weight = weight;
    }
    if let Some(weight) = args.value_weight {
        manifest.value_weight = weight;
    }
    if let Some(filter) = args.resample {
        manifest.resample = filter;
    }
    if let Some(suffix) = &args.suffix {
        manifest.suffix = suffix.clone();
    }
    manifest.regex_scope = super::regex_scope(manifest.regex_scope, args.scoped_regex);

    manifest.validate()?;
    Ok(manifest)
}

fn make_grid(
    manifest: &Manifest,
    workspace: &Workspace,
    source: &Path,
    printer: &Printer,
) -> Result<OutputGrid> {
    let selected = super::load_selection(workspace, manifest.regex_scope, printer)?;
    let emojis: Vec<_> = selected.into_iter().collect();

    printer.status("Loading", &display_path(source));
    let image = image::open(source).map_err(|e| MosaicError::Io {
        path: source.to_path_buf(),
        message: format!("Failed to open source image: {}", e),
    })?;

    let params = MosaicParams::new(manifest.width, manifest.tile_size())
        .with_filter(manifest.resample)
        .with_weights(manifest.weights())
        .with_background(manifest.background);

    printer.status(
        "Matching",
        &format!(
            "{} wide against {}",
            plural(manifest.width as usize, "column", "columns"),
            plural(emojis.len(), "emoji", "emojis")
        ),
    );
    let grid = build_mosaic(&emojis, &workspace.images(), &image, &params)?;
    printer.status("Built", &format!("{}x{} mosaic", grid.columns(), grid.rows()));

    Ok(grid)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MosaicError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    fs::write(path, text).map_err(|e| MosaicError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write mosaic text: {}", e),
    })
}
