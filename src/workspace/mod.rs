//! Workspace layout for discmos.
//!
//! A workspace is a directory holding everything one mosaic project needs:
//!
//! ```text
//! workspace/
//!   discmos.yaml       manifest (optional)
//!   emoji-data.json    catalog written by the scraper
//!   include.txt        selection script
//!   emojis/<id>.png    emoji images
//!   sources/           source images
//!   output-text/       saved mosaic text
//!   output-images/     composite images
//! ```

mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MosaicError, Result};
use crate::mosaic::DirectoryImages;
use crate::parser::load_catalog;
use crate::types::Catalog;

pub use manifest::{format_suffix, Manifest, DEFAULT_SUFFIX};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "discmos.yaml";

pub const CATALOG_FILENAME: &str = "emoji-data.json";

pub const SCRIPT_FILENAME: &str = "include.txt";

/// Selection script written by `init`.
pub const DEFAULT_INCLUDE: &str = "\
+ all
// Replace with \"- all\" to include no emojis by default
// Use + \"<server name>\" or - \"<server name>\" to include or exclude servers
// and indent + \"<emoji name>\" or - /<regex>/ under a server for single emojis
";

const EMOJI_DIR: &str = "emojis";
const SOURCE_DIR: &str = "sources";
const TEXT_DIR: &str = "output-text";
const IMAGE_DIR: &str = "output-images";

/// What [`Workspace::init`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Files and directories that were newly written.
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left alone.
    pub kept: Vec<PathBuf>,
}

/// A discmos workspace rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILENAME)
    }

    pub fn script_path(&self) -> PathBuf {
        self.root.join(SCRIPT_FILENAME)
    }

    pub fn emoji_dir(&self) -> PathBuf {
        self.root.join(EMOJI_DIR)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    pub fn text_dir(&self) -> PathBuf {
        self.root.join(TEXT_DIR)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMAGE_DIR)
    }

    /// Create the workspace directories, default script and manifest.
    ///
    /// An existing include.txt is never touched. An existing manifest is
    /// only replaced when `force` is set.
    pub fn init(&self, force: bool) -> Result<InitReport> {
        let mut report = InitReport::default();

        for dir in [
            self.root.clone(),
            self.emoji_dir(),
            self.source_dir(),
            self.text_dir(),
            self.image_dir(),
        ] {
            if !dir.is_dir() {
                fs::create_dir_all(&dir).map_err(|e| MosaicError::Io {
                    path: dir.clone(),
                    message: format!("Failed to create directory: {}", e),
                })?;
                report.created.push(dir);
            }
        }

        let script = self.script_path();
        if script.exists() {
            report.kept.push(script);
        } else {
            write_file(&script, DEFAULT_INCLUDE)?;
            report.created.push(script);
        }

        let manifest = self.manifest_path();
        if manifest.exists() && !force {
            report.kept.push(manifest);
        } else {
            write_file(&manifest, &Manifest::default().to_yaml()?)?;
            report.created.push(manifest);
        }

        Ok(report)
    }

    /// Load discmos.yaml, or defaults if there is none.
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::load_or_default(&self.manifest_path())
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        load_catalog(&self.catalog_path())
    }

    pub fn read_script(&self) -> Result<String> {
        let path = self.script_path();
        fs::read_to_string(&path).map_err(|e| MosaicError::Io {
            path,
            message: format!("Failed to read selection script: {}", e),
        })
    }

    /// Emoji images stored in `emojis/`.
    pub fn images(&self) -> DirectoryImages {
        DirectoryImages::new(self.emoji_dir())
    }

    /// Resolve a source image: a name inside `sources/`, else the path as given.
    pub fn source_path(&self, name: &Path) -> PathBuf {
        let in_sources = self.source_dir().join(name);
        if in_sources.is_file() {
            in_sources
        } else {
            name.to_path_buf()
        }
    }

    /// Text output path for a source image, e.g. `output-text/cat_mosaic_40_8_1_1_1.txt`.
    pub fn text_output(&self, source: &Path, suffix: &str) -> PathBuf {
        self.text_dir().join(format!("{}{}.txt", file_stem(source), suffix))
    }

    /// Composite output path for a source image.
    pub fn image_output(&self, source: &Path, suffix: &str) -> PathBuf {
        self.image_dir().join(format!("{}{}.png", file_stem(source), suffix))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mosaic".to_string())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| MosaicError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}
