//! discmos - Discord emoji mosaic generator
//!
//! Picks emojis with a small selection script, then rebuilds a source image
//! as a grid of those emojis by nearest colour in weighted HSV space.

pub mod cli;
pub mod error;
pub mod mosaic;
pub mod output;
pub mod parser;
pub mod render;
pub mod selection;
pub mod types;
pub mod validation;
pub mod workspace;

pub use error::{MosaicError, Result};
pub use mosaic::{
    build_mosaic, grid_height, ChannelWeights, DirectoryImages, EmojiImages, MosaicParams,
    OutputGrid, ResampleFilter, TileSize,
};
pub use parser::{load_catalog, parse_catalog, parse_script};
pub use render::{render_composite, render_preview, render_text, write_png};
pub use selection::{select, select_with, RegexScope, SelectOptions};
pub use types::{Catalog, Colour, EmojiRecord};
pub use validation::{validate_catalog, Diagnostic, Severity, ValidationResult};
pub use workspace::{Manifest, Workspace};
