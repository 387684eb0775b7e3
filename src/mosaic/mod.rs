//! Mosaic matching engine.
//!
//! Builds a grid of emojis whose colours follow a source image:
//!
//! 1. Every candidate emoji is scaled to one tile and converted to HSV.
//! 2. The source is scaled to `grid_width` by `grid_height` tiles and cut up.
//! 3. Each source tile gets the candidate with the smallest weighted L1
//!    distance (see [`matcher`]).
//!
//! Matching happens at `tile_size`, which is usually much smaller than the
//! emoji images themselves; the composite renderer uses full-size images.

mod grid;
mod images;
pub mod matcher;
pub mod tile;

pub use grid::OutputGrid;
pub use images::{DirectoryImages, EmojiImages};
pub use matcher::{nearest_tiles, nearest_tiles_reference, ChannelWeights};
pub use tile::{ResampleFilter, TileBatch, TileSize};

use image::DynamicImage;

use crate::error::{MosaicError, Result};
use crate::types::{Colour, EmojiRecord};

/// Parameters for [`build_mosaic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicParams {
    /// Width of the mosaic in emojis
    pub grid_width: u32,
    /// Size each emoji and source cell is scaled to before comparison
    pub tile_size: TileSize,
    pub filter: ResampleFilter,
    pub weights: ChannelWeights,
    /// Colour that transparent pixels are flattened onto
    pub background: Colour,
}

impl MosaicParams {
    pub fn new(grid_width: u32, tile_size: TileSize) -> Self {
        Self {
            grid_width,
            tile_size,
            filter: ResampleFilter::default(),
            weights: ChannelWeights::default(),
            background: Colour::DISCORD_DARK,
        }
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_weights(mut self, weights: ChannelWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_background(mut self, background: Colour) -> Self {
        self.background = background;
        self
    }
}

/// Number of emoji rows for a source image: `floor(height / width * grid_width)`.
pub fn grid_height(source_width: u32, source_height: u32, grid_width: u32) -> Result<u32> {
    if source_width == 0 || source_height == 0 {
        return Err(MosaicError::Dimension {
            message: format!("source image is {}x{}", source_width, source_height),
        });
    }

    let rows = source_height as u64 * grid_width as u64 / source_width as u64;
    if rows == 0 {
        return Err(MosaicError::Dimension {
            message: format!(
                "a {}x{} source is less than one row tall at {} emojis wide",
                source_width, source_height, grid_width
            ),
        });
    }

    u32::try_from(rows).map_err(|_| MosaicError::Dimension {
        message: format!("{} rows is too many", rows),
    })
}

/// Build a mosaic of `emojis` that follows `source`.
///
/// Candidate order decides ties: the earliest emoji wins. Fails before any
/// image work on bad dimensions, non-finite weights or an empty selection,
/// and with [`MosaicError::MissingAsset`] if any emoji image cannot be loaded.
pub fn build_mosaic(
    emojis: &[EmojiRecord],
    images: &impl EmojiImages,
    source: &DynamicImage,
    params: &MosaicParams,
) -> Result<OutputGrid> {
    let MosaicParams {
        grid_width,
        tile_size,
        filter,
        weights,
        background,
    } = *params;

    if grid_width == 0 {
        return Err(MosaicError::Dimension {
            message: "grid width must be at least 1".to_string(),
        });
    }
    if tile_size.width == 0 || tile_size.height == 0 {
        return Err(MosaicError::Dimension {
            message: format!(
                "tile size must be at least 1x1, got {}x{}",
                tile_size.width, tile_size.height
            ),
        });
    }
    if !weights.is_finite() {
        return Err(MosaicError::Config {
            message: format!("channel weights must be finite numbers, got {:?}", weights),
            help: None,
        });
    }
    if emojis.is_empty() {
        return Err(MosaicError::EmptySelection);
    }
    let rows = grid_height(source.width(), source.height(), grid_width)?;

    let scaled_size = grid_width
        .checked_mul(tile_size.width)
        .zip(rows.checked_mul(tile_size.height))
        .ok_or_else(|| MosaicError::Dimension {
            message: format!(
                "{}x{} tiles of {}x{} pixels is too large",
                grid_width, rows, tile_size.width, tile_size.height
            ),
        })?;

    let candidates = candidate_tiles(emojis, images, tile_size, filter, background)?;

    let scaled = tile::resample_onto(source, scaled_size.0, scaled_size.1, filter, background);
    let sources = TileBatch::from_grid(&scaled, tile_size, grid_width, rows);

    let assignments = nearest_tiles(&candidates, &sources, weights);
    Ok(OutputGrid::from_assignments(emojis, &assignments, grid_width as usize))
}

/// Load and sample every candidate emoji. All images are loaded before
/// any matching starts.
fn candidate_tiles(
    emojis: &[EmojiRecord],
    images: &impl EmojiImages,
    size: TileSize,
    filter: ResampleFilter,
    background: Colour,
) -> Result<TileBatch> {
    let tiles = emojis
        .iter()
        .map(|emoji| {
            let image = images.load(emoji)?;
            Ok(tile::resample_onto(&image, size.width, size.height, filter, background))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TileBatch::from_images(&tiles, size))
}
