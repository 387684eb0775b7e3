//! Composite image output.
//!
//! Pastes each chosen emoji at full size, giving a picture of how the
//! mosaic will look in chat. Matching usually runs on much smaller tiles;
//! rendering always uses the catalog's canonical emoji size.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::error::{MosaicError, Result};
use crate::mosaic::{tile, EmojiImages, OutputGrid, ResampleFilter};
use crate::types::Colour;

/// Size of the emoji images Discord serves.
pub const EMOJI_SIZE: u32 = 96;

/// Assemble a grid into one image of `emoji_size` squares.
///
/// Each distinct emoji is loaded and fitted once, however many cells use it.
pub fn render_composite(
    grid: &OutputGrid,
    images: &impl EmojiImages,
    emoji_size: u32,
    background: Colour,
) -> Result<RgbImage> {
    let (width, height) = canvas_size(grid, emoji_size)?;
    let mut canvas = RgbImage::from_pixel(width, height, image::Rgb(background.to_rgb()));

    let mut squares: HashMap<u64, RgbImage> = HashMap::new();
    for emoji in grid.cells() {
        if !squares.contains_key(&emoji.id) {
            let image = images.load(emoji)?;
            squares.insert(emoji.id, fit_square(&image, emoji_size, background));
        }
    }

    for (row, emojis) in grid.iter_rows().enumerate() {
        for (column, emoji) in emojis.iter().enumerate() {
            if let Some(square) = squares.get(&emoji.id) {
                imageops::replace(
                    &mut canvas,
                    square,
                    column as i64 * emoji_size as i64,
                    row as i64 * emoji_size as i64,
                );
            }
        }
    }

    Ok(canvas)
}

/// Pixel size of the composite, or a `Dimension` error if it does not fit in `u32`.
fn canvas_size(grid: &OutputGrid, emoji_size: u32) -> Result<(u32, u32)> {
    let side = |count: usize| {
        u32::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(emoji_size))
    };

    side(grid.columns())
        .zip(side(grid.rows()))
        .ok_or_else(|| MosaicError::Dimension {
            message: format!(
                "a {}x{} composite of {}px emojis is too large",
                grid.columns(),
                grid.rows(),
                emoji_size
            ),
        })
}

/// Normalise an emoji image to a `size` square: flatten onto the
/// background, shrink to fit if needed and centre it.
pub fn fit_square(image: &DynamicImage, size: u32, background: Colour) -> RgbImage {
    if image.width() == size && image.height() == size {
        return tile::flatten(&image.to_rgba8(), background);
    }

    let scaled = if image.width() > size || image.height() > size {
        image.resize(size, size, FilterType::Lanczos3)
    } else {
        image.clone()
    };
    let flat = tile::flatten(&scaled.to_rgba8(), background);

    let mut square = RgbImage::from_pixel(size, size, image::Rgb(background.to_rgb()));
    let x = (size - flat.width()) / 2;
    let y = (size - flat.height()) / 2;
    imageops::replace(&mut square, &flat, x as i64, y as i64);
    square
}

/// Scale an image to `width`, keeping its aspect ratio.
pub fn resize_to_width(image: &RgbImage, width: u32, filter: ResampleFilter) -> RgbImage {
    let width = width.max(1);
    let height = (image.height() as f64 / image.width().max(1) as f64 * width as f64).round() as u32;
    imageops::resize(image, width, height.max(1), filter.into())
}
