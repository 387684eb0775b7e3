//! Tile sampling.
//!
//! Turns emoji images and the source image into batches of fixed-size HSV
//! tiles. A batch is an `(tiles, 3, pixels)` array: channel 0 is hue, 1 is
//! saturation, 2 is value, each in `0..=255`, and pixels run row-major
//! within a tile.

use clap::ValueEnum;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use ndarray::{Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::types::Colour;

/// Number of colour channels in a tile.
pub const CHANNELS: usize = 3;

/// Width and height of a tile in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn pixels(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Resampling filter used when scaling images down to tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    Bicubic,
    Gaussian,
    #[default]
    Lanczos,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::Bicubic => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// A batch of HSV tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TileBatch {
    data: Array3<i32>,
    size: TileSize,
}

impl TileBatch {
    /// Build a batch from equally sized, already flattened images.
    pub fn from_images(images: &[RgbImage], size: TileSize) -> Self {
        let mut data = Array3::zeros((images.len(), CHANNELS, size.pixels()));

        for (mut tile, image) in data.axis_iter_mut(Axis(0)).zip(images) {
            debug_assert_eq!(image.dimensions(), (size.width, size.height));
            for (p, pixel) in image.pixels().enumerate() {
                let hsv = Colour::rgb(pixel[0], pixel[1], pixel[2]).to_hsv_bytes();
                for (c, value) in hsv.into_iter().enumerate() {
                    tile[[c, p]] = value as i32;
                }
            }
        }

        Self { data, size }
    }

    /// Cut an image of `columns * width` by `rows * height` pixels into
    /// a row-major batch of `rows * columns` tiles.
    pub fn from_grid(image: &RgbImage, size: TileSize, columns: u32, rows: u32) -> Self {
        debug_assert_eq!(
            image.dimensions(),
            (columns * size.width, rows * size.height)
        );
        let count = columns as usize * rows as usize;
        let mut data = Array3::zeros((count, CHANNELS, size.pixels()));

        for (x, y, pixel) in image.enumerate_pixels() {
            let tile = (y / size.height) as usize * columns as usize + (x / size.width) as usize;
            let p = (y % size.height) as usize * size.width as usize + (x % size.width) as usize;
            let hsv = Colour::rgb(pixel[0], pixel[1], pixel[2]).to_hsv_bytes();
            for (c, value) in hsv.into_iter().enumerate() {
                data[[tile, c, p]] = value as i32;
            }
        }

        Self { data, size }
    }

    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    /// The `(3, pixels)` view of one tile.
    pub fn tile(&self, index: usize) -> ArrayView2<'_, i32> {
        self.data.index_axis(Axis(0), index)
    }

    pub(crate) fn data(&self) -> &Array3<i32> {
        &self.data
    }
}

/// Scale an image to exactly `width` by `height` and flatten any
/// transparency onto `background`.
pub fn resample_onto(
    image: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
    background: Colour,
) -> RgbImage {
    let rgba = image.to_rgba8();
    let resized = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        imageops::resize(&rgba, width, height, filter.into())
    };
    flatten(&resized, background)
}

/// Composite an RGBA image onto an opaque background.
pub fn flatten(image: &RgbaImage, background: Colour) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        image::Rgb(background.blend_under(image.get_pixel(x, y).0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn test_from_images_converts_to_hsv() {
        let red = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let blue = RgbImage::from_pixel(2, 2, Rgb([0, 0, 255]));

        let batch = TileBatch::from_images(&[red, blue], TileSize::square(2));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.tile(0).shape(), &[3, 4]);
        assert!(batch.tile(0).row(0).iter().all(|&h| h == 0));
        assert!(batch.tile(1).row(0).iter().all(|&h| h == 170));
        assert!(batch.tile(1).row(2).iter().all(|&v| v == 255));
    }

    #[test]
    fn test_from_grid_is_row_major() {
        // 2 columns x 2 rows of 1x2 tiles; each tile a distinct grey level.
        let size = TileSize::new(1, 2);
        let image = RgbImage::from_fn(2, 4, |x, y| {
            let v = ((y / 2) * 2 + x) as u8 * 50;
            Rgb([v, v, v])
        });

        let batch = TileBatch::from_grid(&image, size, 2, 2);

        assert_eq!(batch.len(), 4);
        for tile in 0..4 {
            let values = batch.tile(tile).row(2).to_vec();
            assert_eq!(values, vec![tile as i32 * 50; 2]);
        }
    }

    #[test]
    fn test_resample_onto_flattens_transparency() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));

        let out = resample_onto(&image, 2, 2, ResampleFilter::Nearest, Colour::DISCORD_DARK);

        assert_eq!(out.dimensions(), (2, 2));
        assert!(out.pixels().all(|p| p.0 == Colour::DISCORD_DARK.to_rgb()));
    }

    #[test]
    fn test_resample_filter_names() {
        let filter: ResampleFilter = serde_yaml::from_str("bicubic").unwrap();
        assert_eq!(filter, ResampleFilter::Bicubic);
        assert_eq!(FilterType::from(ResampleFilter::default()), FilterType::Lanczos3);
    }
}
