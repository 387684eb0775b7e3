//! Nearest-tile matching.
//!
//! The distance between two tiles is a weighted L1 distance:
//!
//! ```text
//! d = hue_weight * Σ|ΔH| + saturation_weight * Σ|ΔS| + value_weight * Σ|ΔV|
//! ```
//!
//! Per-channel sums are exact `i64` values; only the final weighting is done
//! in floating point, always in the same order, so the bulk and reference
//! matchers agree bit for bit.

use ndarray::{ArrayView1, Axis};

use super::tile::{TileBatch, CHANNELS};

/// Candidate tiles compared against one source tile at a time. Bounds the
/// size of the broadcast difference array.
const CANDIDATE_CHUNK: usize = 256;

/// How strongly each HSV channel counts towards the match distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl ChannelWeights {
    pub const fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.hue.is_finite() && self.saturation.is_finite() && self.value.is_finite()
    }

    /// Combine exact per-channel L1 sums into one distance.
    pub fn distance(&self, sums: [i64; CHANNELS]) -> f64 {
        self.hue * sums[0] as f64 + self.saturation * sums[1] as f64 + self.value * sums[2] as f64
    }
}

/// For each source tile, the index of the closest candidate tile.
///
/// Ties go to the earliest candidate. Each source tile is compared against
/// whole chunks of candidates with one broadcast subtraction.
pub fn nearest_tiles(
    candidates: &TileBatch,
    sources: &TileBatch,
    weights: ChannelWeights,
) -> Vec<usize> {
    let mut nearest = Vec::with_capacity(sources.len());

    for source in sources.data().axis_iter(Axis(0)) {
        let source = source.insert_axis(Axis(0));
        let mut best: Option<(usize, f64)> = None;

        for (chunk_index, chunk) in candidates
            .data()
            .axis_chunks_iter(Axis(0), CANDIDATE_CHUNK)
            .enumerate()
        {
            let diff = (&chunk - &source).mapv_into(i32::abs);
            let sums = diff.fold_axis(Axis(2), 0i64, |acc, &d| acc + d as i64);

            let distances = sums.map_axis(Axis(1), |row: ArrayView1<'_, i64>| {
                weights.distance([row[0], row[1], row[2]])
            });

            let offset = chunk_index * CANDIDATE_CHUNK;
            for (i, &distance) in distances.iter().enumerate() {
                if best.map_or(true, |(_, d)| distance < d) {
                    best = Some((offset + i, distance));
                }
            }
        }

        nearest.push(best.map_or(0, |(index, _)| index));
    }

    nearest
}

/// Straightforward nested-loop version of [`nearest_tiles`].
///
/// Slow, but obviously correct; the bulk matcher is tested against it.
pub fn nearest_tiles_reference(
    candidates: &TileBatch,
    sources: &TileBatch,
    weights: ChannelWeights,
) -> Vec<usize> {
    let mut nearest = Vec::with_capacity(sources.len());

    for s in 0..sources.len() {
        let source = sources.tile(s);
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;

        for c in 0..candidates.len() {
            let candidate = candidates.tile(c);
            let mut sums = [0i64; CHANNELS];
            for (channel, sum) in sums.iter_mut().enumerate() {
                for p in 0..source.len_of(Axis(1)) {
                    *sum += (source[[channel, p]] - candidate[[channel, p]]).abs() as i64;
                }
            }

            let distance = weights.distance(sums);
            if c == 0 || distance < best_distance {
                best_index = c;
                best_distance = distance;
            }
        }

        nearest.push(best_index);
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::tile::TileSize;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn solid(colour: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(2, 2, Rgb(colour))
    }

    fn batch(colours: &[[u8; 3]]) -> TileBatch {
        let images: Vec<_> = colours.iter().map(|&c| solid(c)).collect();
        TileBatch::from_images(&images, TileSize::square(2))
    }

    #[test]
    fn test_exact_match_wins() {
        let candidates = batch(&[[0, 0, 255], [255, 0, 0]]);
        let sources = batch(&[[255, 0, 0], [0, 0, 250]]);

        let nearest = nearest_tiles(&candidates, &sources, ChannelWeights::default());
        assert_eq!(nearest, vec![1, 0]);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let candidates = batch(&[[10, 10, 10], [10, 10, 10], [10, 10, 10]]);
        let sources = batch(&[[200, 200, 200]]);

        assert_eq!(nearest_tiles(&candidates, &sources, ChannelWeights::default()), vec![0]);
        assert_eq!(
            nearest_tiles_reference(&candidates, &sources, ChannelWeights::default()),
            vec![0]
        );
    }

    #[test]
    fn test_single_candidate_always_chosen() {
        let candidates = batch(&[[1, 2, 3]]);
        let sources = batch(&[[255, 255, 255], [0, 0, 0], [90, 10, 200]]);

        assert_eq!(
            nearest_tiles(&candidates, &sources, ChannelWeights::default()),
            vec![0, 0, 0]
        );
    }

    #[test]
    fn test_weights_select_channel() {
        // Candidate 0 matches the source hue but has the wrong value;
        // candidate 1 has the right value but the wrong hue.
        let candidates = batch(&[[128, 0, 0], [0, 0, 255]]);
        let sources = batch(&[[255, 0, 0]]);

        let hue_only = ChannelWeights::new(1000.0, 0.0, 0.0);
        assert_eq!(nearest_tiles(&candidates, &sources, hue_only), vec![0]);

        let value_only = ChannelWeights::new(0.0, 0.0, 1000.0);
        assert_eq!(nearest_tiles(&candidates, &sources, value_only), vec![1]);
    }

    #[test]
    fn test_bulk_matches_reference_across_chunks() {
        // More candidates than one chunk, with pseudo-random colours.
        let mut state = 0x2545_f491_u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };

        let size = TileSize::new(3, 2);
        let random_image = |next: &mut dyn FnMut() -> u8| {
            RgbImage::from_fn(size.width, size.height, |_, _| Rgb([next(), next(), next()]))
        };

        let candidates: Vec<_> = (0..CANDIDATE_CHUNK + 37).map(|_| random_image(&mut next)).collect();
        let sources: Vec<_> = (0..24).map(|_| random_image(&mut next)).collect();
        let candidates = TileBatch::from_images(&candidates, size);
        let sources = TileBatch::from_images(&sources, size);

        for weights in [
            ChannelWeights::default(),
            ChannelWeights::new(0.5, 2.0, 0.1),
            ChannelWeights::new(0.0, 0.0, 1.0),
            ChannelWeights::new(3.0, -1.0, 0.25),
        ] {
            assert_eq!(
                nearest_tiles(&candidates, &sources, weights),
                nearest_tiles_reference(&candidates, &sources, weights),
                "{weights:?}"
            );
        }
    }

    #[test]
    fn test_distance_weighting() {
        let weights = ChannelWeights::new(2.0, 0.5, 0.0);
        assert_eq!(weights.distance([10, 10, 1_000_000]), 25.0);
        assert!(ChannelWeights::default().is_finite());
        assert!(!ChannelWeights::new(f64::NAN, 1.0, 1.0).is_finite());
    }
}
