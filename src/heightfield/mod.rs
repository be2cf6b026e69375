//! Heightfield sampling — resizes a raster image into a fixed-resolution
//! square brightness field and splits it into per-chunk tiles.

use std::path::Path;

use image::imageops::FilterType;

use crate::core::types::Result;

/// Side length of the resampled heightfield, in samples
pub const HEIGHTFIELD_SIZE: usize = 128;

/// Square 2D grid of brightness samples in [0, 1].
///
/// Produced once per input image and immutable thereafter.
#[derive(Clone, Debug)]
pub struct Heightfield {
    size: usize,
    samples: Vec<f32>,
}

impl Heightfield {
    /// Load a heightfield from a raster image.
    ///
    /// The source is resized (without preserving aspect) to a
    /// `HEIGHTFIELD_SIZE` square; brightness is the 8-bit luma over 255.
    /// An unreadable or undecodable image is fatal to the whole pipeline.
    pub fn from_image(path: impl AsRef<Path>) -> Result<Self> {
        let img = image::open(path)?;
        let resized = img.resize_exact(
            HEIGHTFIELD_SIZE as u32,
            HEIGHTFIELD_SIZE as u32,
            FilterType::Triangle,
        );
        let luma = resized.to_luma8();
        let samples = luma.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
        Ok(Self {
            size: HEIGHTFIELD_SIZE,
            samples,
        })
    }

    /// Build directly from samples (tests and synthetic worlds).
    ///
    /// Panics if `samples.len() != size * size`.
    pub fn from_samples(size: usize, samples: Vec<f32>) -> Self {
        assert_eq!(samples.len(), size * size, "sample count must be size^2");
        Self { size, samples }
    }

    /// Side length of the heightfield in samples.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Brightness at (x, y), in [0, 1].
    pub fn brightness(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.size + x]
    }

    /// Split into `(size / tile_size)^2` non-overlapping square tiles.
    ///
    /// Tile `i * n + j` covers x in `[i*t, (i+1)*t)` and y in
    /// `[j*t, (j+1)*t)` — the same column-fastest scan order the chunk grid
    /// bijection uses, so tile k becomes chunk k.
    pub fn tiles(&self, tile_size: usize) -> Vec<Tile> {
        let n = self.size / tile_size;
        let mut tiles = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let mut samples = Vec::with_capacity(tile_size * tile_size);
                for y in 0..tile_size {
                    for x in 0..tile_size {
                        samples.push(self.brightness(i * tile_size + x, j * tile_size + y));
                    }
                }
                tiles.push(Tile {
                    size: tile_size,
                    samples,
                });
            }
        }
        tiles
    }
}

/// A contiguous square sub-region of the heightfield, one per future chunk.
#[derive(Clone, Debug)]
pub struct Tile {
    size: usize,
    samples: Vec<f32>,
}

impl Tile {
    /// Side length of the tile in samples.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Brightness at (x, y) within the tile, in [0, 1].
    pub fn brightness(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.size + x]
    }
}
