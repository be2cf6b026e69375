//! Procedural forest scatter and per-chunk tree bucketing
//!
//! Trees are placed from the same heightfield the voxel grids consume, then
//! bucketed into the chunk grid through the topology's chunk-center table so
//! vicinity display can cull them alongside chunks.

pub mod mesh;

use std::collections::HashMap;

use glam::Vec3;
use rand::Rng;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::heightfield::Heightfield;
use crate::voxel::{CHUNK_SIZE, Mesh};
use crate::world::topology::ChunkTopology;

/// Placement probability inside the foothill band.
const FOOTHILL_TREE_PROBABILITY: f64 = 0.09;

/// Placement probability inside the highland band.
const HIGHLAND_TREE_PROBABILITY: f64 = 0.035;

/// A single placed tree, independent of any chunk until bucketed.
#[derive(Clone, Debug)]
pub struct TreeInstance {
    /// World-space base of the trunk, centered on its heightfield sample
    /// and one unit above the terrain column.
    pub position: Vec3,
    /// Trunk height in world units.
    pub height: f32,
    /// Crown color (RGB).
    pub crown_color: [u8; 3],
}

/// Scatters trees across the heightfield using band-gated Bernoulli trials.
pub struct ForestPlacer {
    world_height: usize,
    scaling: f64,
}

impl ForestPlacer {
    pub fn new(world_height: usize, scaling: f64) -> Self {
        Self {
            world_height,
            scaling,
        }
    }

    /// Terrain column height for a brightness sample, matching the voxel
    /// grid's fill threshold.
    fn column_height(&self, brightness: f32) -> f64 {
        (brightness as f64 * self.world_height as f64 * self.scaling).floor()
    }

    /// Scatter trees over every heightfield sample.
    ///
    /// Foothills place at p = 0.09 with mid-green crowns; highlands at
    /// p = 0.035 with autumnal crowns. Outside both bands no trial is made.
    /// Trunk heights are uniform in [1, 3). A seeded `rng` reproduces the
    /// exact same forest.
    pub fn place(&self, heightfield: &Heightfield, rng: &mut impl Rng) -> Vec<(TreeInstance, Mesh)> {
        let wh = self.world_height as f64;
        let foothill_min = wh / (self.scaling * 7.0);
        let band_split = wh * 2.0 / (self.scaling * 3.0);
        let highland_max = wh / self.scaling;

        let mut trees = Vec::new();
        for x in 0..heightfield.size() {
            for y in 0..heightfield.size() {
                let h = self.column_height(heightfield.brightness(x, y));

                let trial = if h > foothill_min && h < band_split {
                    Some((FOOTHILL_TREE_PROBABILITY, (75u8..125, 150u8..200, 70u8..100)))
                } else if h > band_split && h < highland_max {
                    Some((HIGHLAND_TREE_PROBABILITY, (195u8..200, 150u8..200, 70u8..100)))
                } else {
                    None
                };
                let Some((probability, (r, g, b))) = trial else {
                    continue;
                };
                if !rng.gen_bool(probability) {
                    continue;
                }

                let instance = TreeInstance {
                    position: Vec3::new(x as f32 + 0.5, y as f32 + 0.5, h as f32 + 1.0),
                    height: rng.gen_range(1.0f32..3.0),
                    crown_color: [rng.gen_range(r), rng.gen_range(g), rng.gen_range(b)],
                };
                let tree_mesh = mesh::build_tree_mesh(&instance);
                trees.push((instance, tree_mesh));
            }
        }
        trees
    }
}

/// Mapping from chunk index to the trees whose planar centroid falls within
/// that chunk's footprint.
///
/// Rebuilt wholesale whenever the tree collection changes identity; never
/// incrementally patched.
#[derive(Debug, Default)]
pub struct TreeChunkBuckets {
    buckets: HashMap<usize, Vec<usize>>,
}

impl TreeChunkBuckets {
    /// Bucket every tree via the topology's chunk-center table.
    ///
    /// A centroid that snaps to no known chunk center means the topology is
    /// stale relative to the trees; that surfaces as an error forcing a
    /// rebuild, never a silent skip.
    pub fn build(trees: &[(TreeInstance, Mesh)], topology: &ChunkTopology) -> Result<Self> {
        let centers = topology.center_lookup();
        let footprint = CHUNK_SIZE as f32;

        let mut buckets: HashMap<usize, Vec<usize>> = HashMap::new();
        for (i, (tree, _)) in trees.iter().enumerate() {
            let cx = tree.position.x - tree.position.x.rem_euclid(footprint) + footprint / 2.0;
            let cy = tree.position.y - tree.position.y.rem_euclid(footprint) + footprint / 2.0;
            let index = centers
                .get(&(cx as i64, cy as i64))
                .copied()
                .ok_or(Error::StaleTreeIndex {
                    x: tree.position.x,
                    y: tree.position.y,
                })?;
            buckets.entry(index).or_default().push(i);
        }
        Ok(Self { buckets })
    }

    /// Trees bucketed into the given chunk.
    pub fn in_chunk(&self, index: usize) -> &[usize] {
        self.buckets.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of the buckets for a chunk set (vicinity culling).
    pub fn for_chunks(&self, chunks: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        for &chunk in chunks {
            out.extend_from_slice(self.in_chunk(chunk));
        }
        out
    }

    /// Total number of bucketed trees.
    pub fn tree_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}
