//! World session — one aggregate owning the heightfield, chunk meshes,
//! topology tables, visibility cache, and tree buckets for a generated
//! world. Queries and rebuilds all go through the session instead of
//! process-wide state.

use std::time::Instant;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::{DisplayMode, WorldConfig};
use crate::core::types::Result;
use crate::forest::{ForestPlacer, TreeChunkBuckets, TreeInstance};
use crate::heightfield::Heightfield;
use crate::voxel::{CHUNK_SIZE, ChunkMesher, Mesh, OccupancyGrid, WORLD_HEIGHT};
use crate::world::topology::ChunkTopology;
use crate::world::visibility::VisibilityWindow;

/// Index sets emitted for one display query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldView {
    /// Chunk indices to display.
    pub chunks: Vec<usize>,
    /// Tree indices to display (into `WorldSession::trees`).
    pub trees: Vec<usize>,
}

pub struct WorldSession {
    heightfield: Heightfield,
    config: WorldConfig,
    chunks: Vec<Mesh>,
    topology: ChunkTopology,
    visibility: VisibilityWindow,
    trees: Vec<(TreeInstance, Mesh)>,
    buckets: TreeChunkBuckets,
}

impl WorldSession {
    /// Run the full pipeline: tiles -> occupancy grids -> chunk meshes ->
    /// topology -> arrangement -> forest -> tree buckets.
    pub fn generate(heightfield: Heightfield, config: &WorldConfig) -> Result<Self> {
        let start = Instant::now();

        let tiles = heightfield.tiles(CHUNK_SIZE);
        let topology = ChunkTopology::new(tiles.len())?;
        let mesher = ChunkMesher::new(WORLD_HEIGHT, config.height_scaling);

        // Chunks have no cross dependencies; the ordered collect keeps mesh
        // i at position i regardless of completion order, and per-chunk RNG
        // streams keep results independent of the thread schedule.
        let seed = config.seed;
        let mut chunks: Vec<Mesh> = tiles
            .par_iter()
            .enumerate()
            .map(|(i, tile)| {
                let grid = OccupancyGrid::from_tile(tile, WORLD_HEIGHT, config.height_scaling);
                let mut rng = ChaCha8Rng::seed_from_u64(seed ^ i as u64);
                mesher.mesh(&grid, &mut rng)
            })
            .collect();

        Self::arrange(&mut chunks, &topology);
        log::info!(
            "Meshed {} chunks ({} grid) in {:.2}s",
            chunks.len(),
            topology.side(),
            start.elapsed().as_secs_f64()
        );

        let forest_start = Instant::now();
        let placer = ForestPlacer::new(WORLD_HEIGHT, config.height_scaling);
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        let trees = placer.place(&heightfield, &mut rng);
        let buckets = TreeChunkBuckets::build(&trees, &topology)?;
        log::info!(
            "Placed {} trees in {:.2}s",
            trees.len(),
            forest_start.elapsed().as_secs_f64()
        );

        Ok(Self {
            heightfield,
            config: config.clone(),
            chunks,
            topology,
            visibility: VisibilityWindow::new(),
            trees,
            buckets,
        })
    }

    /// Translate each chunk mesh from its local origin to its grid slot.
    ///
    /// Idempotent: a mesh already moved off the local origin stays put.
    pub fn arrange(chunks: &mut [Mesh], topology: &ChunkTopology) {
        for (i, mesh) in chunks.iter_mut().enumerate() {
            if mesh.is_placed() {
                continue;
            }
            mesh.translate(topology.origin(i));
        }
    }

    pub fn topology(&self) -> &ChunkTopology {
        &self.topology
    }

    pub fn chunks(&self) -> &[Mesh] {
        &self.chunks
    }

    pub fn trees(&self) -> &[(TreeInstance, Mesh)] {
        &self.trees
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Chunk indices visible from `position` (occupied chunk + neighbors),
    /// recomputed only when the viewer crosses a chunk boundary.
    pub fn visible_chunks(&mut self, position: Vec3) -> &[usize] {
        self.visibility.update(&self.topology, position)
    }

    /// Index sets for the requested display mode, chunks and trees filtered
    /// identically.
    pub fn view(&mut self, mode: DisplayMode, position: Vec3) -> WorldView {
        match mode {
            DisplayMode::World => WorldView {
                chunks: (0..self.chunks.len()).collect(),
                trees: (0..self.trees.len()).collect(),
            },
            DisplayMode::Vicinity => {
                let chunks = self.visibility.update(&self.topology, position).to_vec();
                let trees = self.buckets.for_chunks(&chunks);
                WorldView { chunks, trees }
            }
        }
    }

    /// Replace the tree collection and rebuild the buckets wholesale.
    pub fn replace_forest(&mut self, trees: Vec<(TreeInstance, Mesh)>) -> Result<()> {
        self.buckets = TreeChunkBuckets::build(&trees, &self.topology)?;
        self.trees = trees;
        Ok(())
    }

    /// Re-run tree placement over the session's heightfield with a new seed.
    pub fn regenerate_forest(&mut self, seed: u64) -> Result<()> {
        let placer = ForestPlacer::new(WORLD_HEIGHT, self.config.height_scaling);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let trees = placer.place(&self.heightfield, &mut rng);
        self.replace_forest(trees)
    }
}
