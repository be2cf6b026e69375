//! Viewer-driven chunk visibility — memoized occupied-chunk + neighbor set

use glam::Vec3;

use super::topology::ChunkTopology;
use crate::voxel::CHUNK_SIZE;

/// Tracks the viewer's occupied chunk and the visible set around it.
///
/// The visible set is recomputed only when the occupied chunk changes;
/// repeated queries inside the same chunk return the cached set with no
/// recompute and no reallocation.
#[derive(Debug, Default)]
pub struct VisibilityWindow {
    occupied: Option<usize>,
    visible: Vec<usize>,
    generation: u64,
}

impl VisibilityWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupied chunk index recorded by the last update, if any.
    pub fn occupied(&self) -> Option<usize> {
        self.occupied
    }

    /// Number of recomputes so far; queries that stay in the same chunk
    /// leave it untouched.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolve the chunk a viewer position occupies.
    ///
    /// Positions outside the world are clamped to the nearest bound; a
    /// viewer exactly on the far bound still belongs to the last chunk.
    pub fn occupied_chunk(topology: &ChunkTopology, position: Vec3) -> usize {
        let side = topology.side();
        let extent = (side * CHUNK_SIZE) as f32;
        let x = position.x.clamp(0.0, extent);
        let y = position.y.clamp(0.0, extent);
        let gx = ((x / CHUNK_SIZE as f32) as usize).min(side - 1);
        let gy = ((y / CHUNK_SIZE as f32) as usize).min(side - 1);
        topology.index(gx, gy)
    }

    /// Visible set for the viewer position: the occupied chunk plus its
    /// neighbor set.
    pub fn update(&mut self, topology: &ChunkTopology, position: Vec3) -> &[usize] {
        let current = Self::occupied_chunk(topology, position);
        if self.occupied != Some(current) {
            self.occupied = Some(current);
            self.visible = topology.neighbors(current);
            self.visible.push(current);
            self.generation += 1;
        }
        &self.visible
    }
}
