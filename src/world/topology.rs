//! Chunk grid topology — the linear-index/grid-coordinate bijection and
//! neighbor-set math over the square chunk grid.

use std::collections::HashMap;

use glam::Vec3;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::voxel::CHUNK_SIZE;

/// Cardinal edge of the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldEdge {
    South,
    East,
    North,
    West,
}

/// Arranges chunk indices on an implicit square grid.
///
/// One bijection serves chunk placement, visibility, and tree bucketing:
/// `index = grid_x * side + grid_y`. The index walks along Y fastest and
/// wraps into the next column, matching the heightfield tile scan order.
#[derive(Clone, Debug)]
pub struct ChunkTopology {
    chunk_count: usize,
    side: usize,
}

impl ChunkTopology {
    /// Create a topology over `chunk_count` chunks.
    ///
    /// The count must be a non-zero perfect square; anything else is a
    /// precondition violation, rejected rather than silently truncated.
    pub fn new(chunk_count: usize) -> Result<Self> {
        let side = (chunk_count as f64).sqrt().round() as usize;
        if chunk_count == 0 || side * side != chunk_count {
            return Err(Error::NonSquareChunkCount(chunk_count));
        }
        Ok(Self { chunk_count, side })
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Side length of the chunk grid, in chunks.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Grid coordinate of a linear chunk index.
    pub fn coord(&self, index: usize) -> (usize, usize) {
        (index / self.side, index % self.side)
    }

    /// Linear index of a grid coordinate.
    pub fn index(&self, grid_x: usize, grid_y: usize) -> usize {
        grid_x * self.side + grid_y
    }

    /// World-space origin of a chunk (minimum corner, at z = 0).
    pub fn origin(&self, index: usize) -> Vec3 {
        let (gx, gy) = self.coord(index);
        Vec3::new((gx * CHUNK_SIZE) as f32, (gy * CHUNK_SIZE) as f32, 0.0)
    }

    /// Planar center of a chunk's footprint.
    pub fn center(&self, index: usize) -> Vec3 {
        let half = CHUNK_SIZE as f32 / 2.0;
        self.origin(index) + Vec3::new(half, half, 0.0)
    }

    /// Whether the chunk sits on the given edge of the world.
    pub fn is_on_edge(&self, index: usize, edge: WorldEdge) -> bool {
        let (gx, gy) = self.coord(index);
        match edge {
            WorldEdge::South => gy == 0,
            WorldEdge::North => gy == self.side - 1,
            WorldEdge::West => gx == 0,
            WorldEdge::East => gx == self.side - 1,
        }
    }

    /// Moore neighborhood of a chunk, filtered to the grid bounds.
    ///
    /// Yields 3 indices for a corner chunk, 5 for a non-corner edge chunk,
    /// and 8 for an interior chunk; every returned index is valid.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let (gx, gy) = self.coord(index);
        let (gx, gy) = (gx as i64, gy as i64);
        let side = self.side as i64;

        let mut out = Vec::with_capacity(8);
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (gx + dx, gy + dy);
                if nx < 0 || nx >= side || ny < 0 || ny >= side {
                    continue;
                }
                out.push(self.index(nx as usize, ny as usize));
            }
        }
        out
    }

    /// Chunk-center lookup table, used to bucket trees into chunks.
    ///
    /// Centers land on integer coordinates because the footprint side is
    /// even, so the keys are exact.
    pub fn center_lookup(&self) -> HashMap<(i64, i64), usize> {
        (0..self.chunk_count)
            .map(|i| {
                let c = self.center(i);
                ((c.x as i64, c.y as i64), i)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_square_count_is_rejected() {
        assert!(matches!(
            ChunkTopology::new(5),
            Err(Error::NonSquareChunkCount(5))
        ));
        assert!(ChunkTopology::new(0).is_err());
        assert!(ChunkTopology::new(4).is_ok());
        assert!(ChunkTopology::new(64).is_ok());
    }

    #[test]
    fn test_bijection_round_trip() {
        let topo = ChunkTopology::new(16).unwrap();
        for index in 0..16 {
            let (gx, gy) = topo.coord(index);
            assert_eq!(topo.index(gx, gy), index);
        }
    }

    #[test]
    fn test_origins_for_four_chunk_world() {
        let topo = ChunkTopology::new(4).unwrap();
        assert_eq!(topo.origin(0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(topo.origin(1), Vec3::new(0.0, 16.0, 0.0));
        assert_eq!(topo.origin(2), Vec3::new(16.0, 0.0, 0.0));
        assert_eq!(topo.origin(3), Vec3::new(16.0, 16.0, 0.0));
    }

    #[test]
    fn test_edge_classification() {
        let topo = ChunkTopology::new(9).unwrap();
        // Index 0 is grid (0, 0): south-west corner.
        assert!(topo.is_on_edge(0, WorldEdge::South));
        assert!(topo.is_on_edge(0, WorldEdge::West));
        assert!(!topo.is_on_edge(0, WorldEdge::North));
        assert!(!topo.is_on_edge(0, WorldEdge::East));
        // Index 4 is grid (1, 1): interior.
        for edge in [WorldEdge::South, WorldEdge::East, WorldEdge::North, WorldEdge::West] {
            assert!(!topo.is_on_edge(4, edge));
        }
        // Index 8 is grid (2, 2): north-east corner.
        assert!(topo.is_on_edge(8, WorldEdge::North));
        assert!(topo.is_on_edge(8, WorldEdge::East));
    }

    #[test]
    fn test_neighbor_cardinalities_on_three_by_three() {
        let topo = ChunkTopology::new(9).unwrap();

        // Corners: indices 0, 2, 6, 8.
        for corner in [0, 2, 6, 8] {
            assert_eq!(topo.neighbors(corner).len(), 3, "corner {corner}");
        }
        // Edge, non-corner: 1, 3, 5, 7.
        for edge in [1, 3, 5, 7] {
            assert_eq!(topo.neighbors(edge).len(), 5, "edge {edge}");
        }
        // Center.
        let center = topo.neighbors(4);
        assert_eq!(center.len(), 8);
        let mut sorted = center.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_neighbors_are_always_in_range() {
        let topo = ChunkTopology::new(16).unwrap();
        for index in 0..16 {
            for n in topo.neighbors(index) {
                assert!(n < 16);
                assert_ne!(n, index);
            }
        }
    }

    #[test]
    fn test_center_lookup() {
        let topo = ChunkTopology::new(4).unwrap();
        let centers = topo.center_lookup();
        assert_eq!(centers.len(), 4);
        assert_eq!(centers[&(8, 8)], 0);
        assert_eq!(centers[&(8, 24)], 1);
        assert_eq!(centers[&(24, 8)], 2);
        assert_eq!(centers[&(24, 24)], 3);
    }
}
