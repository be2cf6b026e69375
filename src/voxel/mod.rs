//! Voxel occupancy grids and chunk meshing

pub mod grid;
pub mod mesh;
pub mod mesher;

pub use grid::{Direction, OccupancyGrid};
pub use mesh::Mesh;
pub use mesher::{ChunkMesher, VoxelType};

/// Chunk footprint in voxels (in-plane side length)
pub const CHUNK_SIZE: usize = 16;

/// Vertical voxel count per chunk
pub const WORLD_HEIGHT: usize = 128;
