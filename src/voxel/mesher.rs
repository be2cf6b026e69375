//! Face-culled chunk meshing with height-band color classification

use glam::Vec3;
use rand::Rng;

use super::grid::{Direction, OccupancyGrid};
use super::mesh::Mesh;

/// Material classes a voxel can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelType {
    Grass,
    Stone,
    Snow,
    Water,
}

impl VoxelType {
    /// Vertex color for this material.
    pub fn color(self) -> [u8; 3] {
        match self {
            VoxelType::Grass => [0, 128, 0],
            VoxelType::Stone => [128, 128, 128],
            VoxelType::Snow => [255, 250, 250],
            VoxelType::Water => [0, 0, 255],
        }
    }
}

/// Probability that a blend-band voxel keeps the lower band's material.
const BLEND_KEEP_PROBABILITY: f64 = 0.66;

/// Quad vertex indices per face, relative to the voxel's 8-vertex base.
/// Keyed to `Direction` ordinals.
const FACE_TABLE: [[u32; 4]; 6] = [
    [0, 3, 2, 1], // Bottom
    [0, 1, 5, 4], // South
    [1, 2, 6, 5], // East
    [2, 3, 7, 6], // North
    [3, 0, 4, 7], // West
    [4, 5, 6, 7], // Top
];

/// The 8 corner offsets of a unit voxel, in vertex-index order.
const CORNERS: [(f32, f32, f32); 8] = [
    (0.0, 0.0, 0.0),
    (1.0, 0.0, 0.0),
    (1.0, 1.0, 0.0),
    (0.0, 1.0, 0.0),
    (0.0, 0.0, 1.0),
    (1.0, 0.0, 1.0),
    (1.0, 1.0, 1.0),
    (0.0, 1.0, 1.0),
];

/// Converts one occupancy grid into a face-culled surface mesh.
///
/// The scaling factor is the same one that shaped the grid; it sets the
/// color band cutoffs.
pub struct ChunkMesher {
    world_height: usize,
    scaling: f64,
}

impl ChunkMesher {
    pub fn new(world_height: usize, scaling: f64) -> Self {
        Self {
            world_height,
            scaling,
        }
    }

    /// Mesh one chunk.
    ///
    /// Pure aside from one uniform draw per emitted voxel, consumed by the
    /// blend bands; a seeded `rng` reproduces the mesh byte for byte.
    pub fn mesh(&self, grid: &OccupancyGrid, rng: &mut impl Rng) -> Mesh {
        let mut mesh = Mesh::new();
        let mut voxel_index: u32 = 0;
        for z in 0..grid.height() {
            for y in 0..grid.depth() {
                for x in 0..grid.width() {
                    if !grid.get(x as i32, y as i32, z as i32) {
                        continue;
                    }
                    let chance = rng.gen_range(0.0..1.0);
                    self.emit_voxel(&mut mesh, grid, x, y, z, voxel_index, chance);
                    voxel_index += 1;
                }
            }
        }
        mesh
    }

    fn emit_voxel(
        &self,
        mesh: &mut Mesh,
        grid: &OccupancyGrid,
        x: usize,
        y: usize,
        z: usize,
        voxel_index: u32,
        chance: f64,
    ) {
        let color = self.classify(z as i32, chance).color();
        let base = Vec3::new(x as f32, y as f32, z as f32);
        for (dx, dy, dz) in CORNERS {
            mesh.push_vertex(base + Vec3::new(dx, dy, dz), color);
        }

        for dir in Direction::ALL {
            if grid.neighbor(x, y, z, dir) {
                continue;
            }
            // A voxel resting on the world floor never shows its bottom
            // face, even though it has no z = -1 neighbor.
            if dir == Direction::Bottom && z == 0 {
                continue;
            }
            let face = FACE_TABLE[dir as usize].map(|i| i + voxel_index * 8);
            mesh.push_face(face);
        }
    }

    /// Assign a material from the voxel's height band.
    ///
    /// `chance` is one uniform draw in [0, 1) deciding the two blend bands
    /// around `cutoff` and `2 * cutoff`, where
    /// `cutoff = world_height / (scaling * 7)`.
    pub fn classify(&self, z: i32, chance: f64) -> VoxelType {
        let cutoff = self.world_height as f64 / (self.scaling * 7.0);
        let zf = z as f64;
        if z <= 0 {
            VoxelType::Water
        } else if zf < cutoff - 1.0 {
            VoxelType::Grass
        } else if zf < cutoff + 1.0 {
            if chance < BLEND_KEEP_PROBABILITY {
                VoxelType::Grass
            } else {
                VoxelType::Stone
            }
        } else if zf < 2.0 * cutoff - 1.0 {
            VoxelType::Stone
        } else if zf < 2.0 * cutoff + 1.0 {
            if chance < BLEND_KEEP_PROBABILITY {
                VoxelType::Stone
            } else {
                VoxelType::Snow
            }
        } else {
            VoxelType::Snow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mesher() -> ChunkMesher {
        ChunkMesher::new(128, 1.0)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// Faces whose indices all fall in one voxel's 8-vertex block.
    fn faces_of_voxel(mesh: &Mesh, voxel_index: u32) -> Vec<[u32; 4]> {
        let lo = voxel_index * 8;
        let hi = lo + 8;
        mesh.faces()
            .iter()
            .copied()
            .filter(|f| f.iter().all(|&i| i >= lo && i < hi))
            .collect()
    }

    /// Cross-shaped grid: center voxel at (1,1,1) plus its six neighbors.
    fn surrounded() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(3, 3, 3);
        for (x, y, z) in [
            (1, 1, 0),
            (1, 0, 1),
            (0, 1, 1),
            (1, 1, 1),
            (2, 1, 1),
            (1, 2, 1),
            (1, 1, 2),
        ] {
            grid.set(x, y, z, true);
        }
        grid
    }

    // Scan order (z, y, x) puts the center voxel at index 3 in the
    // surrounded() grid.
    const CENTER: u32 = 3;

    #[test]
    fn test_fully_surrounded_voxel_emits_no_faces() {
        let mesh = mesher().mesh(&surrounded(), &mut rng());
        assert!(faces_of_voxel(&mesh, CENTER).is_empty());
    }

    #[test]
    fn test_removing_one_neighbor_adds_exactly_that_face() {
        let mut grid = surrounded();
        grid.set(1, 1, 2, false); // top neighbor gone
        let mesh = mesher().mesh(&grid, &mut rng());

        let faces = faces_of_voxel(&mesh, CENTER);
        assert_eq!(faces.len(), 1);
        // Top face pattern (4,5,6,7) rebased to the center voxel's block.
        assert_eq!(faces[0], [28, 29, 30, 31]);
    }

    #[test]
    fn test_floor_voxel_suppresses_bottom_face() {
        let mut grid = OccupancyGrid::new(1, 1, 2);
        grid.set(0, 0, 0, true);
        let mesh = mesher().mesh(&grid, &mut rng());

        // All side and top neighbors are out of bounds, so 5 faces; the
        // bottom face is suppressed because z = 0.
        assert_eq!(mesh.faces().len(), 5);
        assert!(!mesh.faces().contains(&FACE_TABLE[Direction::Bottom as usize]));
    }

    #[test]
    fn test_raised_voxel_emits_bottom_face() {
        let mut grid = OccupancyGrid::new(1, 1, 2);
        grid.set(0, 0, 1, true);
        let mesh = mesher().mesh(&grid, &mut rng());
        assert_eq!(mesh.faces().len(), 6);
    }

    #[test]
    fn test_solid_grid_meshes_as_hollow_box() {
        let (w, d, h) = (4usize, 4usize, 3usize);
        let mut grid = OccupancyGrid::new(w, d, h);
        for z in 0..h {
            for y in 0..d {
                for x in 0..w {
                    grid.set(x, y, z, true);
                }
            }
        }
        let mesh = mesher().mesh(&grid, &mut rng());

        // Interior faces are all culled: top shell + four sides, no bottom.
        let expected = w * d + 2 * (w * h) + 2 * (d * h);
        assert_eq!(mesh.faces().len(), expected);
    }

    #[test]
    fn test_vertices_per_voxel() {
        let mesh = mesher().mesh(&surrounded(), &mut rng());
        assert_eq!(mesh.vertex_count(), 7 * 8);
        assert_eq!(mesh.colors().len(), 7 * 8);
    }

    #[test]
    fn test_same_seed_reproduces_mesh() {
        let grid = surrounded();
        let m = mesher();
        let a = m.mesh(&grid, &mut ChaCha8Rng::seed_from_u64(99));
        let b = m.mesh(&grid, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.faces(), b.faces());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn test_classification_bands() {
        let m = mesher(); // cutoff = 128 / 7 ~ 18.29
        assert_eq!(m.classify(0, 0.5), VoxelType::Water);
        assert_eq!(m.classify(-2, 0.5), VoxelType::Water);
        assert_eq!(m.classify(5, 0.5), VoxelType::Grass);
        assert_eq!(m.classify(25, 0.5), VoxelType::Stone);
        assert_eq!(m.classify(50, 0.5), VoxelType::Snow);

        // Blend band around the cutoff: the draw decides.
        assert_eq!(m.classify(18, 0.5), VoxelType::Grass);
        assert_eq!(m.classify(18, 0.9), VoxelType::Stone);

        // Blend band around 2 * cutoff (~36.57).
        assert_eq!(m.classify(36, 0.5), VoxelType::Stone);
        assert_eq!(m.classify(36, 0.9), VoxelType::Snow);
    }

    #[test]
    fn test_voxel_color_is_uniform_across_vertices() {
        let mut grid = OccupancyGrid::new(1, 1, 2);
        grid.set(0, 0, 1, true);
        let mesh = mesher().mesh(&grid, &mut rng());

        let first = mesh.colors()[0];
        assert!(mesh.colors().iter().all(|&c| c == first));
    }
}
