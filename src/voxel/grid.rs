//! Dense per-chunk occupancy grid built from heightfield tiles

use crate::heightfield::Tile;

/// Face direction of a voxel, in the order faces are emitted.
///
/// Ordinal values are stable; the mesher's face tables are keyed to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Direction {
    Bottom = 0,
    South,
    East,
    North,
    West,
    Top,
}

impl Direction {
    /// All directions in emission order.
    pub const ALL: [Direction; 6] = [
        Direction::Bottom,
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::Top,
    ];

    /// Grid-space offset to the neighboring cell in this direction.
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Bottom => (0, 0, -1),
            Direction::South => (0, -1, 0),
            Direction::East => (1, 0, 0),
            Direction::North => (0, 1, 0),
            Direction::West => (-1, 0, 0),
            Direction::Top => (0, 0, 1),
        }
    }
}

/// Dense 3D occupancy field for one chunk.
///
/// Stored as a flat buffer addressed by `x + y * width + z * width * depth`.
/// Owned exclusively by its chunk; never mutated after construction.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    width: usize,
    depth: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an all-empty grid.
    pub fn new(width: usize, depth: usize, height: usize) -> Self {
        Self {
            width,
            depth,
            height,
            cells: vec![false; width * depth * height],
        }
    }

    /// Build a grid from one heightfield tile.
    ///
    /// A column's fill threshold is
    /// `floor(brightness * world_height * scaling)`; every cell with
    /// `z <= threshold` is filled. Pure: the same tile and scaling always
    /// produce the same grid, so tiles can be converted in parallel.
    pub fn from_tile(tile: &Tile, world_height: usize, scaling: f64) -> Self {
        let size = tile.size();
        let mut grid = Self::new(size, size, world_height);
        for y in 0..size {
            for x in 0..size {
                let threshold =
                    (tile.brightness(x, y) as f64 * world_height as f64 * scaling).floor() as i64;
                for z in 0..world_height {
                    if (z as i64) <= threshold {
                        grid.set(x, y, z, true);
                    }
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.width + z * self.width * self.depth
    }

    /// Set a cell. Panics when out of bounds; only construction writes.
    pub fn set(&mut self, x: usize, y: usize, z: usize, filled: bool) {
        let i = self.idx(x, y, z);
        self.cells[i] = filled;
    }

    /// Whether the cell at (x, y, z) is filled.
    ///
    /// Out-of-bounds coordinates read as empty rather than erroring.
    pub fn get(&self, x: i32, y: i32, z: i32) -> bool {
        if x < 0 || y < 0 || z < 0 {
            return false;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.depth || z >= self.height {
            return false;
        }
        self.cells[self.idx(x, y, z)]
    }

    /// Whether the neighbor of (x, y, z) in `dir` is filled.
    ///
    /// Lookups are chunk-local: a query crossing the chunk bounds resolves
    /// to empty, which keeps boundary faces between adjacent chunks visible.
    pub fn neighbor(&self, x: usize, y: usize, z: usize, dir: Direction) -> bool {
        let (dx, dy, dz) = dir.offset();
        self.get(x as i32 + dx, y as i32 + dy, z as i32 + dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::Heightfield;

    #[test]
    fn test_occupancy_matches_threshold() {
        let size = 4;
        let samples = vec![
            0.0, 0.1, 0.3, 0.5, //
            0.7, 0.9, 1.0, 0.2, //
            0.4, 0.6, 0.8, 0.05, //
            0.15, 0.25, 0.35, 0.45,
        ];
        let field = Heightfield::from_samples(size, samples.clone());
        let tiles = field.tiles(size);

        for &scaling in &[0.5, 1.0, 1.7] {
            let grid = OccupancyGrid::from_tile(&tiles[0], 128, scaling);
            for y in 0..size {
                for x in 0..size {
                    let threshold = (samples[y * size + x] as f64 * 128.0 * scaling).floor() as i64;
                    for z in 0..128i64 {
                        assert_eq!(
                            grid.get(x as i32, y as i32, z as i32),
                            z <= threshold,
                            "mismatch at ({x}, {y}, {z}), scaling {scaling}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_reads_empty() {
        let mut grid = OccupancyGrid::new(2, 2, 2);
        grid.set(0, 0, 0, true);

        assert!(grid.get(0, 0, 0));
        assert!(!grid.get(-1, 0, 0));
        assert!(!grid.get(0, -1, 0));
        assert!(!grid.get(0, 0, -1));
        assert!(!grid.get(2, 0, 0));
        assert!(!grid.get(0, 2, 0));
        assert!(!grid.get(0, 0, 2));
    }

    #[test]
    fn test_neighbor_offsets() {
        let mut grid = OccupancyGrid::new(3, 3, 3);
        grid.set(1, 1, 0, true); // below center
        grid.set(2, 1, 1, true); // east of center

        assert!(grid.neighbor(1, 1, 1, Direction::Bottom));
        assert!(grid.neighbor(1, 1, 1, Direction::East));
        assert!(!grid.neighbor(1, 1, 1, Direction::Top));
        assert!(!grid.neighbor(1, 1, 1, Direction::South));
        assert!(!grid.neighbor(1, 1, 1, Direction::North));
        assert!(!grid.neighbor(1, 1, 1, Direction::West));

        // Boundary queries fall off the grid and read empty.
        assert!(!grid.neighbor(0, 0, 0, Direction::West));
        assert!(!grid.neighbor(2, 2, 2, Direction::Top));
    }

    #[test]
    fn test_direction_order_is_stable() {
        let ordinals: Vec<usize> = Direction::ALL.iter().map(|&d| d as usize).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(Direction::Bottom.offset(), (0, 0, -1));
        assert_eq!(Direction::Top.offset(), (0, 0, 1));
    }
}
