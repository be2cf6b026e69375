//! Error types for the voxelfield pipeline

use thiserror::Error;

/// Main error type for the pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chunk count {0} is not a perfect square; the world grid needs side x side chunks")]
    NonSquareChunkCount(usize),

    #[error("unknown terrain kind {0:?}; expected one of \"lowlands\", \"midlands\", \"highlands\"")]
    InvalidTerrainKind(String),

    #[error("unknown display mode {0:?}; expected \"world\" or \"vicinity\"")]
    InvalidDisplayMode(String),

    #[error(
        "tree at ({x:.1}, {y:.1}) maps to no known chunk center; \
         the topology is stale and the tree buckets must be rebuilt"
    )]
    StaleTreeIndex { x: f32, y: f32 },
}
