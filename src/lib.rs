//! Voxelfield - a heightfield-driven chunked voxel world generator

pub mod core;
pub mod config;
pub mod heightfield;
pub mod voxel;
pub mod world;
pub mod forest;
