//! Chunk grid topology, viewer visibility, and the world session aggregate

pub mod topology;
pub mod visibility;
pub mod session;

pub use topology::{ChunkTopology, WorldEdge};
pub use visibility::VisibilityWindow;
pub use session::{WorldSession, WorldView};
