//! Chunked voxel map: configuration, terrain seeding, edit fan-out and mesh publishing.
#![forbid(unsafe_code)]

pub mod config;
pub mod coords;
mod map;
pub mod sink;
pub mod terrain;

pub use config::MapConfig;
pub use coords::{ChunkCoord, ChunkNeighbors, VoxelAddress};
pub use map::{Chunk, EditCommand, EditReport, VoxelMap};
pub use sink::{LogSink, MeshSink};
pub use terrain::{TerrainParams, TerrainSampler};
