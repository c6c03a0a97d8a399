//! CPU marching-squares mesher for voxel grids, with seam stitching across
//! neighboring grids.
#![forbid(unsafe_code)]

mod build;
pub mod cell;
mod mesh_build;
mod neighbors;

pub use build::{BuildStats, build_grid_mesh, grid_mesh};
pub use cell::{CellShape, cell_mask, triangulate_cell};
pub use mesh_build::MeshBuild;
pub use neighbors::GridNeighbors;
