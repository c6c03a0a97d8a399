use serde::{Deserialize, Serialize};

/// Position of a chunk in the map's chunk grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }
}

/// A voxel addressed by its chunk and chunk-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoxelAddress {
    pub chunk: ChunkCoord,
    pub x: usize,
    pub y: usize,
}

/// Arena indices of the chunks whose voxels a chunk reads when stitching its
/// +x, +y and +x+y seams. Fixed at map construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkNeighbors {
    pub x: Option<usize>,
    pub y: Option<usize>,
    pub xy: Option<usize>,
}
