use contour_chunk::VoxelGrid;

/// Read-only views of the grids that border a grid on +x, +y and the +x+y
/// diagonal. A missing neighbor leaves that seam open.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridNeighbors<'a> {
    pub x: Option<&'a VoxelGrid>,
    pub y: Option<&'a VoxelGrid>,
    pub xy: Option<&'a VoxelGrid>,
}

impl<'a> GridNeighbors<'a> {
    #[inline]
    pub const fn none() -> Self {
        Self {
            x: None,
            y: None,
            xy: None,
        }
    }

    #[inline]
    pub const fn new(
        x: Option<&'a VoxelGrid>,
        y: Option<&'a VoxelGrid>,
        xy: Option<&'a VoxelGrid>,
    ) -> Self {
        Self { x, y, xy }
    }
}
