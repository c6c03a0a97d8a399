use std::mem;

use contour_chunk::{DummyAxis, Voxel, VoxelGrid};

use crate::cell::triangulate_cell;
use crate::mesh_build::MeshBuild;
use crate::neighbors::GridNeighbors;

/// Cell counts of one triangulation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Interior cells, all four corners owned by the grid.
    pub cells: usize,
    /// Seam cells that read at least one neighbor voxel.
    pub gap_cells: usize,
}

/// Rebuilds `out` from scratch for `grid`, stitching the +x, +y and corner
/// seams against whichever neighbors are present.
///
/// Neighbor voxels are viewed through dummies translated by one grid width.
/// Neighbors must share the grid's resolution and size.
pub fn build_grid_mesh(
    grid: &VoxelGrid,
    neighbors: &GridNeighbors<'_>,
    out: &mut MeshBuild,
) -> BuildStats {
    out.clear_keep_capacity();
    let res = grid.resolution();
    let size = grid.grid_size();
    let voxels = grid.voxels();
    let cells = res - 1;
    out.reserve_cells(res * res);

    for n in [neighbors.x, neighbors.y, neighbors.xy].into_iter().flatten() {
        debug_assert_eq!(n.resolution(), res, "neighbor resolution mismatch");
    }

    let mut stats = BuildStats::default();
    // `dummy_x` trails down the +x seam; `dummy_t` is the swap slot.
    let mut dummy_x = Voxel::default();
    let mut dummy_t = Voxel::default();
    if let Some(xn) = neighbors.x {
        dummy_x.become_dummy_of(&xn.voxels()[0], size, DummyAxis::X);
    }

    for y in 0..cells {
        let row = y * res;
        for x in 0..cells {
            let i = row + x;
            triangulate_cell(
                out,
                &voxels[i],
                &voxels[i + 1],
                &voxels[i + res],
                &voxels[i + res + 1],
            );
        }
        stats.cells += cells;
        if let Some(xn) = neighbors.x {
            let i = row + cells;
            dummy_t.become_dummy_of(&xn.voxels()[i + 1], size, DummyAxis::X);
            mem::swap(&mut dummy_t, &mut dummy_x);
            triangulate_cell(out, &voxels[i], &dummy_t, &voxels[i + res], &dummy_x);
            stats.gap_cells += 1;
        }
    }

    if let Some(yn) = neighbors.y {
        let mut dummy_y = Voxel::dummy_of(&yn.voxels()[0], size, DummyAxis::Y);
        let top = cells * res;
        for x in 0..cells {
            dummy_t.become_dummy_of(&yn.voxels()[x + 1], size, DummyAxis::Y);
            mem::swap(&mut dummy_t, &mut dummy_y);
            triangulate_cell(
                out,
                &voxels[top + x],
                &voxels[top + x + 1],
                &dummy_t,
                &dummy_y,
            );
            stats.gap_cells += 1;
        }

        // Corner shared by four grids. `dummy_x` now holds x-neighbor (0, res-1)
        // and `dummy_y` holds y-neighbor (res-1, 0).
        if let (Some(_), Some(xyn)) = (neighbors.x, neighbors.xy) {
            dummy_t.become_dummy_of(&xyn.voxels()[0], size, DummyAxis::XY);
            triangulate_cell(out, &voxels[voxels.len() - 1], &dummy_x, &dummy_y, &dummy_t);
            stats.gap_cells += 1;
        }
    }

    stats
}

/// Convenience wrapper returning a fresh mesh.
pub fn grid_mesh(grid: &VoxelGrid, neighbors: &GridNeighbors<'_>) -> MeshBuild {
    let mut out = MeshBuild::default();
    build_grid_mesh(grid, neighbors, &mut out);
    out
}
