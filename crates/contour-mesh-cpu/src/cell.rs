//! The 16-case marching-squares table.
//!
//! Corner layout of a cell, with `a` at the origin:
//!
//! ```text
//! c ---- d
//! |      |
//! a ---- b
//! ```
//!
//! Edge midpoints are read from the voxel that owns them: `a.x_edge` (bottom),
//! `a.y_edge` (left), `b.y_edge` (right), `c.x_edge` (top).

use contour_chunk::Voxel;

use crate::mesh_build::MeshBuild;

pub const CORNER_A: u8 = 1;
pub const CORNER_B: u8 = 2;
pub const CORNER_C: u8 = 4;
pub const CORNER_D: u8 = 8;

/// Geometry a cell mask produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellShape {
    /// No filled corner.
    Empty,
    /// One filled corner: a corner triangle.
    Corner,
    /// Two adjacent filled corners: a quad along one side.
    Edge,
    /// Two diagonal corners: two disjoint corner triangles.
    Saddle,
    /// Three filled corners: a pentagon.
    Notch,
    /// All corners filled: the whole cell.
    Full,
}

impl CellShape {
    pub const fn from_mask(mask: u8) -> CellShape {
        match mask & 0x0F {
            0 => CellShape::Empty,
            1 | 2 | 4 | 8 => CellShape::Corner,
            3 | 5 | 10 | 12 => CellShape::Edge,
            6 | 9 => CellShape::Saddle,
            15 => CellShape::Full,
            _ => CellShape::Notch,
        }
    }

    /// Triangles emitted for this shape.
    pub const fn triangles(self) -> usize {
        match self {
            CellShape::Empty => 0,
            CellShape::Corner => 1,
            CellShape::Edge | CellShape::Saddle | CellShape::Full => 2,
            CellShape::Notch => 3,
        }
    }

    /// Covered fraction of the cell.
    pub const fn coverage(self) -> f32 {
        match self {
            CellShape::Empty => 0.0,
            CellShape::Corner => 0.125,
            CellShape::Saddle => 0.25,
            CellShape::Edge => 0.5,
            CellShape::Notch => 0.875,
            CellShape::Full => 1.0,
        }
    }
}

#[inline]
pub fn cell_mask(a: &Voxel, b: &Voxel, c: &Voxel, d: &Voxel) -> u8 {
    let mut mask = 0;
    if a.state {
        mask |= CORNER_A;
    }
    if b.state {
        mask |= CORNER_B;
    }
    if c.state {
        mask |= CORNER_C;
    }
    if d.state {
        mask |= CORNER_D;
    }
    mask
}

/// Emits the polygon for one cell, wound counter-clockwise. Returns the mask.
pub fn triangulate_cell(mb: &mut MeshBuild, a: &Voxel, b: &Voxel, c: &Voxel, d: &Voxel) -> u8 {
    let mask = cell_mask(a, b, c, d);
    match mask {
        0 => {}
        1 => mb.add_triangle(a.position, a.x_edge, a.y_edge),
        2 => mb.add_triangle(b.position, b.y_edge, a.x_edge),
        3 => mb.add_quad(a.position, b.position, b.y_edge, a.y_edge),
        4 => mb.add_triangle(c.position, a.y_edge, c.x_edge),
        5 => mb.add_quad(a.position, a.x_edge, c.x_edge, c.position),
        6 => {
            mb.add_triangle(b.position, b.y_edge, a.x_edge);
            mb.add_triangle(c.position, a.y_edge, c.x_edge);
        }
        7 => mb.add_pentagon(a.position, b.position, b.y_edge, c.x_edge, c.position),
        8 => mb.add_triangle(d.position, c.x_edge, b.y_edge),
        9 => {
            mb.add_triangle(a.position, a.x_edge, a.y_edge);
            mb.add_triangle(d.position, c.x_edge, b.y_edge);
        }
        10 => mb.add_quad(a.x_edge, b.position, d.position, c.x_edge),
        11 => mb.add_pentagon(a.position, b.position, d.position, c.x_edge, a.y_edge),
        12 => mb.add_quad(a.y_edge, b.y_edge, d.position, c.position),
        13 => mb.add_pentagon(a.position, a.x_edge, b.y_edge, d.position, c.position),
        14 => mb.add_pentagon(b.position, d.position, c.position, a.y_edge, a.x_edge),
        _ => mb.add_quad(a.position, b.position, d.position, c.position),
    }
    mask
}
