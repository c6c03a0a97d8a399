//! Voxel samples and the per-chunk voxel grid.
#![forbid(unsafe_code)]

mod voxel;

pub use voxel::{DummyAxis, Voxel};

use contour_edit::{Stencil, StencilBounds};
use contour_geom::Vec2;

/// Debug color of a filled voxel.
pub const FILLED_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Debug color of an empty voxel.
pub const EMPTY_COLOR: [u8; 4] = [255, 255, 255, 255];

#[inline]
pub fn voxel_color(state: bool) -> [u8; 4] {
    if state { FILLED_COLOR } else { EMPTY_COLOR }
}

/// Voxel writes made by one [`VoxelGrid::apply`], plus whether any of them
/// landed on the parts a -x, -y or -x-y neighbor reads when stitching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub changed: usize,
    pub first_column: bool,
    pub first_row: bool,
    pub origin: bool,
}

impl ApplyStats {
    /// Counts a state change at local `(x, y)`.
    #[inline]
    pub fn record(&mut self, x: usize, y: usize) {
        self.changed += 1;
        self.first_column |= x == 0;
        self.first_row |= y == 0;
        self.origin |= x == 0 && y == 0;
    }
}

/// `resolution × resolution` voxels of one chunk, row-major by y.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    resolution: usize,
    grid_size: f32,
    voxel_size: f32,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Empty grid covering `grid_size` units per side.
    ///
    /// Panics when `resolution` is zero or `grid_size` is not a positive finite
    /// number; both are construction-time programming errors.
    pub fn new(resolution: usize, grid_size: f32) -> Self {
        assert!(resolution > 0, "voxel grid resolution must be positive");
        assert!(
            grid_size.is_finite() && grid_size > 0.0,
            "voxel grid size must be positive, got {}",
            grid_size
        );
        let voxel_size = grid_size / resolution as f32;
        let mut voxels = Vec::with_capacity(resolution * resolution);
        for y in 0..resolution {
            for x in 0..resolution {
                voxels.push(Voxel::new(x, y, voxel_size));
            }
        }
        Self {
            resolution,
            grid_size,
            voxel_size,
            voxels,
        }
    }

    /// Grid with states taken row-major from `states`; missing entries are
    /// empty and extra entries are ignored.
    pub fn from_states(resolution: usize, grid_size: f32, states: &[bool]) -> Self {
        let mut g = Self::new(resolution, grid_size);
        for (v, s) in g.voxels.iter_mut().zip(states.iter()) {
            v.state = *s;
        }
        g
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }
    #[inline]
    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }
    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }
    #[inline]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.resolution + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize) -> &Voxel {
        &self.voxels[self.idx(x, y)]
    }

    #[inline]
    pub fn state(&self, x: usize, y: usize) -> bool {
        self.get_local(x, y).state
    }

    #[inline]
    pub fn set_state(&mut self, x: usize, y: usize, state: bool) {
        let i = self.idx(x, y);
        self.voxels[i].state = state;
    }

    /// Sets every voxel from `f(x, y, position)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize, Vec2) -> bool) {
        let res = self.resolution;
        for (i, v) in self.voxels.iter_mut().enumerate() {
            v.state = f(i % res, i / res, v.position);
        }
    }

    /// Runs `stencil` over its clamped bounds and reports the voxels whose
    /// state changed.
    pub fn apply(&mut self, stencil: &Stencil) -> ApplyStats {
        let bounds = StencilBounds::clamped(stencil, self.resolution);
        let mut stats = ApplyStats::default();
        for (x, y) in bounds.iter() {
            let (x, y) = (x as usize, y as usize);
            let i = self.idx(x, y);
            let before = self.voxels[i].state;
            let after = stencil.apply(x as i32, y as i32, before);
            if after != before {
                self.voxels[i].state = after;
                stats.record(x, y);
            }
        }
        stats
    }

    pub fn filled_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.state).count()
    }

    #[inline]
    pub fn is_all_empty(&self) -> bool {
        !self.voxels.iter().any(|v| v.state)
    }

    /// One debug color per voxel, in storage order.
    pub fn colors(&self) -> Vec<[u8; 4]> {
        self.voxels.iter().map(|v| voxel_color(v.state)).collect()
    }
}
