//! Brush stencils that decide new voxel states during an edit.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest brush radius the editor exposes.
pub const MAX_RADIUS: i32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StencilShape {
    #[default]
    Square,
    Circle,
}

impl FromStr for StencilShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(StencilShape::Square),
            "circle" => Ok(StencilShape::Circle),
            other => Err(format!("unknown stencil shape '{}' (expected square|circle)", other)),
        }
    }
}

impl fmt::Display for StencilShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StencilShape::Square => f.write_str("square"),
            StencilShape::Circle => f.write_str("circle"),
        }
    }
}

/// Which state a brush writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    #[default]
    Filled,
    Empty,
}

impl Fill {
    #[inline]
    pub fn state(self) -> bool {
        matches!(self, Fill::Filled)
    }
}

impl FromStr for Fill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filled" | "fill" => Ok(Fill::Filled),
            "empty" | "clear" => Ok(Fill::Empty),
            other => Err(format!("unknown fill '{}' (expected filled|empty)", other)),
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Filled => f.write_str("filled"),
            Fill::Empty => f.write_str("empty"),
        }
    }
}

/// Edit configuration passed explicitly into every edit.
///
/// The radius is clamped once, by [`Brush::new`] or on deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BrushFields")]
pub struct Brush {
    pub shape: StencilShape,
    pub fill: Fill,
    pub radius: i32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            shape: StencilShape::Square,
            fill: Fill::Filled,
            radius: 0,
        }
    }
}

impl Brush {
    pub fn new(shape: StencilShape, fill: Fill, radius: i32) -> Self {
        Self {
            shape,
            fill,
            radius: clamp_radius(radius),
        }
    }

    /// Radius limited to `0..=MAX_RADIUS`, without logging.
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius.clamp(0, MAX_RADIUS)
    }

    /// Stencil initialized with this brush's fill and radius; center still unset.
    pub fn stencil(&self) -> Stencil {
        let mut s = Stencil::new(self.shape);
        s.initialize(self.fill.state(), self.radius());
        s
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct BrushFields {
    shape: StencilShape,
    fill: Fill,
    radius: i32,
}

impl Default for BrushFields {
    fn default() -> Self {
        let b = Brush::default();
        Self {
            shape: b.shape,
            fill: b.fill,
            radius: b.radius,
        }
    }
}

impl From<BrushFields> for Brush {
    fn from(f: BrushFields) -> Self {
        Brush::new(f.shape, f.fill, f.radius)
    }
}

fn clamp_radius(radius: i32) -> i32 {
    let r = radius.clamp(0, MAX_RADIUS);
    if r != radius {
        log::warn!("brush radius {} clamped to {}", radius, r);
    }
    r
}

/// A brush shape positioned on one grid.
///
/// The center is expressed in the local voxel coordinates of the grid being
/// edited, so the map resets it for every chunk an edit touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stencil {
    shape: StencilShape,
    fill: bool,
    radius: i32,
    center_x: i32,
    center_y: i32,
}

impl Stencil {
    pub const fn new(shape: StencilShape) -> Self {
        Self {
            shape,
            fill: true,
            radius: 0,
            center_x: 0,
            center_y: 0,
        }
    }

    pub fn initialize(&mut self, fill: bool, radius: i32) {
        self.fill = fill;
        self.radius = radius.max(0);
    }

    pub fn set_center(&mut self, x: i32, y: i32) {
        self.center_x = x;
        self.center_y = y;
    }

    #[inline]
    pub fn shape(&self) -> StencilShape {
        self.shape
    }
    #[inline]
    pub fn fill(&self) -> bool {
        self.fill
    }
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    #[inline]
    pub fn x_start(&self) -> i32 {
        self.center_x - self.radius
    }
    #[inline]
    pub fn x_end(&self) -> i32 {
        self.center_x + self.radius
    }
    #[inline]
    pub fn y_start(&self) -> i32 {
        self.center_y - self.radius
    }
    #[inline]
    pub fn y_end(&self) -> i32 {
        self.center_y + self.radius
    }

    /// New state for the voxel at `(x, y)`. Callers restrict `(x, y)` to the
    /// square `center ± radius`; the shape only decides inside that square.
    pub fn apply(&self, x: i32, y: i32, current: bool) -> bool {
        match self.shape {
            StencilShape::Square => self.fill,
            StencilShape::Circle => {
                let dx = x - self.center_x;
                let dy = y - self.center_y;
                // d² <= (r + 0.5)², scaled by 4 to stay in integers
                let reach = 2 * self.radius + 1;
                if 4 * (dx * dx + dy * dy) <= reach * reach {
                    self.fill
                } else {
                    current
                }
            }
        }
    }
}

/// Inclusive voxel range a stencil covers on one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StencilBounds {
    pub x_start: i32,
    pub x_end: i32,
    pub y_start: i32,
    pub y_end: i32,
}

impl StencilBounds {
    /// Stencil extents clipped to `[0, resolution - 1]` on both axes. A stencil
    /// entirely off the grid yields an empty range.
    pub fn clamped(stencil: &Stencil, resolution: usize) -> Self {
        let last = resolution as i32 - 1;
        Self {
            x_start: stencil.x_start().max(0),
            x_end: stencil.x_end().min(last),
            y_start: stencil.y_start().max(0),
            y_end: stencil.y_end().min(last),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_start > self.x_end || self.y_start > self.y_end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.x_end - self.x_start + 1) * (self.y_end - self.y_start + 1)) as usize
        }
    }

    /// Row-major iteration over the covered coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let b = *self;
        (b.y_start..=b.y_end).flat_map(move |y| (b.x_start..=b.x_end).map(move |x| (x, y)))
    }
}
