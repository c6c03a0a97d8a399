use contour_geom::Vec2;

/// Axis along which a dummy voxel is translated into the local frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DummyAxis {
    X,
    Y,
    XY,
}

/// One grid sample: fill state plus the three fixed points the triangulation
/// reads (sample center and the midpoints towards the +x and +y samples).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Voxel {
    pub state: bool,
    pub position: Vec2,
    pub x_edge: Vec2,
    pub y_edge: Vec2,
}

impl Voxel {
    pub fn new(x: usize, y: usize, size: f32) -> Self {
        let position = Vec2::new((x as f32 + 0.5) * size, (y as f32 + 0.5) * size);
        Self {
            state: false,
            position,
            x_edge: position + Vec2::new(size * 0.5, 0.0),
            y_edge: position + Vec2::new(0.0, size * 0.5),
        }
    }

    /// Copy of `source` moved by `offset` along `axis`. Used to view a
    /// neighboring grid's voxel in this grid's coordinate frame.
    #[inline]
    pub fn dummy_of(source: &Voxel, offset: f32, axis: DummyAxis) -> Self {
        let mut v = Voxel::default();
        v.become_dummy_of(source, offset, axis);
        v
    }

    pub fn become_dummy_of(&mut self, source: &Voxel, offset: f32, axis: DummyAxis) {
        let shift = match axis {
            DummyAxis::X => Vec2::new(offset, 0.0),
            DummyAxis::Y => Vec2::new(0.0, offset),
            DummyAxis::XY => Vec2::splat(offset),
        };
        self.state = source.state;
        self.position = source.position + shift;
        self.x_edge = source.x_edge + shift;
        self.y_edge = source.y_edge + shift;
    }
}
