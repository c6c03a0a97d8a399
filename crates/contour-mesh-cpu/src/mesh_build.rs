use contour_geom::{Vec2, signed_area2};

/// Vertex and triangle-index buffers for one chunk.
///
/// Positions are stored flat as `x, y, z` triples (z is always 0) so the
/// buffers can be handed to a renderer unchanged.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across edits.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.idx.clear();
    }

    /// Pre-reserve for `n_cells` cells of the largest shape (a pentagon).
    #[inline]
    pub fn reserve_cells(&mut self, n_cells: usize) {
        self.pos.reserve(n_cells * 5 * 3);
        self.idx.reserve(n_cells * 9);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Vec2 {
        Vec2::new(self.pos[i * 3], self.pos[i * 3 + 1])
    }

    /// Triangle corners in emission order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| {
            [
                self.vertex(t[0] as usize),
                self.vertex(t[1] as usize),
                self.vertex(t[2] as usize),
            ]
        })
    }

    /// Sum of signed triangle areas. Equals the covered area when every
    /// triangle winds counter-clockwise.
    pub fn area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| signed_area2(a, b, c) * 0.5)
            .sum()
    }

    #[inline]
    fn push_vertex(&mut self, p: Vec2) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&[p.x, p.y, 0.0]);
        i
    }

    pub fn add_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        let base = self.push_vertex(a);
        self.push_vertex(b);
        self.push_vertex(c);
        self.idx.extend_from_slice(&[base, base + 1, base + 2]);
    }

    pub fn add_quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2) {
        let base = self.push_vertex(a);
        self.push_vertex(b);
        self.push_vertex(c);
        self.push_vertex(d);
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn add_pentagon(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, e: Vec2) {
        let base = self.push_vertex(a);
        self.push_vertex(b);
        self.push_vertex(c);
        self.push_vertex(d);
        self.push_vertex(e);
        // fan from the first vertex
        self.idx.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
            base,
            base + 3,
            base + 4,
        ]);
    }
}
