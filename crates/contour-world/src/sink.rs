use std::collections::HashMap;

use contour_geom::Vec2;
use contour_mesh_cpu::MeshBuild;

use crate::coords::ChunkCoord;

/// Receives finished chunk meshes for display. `origin` is the chunk's
/// offset in map-local coordinates; mesh vertices are chunk-local.
pub trait MeshSink {
    fn submit(&mut self, chunk: ChunkCoord, origin: Vec2, mesh: &MeshBuild);
}

/// Keeps the latest mesh per chunk, already translated into map-local space.
impl MeshSink for HashMap<ChunkCoord, MeshBuild> {
    fn submit(&mut self, chunk: ChunkCoord, origin: Vec2, mesh: &MeshBuild) {
        let mut placed = mesh.clone();
        for p in placed.pos.chunks_exact_mut(3) {
            p[0] += origin.x;
            p[1] += origin.y;
        }
        self.insert(chunk, placed);
    }
}

/// Logs a one-line summary per submitted mesh.
#[derive(Default, Debug)]
pub struct LogSink {
    pub submitted: usize,
    pub triangles: usize,
}

impl MeshSink for LogSink {
    fn submit(&mut self, chunk: ChunkCoord, origin: Vec2, mesh: &MeshBuild) {
        self.submitted += 1;
        self.triangles += mesh.triangle_count();
        log::info!(
            "chunk ({}, {}) at ({:.3}, {:.3}): {} vertices, {} triangles, area {:.4}",
            chunk.cx,
            chunk.cy,
            origin.x,
            origin.y,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.area()
        );
    }
}
