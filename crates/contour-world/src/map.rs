use rayon::prelude::*;

use contour_chunk::{ApplyStats, VoxelGrid};
use contour_edit::{Brush, MAX_RADIUS};
use contour_geom::Vec2;
use contour_mesh_cpu::{BuildStats, GridNeighbors, MeshBuild, build_grid_mesh};

use crate::config::MapConfig;
use crate::coords::{ChunkCoord, ChunkNeighbors, VoxelAddress};
use crate::sink::MeshSink;
use crate::terrain::TerrainSampler;

/// One tile of the map: its voxel grid placed at `origin` in map-local space.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub origin: Vec2,
    pub grid: VoxelGrid,
    pub neighbors: ChunkNeighbors,
}

/// A brush stroke at a point in map-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditCommand {
    pub point: Vec2,
    pub brush: Brush,
}

impl EditCommand {
    pub fn new(point: Vec2, brush: Brush) -> Self {
        Self { point, brush }
    }
}

/// Chunks an edit visited (in visiting order) and how many voxels changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditReport {
    pub touched: Vec<ChunkCoord>,
    pub changed: usize,
}

/// Stamps of the latest write anywhere in a chunk and on the voxels its -x,
/// -y and -x-y neighbors read when stitching.
#[derive(Clone, Copy, Debug, Default)]
struct WriteStamps {
    any: u64,
    first_column: u64,
    first_row: u64,
    origin: u64,
}

impl WriteStamps {
    fn mark(&mut self, stats: &ApplyStats, stamp: u64) {
        if stats.changed == 0 {
            return;
        }
        self.any = stamp;
        if stats.first_column {
            self.first_column = stamp;
        }
        if stats.first_row {
            self.first_row = stamp;
        }
        if stats.origin {
            self.origin = stamp;
        }
    }
}

/// `chunk_resolution²` chunks in a row-major arena, centered on the origin.
///
/// Meshes live in a parallel arena so a chunk can be re-triangulated while
/// the grids it reads through its seams stay shared. Every voxel write bumps a
/// stamp; a chunk whose mesh is older than a write to its own voxels or to the
/// neighbor voxels it stitches against is stale.
pub struct VoxelMap {
    config: MapConfig,
    chunks: Vec<Chunk>,
    meshes: Vec<MeshBuild>,
    writes: Vec<WriteStamps>,
    built_stamp: Vec<u64>,
    stamp: u64,
}

impl VoxelMap {
    /// Builds and fully triangulates the map.
    ///
    /// Panics when `config` fails [`MapConfig::validate`].
    pub fn new(config: MapConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid map config: {}", e);
        }
        let cres = config.chunk_resolution;
        let vres = config.voxel_resolution;
        let chunk_size = config.chunk_size();
        let half = config.half_size();
        let sampler = config.terrain.as_ref().map(TerrainSampler::new);

        let index = |cx: usize, cy: usize| (cx < cres && cy < cres).then(|| cy * cres + cx);
        let mut chunks = Vec::with_capacity(cres * cres);
        for cy in 0..cres {
            for cx in 0..cres {
                let mut grid = VoxelGrid::new(vres, chunk_size);
                if let Some(s) = &sampler {
                    grid.fill_with(|x, y, _| s.filled(cx * vres + x, cy * vres + y));
                }
                chunks.push(Chunk {
                    coord: ChunkCoord::new(cx as i32, cy as i32),
                    origin: Vec2::new(cx as f32 * chunk_size - half, cy as f32 * chunk_size - half),
                    grid,
                    neighbors: ChunkNeighbors {
                        x: index(cx + 1, cy),
                        y: index(cx, cy + 1),
                        xy: index(cx + 1, cy + 1),
                    },
                });
            }
        }
        log::info!(
            "voxel map: {}x{} chunks of {}x{} voxels, size {}{}",
            cres,
            cres,
            vres,
            vres,
            config.size,
            if sampler.is_some() { ", terrain seeded" } else { "" }
        );

        let n = chunks.len();
        let mut map = Self {
            config,
            chunks,
            meshes: vec![MeshBuild::default(); n],
            writes: vec![WriteStamps::default(); n],
            built_stamp: vec![0; n],
            stamp: 0,
        };
        map.rebuild_all();
        map
    }

    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Voxels per map side.
    #[inline]
    pub fn total_resolution(&self) -> usize {
        self.config.total_resolution()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    fn chunk_index(&self, coord: ChunkCoord) -> Option<usize> {
        let cres = self.config.chunk_resolution as i32;
        if coord.cx < 0 || coord.cy < 0 || coord.cx >= cres || coord.cy >= cres {
            return None;
        }
        Some((coord.cy * cres + coord.cx) as usize)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunk_index(coord).map(|i| &self.chunks[i])
    }

    /// Latest triangulation of `coord`, in chunk-local coordinates.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&MeshBuild> {
        self.chunk_index(coord).map(|i| &self.meshes[i])
    }

    /// Global voxel coordinates under `point`, clamped onto the map.
    pub fn voxel_coords(&self, point: Vec2) -> (usize, usize) {
        let half = self.config.half_size();
        let vs = self.config.voxel_size();
        let max = self.total_resolution() as f32 - 1.0;
        let to_index = |v: f32| {
            let i = ((v + half) / vs).floor();
            // NaN falls through both comparisons and lands on 0
            if i >= max {
                max as usize
            } else if i > 0.0 {
                i as usize
            } else {
                0
            }
        };
        (to_index(point.x), to_index(point.y))
    }

    /// Chunk and chunk-local voxel under `point`, clamped onto the map.
    pub fn locate(&self, point: Vec2) -> VoxelAddress {
        let (gx, gy) = self.voxel_coords(point);
        self.address(gx, gy)
    }

    fn address(&self, gx: usize, gy: usize) -> VoxelAddress {
        let vres = self.config.voxel_resolution;
        VoxelAddress {
            chunk: ChunkCoord::new((gx / vres) as i32, (gy / vres) as i32),
            x: gx % vres,
            y: gy % vres,
        }
    }

    /// State of the voxel at global coordinates; `None` off the map.
    pub fn state(&self, gx: usize, gy: usize) -> Option<bool> {
        let total = self.total_resolution();
        if gx >= total || gy >= total {
            return None;
        }
        let a = self.address(gx, gy);
        let i = self.chunk_index(a.chunk)?;
        Some(self.chunks[i].grid.state(a.x, a.y))
    }

    pub fn edit(&mut self, cmd: &EditCommand) -> EditReport {
        let (gx, gy) = self.voxel_coords(cmd.point);
        self.edit_voxel(gx, gy, &cmd.brush)
    }

    /// Applies `brush` centered on global voxel `(center_x, center_y)` to every
    /// chunk it reaches and re-triangulates those chunks.
    ///
    /// The chunk range starts one voxel early so chunks that read the edited
    /// columns or rows through their +x/+y seams are rebuilt too.
    pub fn edit_voxel(&mut self, center_x: usize, center_y: usize, brush: &Brush) -> EditReport {
        let vres = self.config.voxel_resolution as i32;
        let last = self.config.chunk_resolution as i32 - 1;
        let r = brush.radius();
        // Centers further out than this reach no voxel on the map
        let limit = self.total_resolution() + MAX_RADIUS as usize + 1;
        let saturate = |c: usize| i32::try_from(c.min(limit)).unwrap_or(i32::MAX);
        let (cx, cy) = (saturate(center_x), saturate(center_y));
        let x_start = cx.saturating_sub(r + 1).div_euclid(vres).max(0);
        let x_end = cx.saturating_add(r).div_euclid(vres).min(last);
        let y_start = cy.saturating_sub(r + 1).div_euclid(vres).max(0);
        let y_end = cy.saturating_add(r).div_euclid(vres).min(last);

        self.stamp += 1;
        let mut stencil = brush.stencil();
        let mut report = EditReport::default();
        // Higher chunks first so each rebuild reads already-edited seam neighbors
        for y in (y_start..=y_end).rev() {
            for x in (x_start..=x_end).rev() {
                let coord = ChunkCoord::new(x, y);
                let Some(i) = self.chunk_index(coord) else {
                    continue;
                };
                stencil.set_center(cx - x * vres, cy - y * vres);
                log::trace!(
                    "stencil center ({}, {}) in chunk ({}, {})",
                    cx - x * vres,
                    cy - y * vres,
                    x,
                    y
                );
                let stats = self.chunks[i].grid.apply(&stencil);
                self.writes[i].mark(&stats, self.stamp);
                report.changed += stats.changed;
                report.touched.push(coord);
                self.rebuild_index(i);
            }
        }
        log::info!(
            "edit {} r={} {} at voxel ({}, {}): {} chunks touched, {} voxels changed",
            brush.shape,
            r,
            brush.fill,
            center_x,
            center_y,
            report.touched.len(),
            report.changed
        );
        report
    }

    /// Writes one voxel without re-triangulating anything. Returns whether the
    /// state changed; off-map coordinates are ignored.
    pub fn set_voxel(&mut self, gx: usize, gy: usize, state: bool) -> bool {
        let total = self.total_resolution();
        if gx >= total || gy >= total {
            log::warn!("set_voxel ({}, {}) outside {}x{} map", gx, gy, total, total);
            return false;
        }
        let a = self.address(gx, gy);
        let Some(i) = self.chunk_index(a.chunk) else {
            return false;
        };
        if self.chunks[i].grid.state(a.x, a.y) == state {
            return false;
        }
        self.stamp += 1;
        self.chunks[i].grid.set_state(a.x, a.y, state);
        let mut stats = ApplyStats::default();
        stats.record(a.x, a.y);
        self.writes[i].mark(&stats, self.stamp);
        true
    }

    fn is_stale_index(&self, i: usize) -> bool {
        let n = &self.chunks[i].neighbors;
        let w = &self.writes;
        let newest = [
            n.x.map(|j| w[j].first_column),
            n.y.map(|j| w[j].first_row),
            n.xy.map(|j| w[j].origin),
        ]
        .into_iter()
        .flatten()
        .fold(w[i].any, u64::max);
        newest > self.built_stamp[i]
    }

    /// Chunks whose mesh predates a write to their own voxels or to the
    /// neighbor voxels they stitch against.
    pub fn stale_chunks(&self) -> Vec<ChunkCoord> {
        (0..self.chunks.len())
            .filter(|&i| self.is_stale_index(i))
            .map(|i| self.chunks[i].coord)
            .collect()
    }

    /// Re-triangulates every stale chunk and returns them.
    pub fn refresh_stale(&mut self) -> Vec<ChunkCoord> {
        let stale: Vec<usize> = (0..self.chunks.len())
            .filter(|&i| self.is_stale_index(i))
            .collect();
        for &i in &stale {
            self.rebuild_index(i);
        }
        stale.into_iter().map(|i| self.chunks[i].coord).collect()
    }

    /// Re-triangulates one chunk. Returns false for coordinates off the map.
    pub fn rebuild_chunk(&mut self, coord: ChunkCoord) -> bool {
        match self.chunk_index(coord) {
            Some(i) => {
                self.rebuild_index(i);
                true
            }
            None => false,
        }
    }

    fn rebuild_index(&mut self, i: usize) {
        let stats = build_chunk(&self.chunks, i, &mut self.meshes[i]);
        self.built_stamp[i] = self.stamp;
        let c = self.chunks[i].coord;
        log::debug!(
            "rebuilt chunk ({}, {}): {} cells, {} gap cells, {} vertices, {} triangles",
            c.cx,
            c.cy,
            stats.cells,
            stats.gap_cells,
            self.meshes[i].vertex_count(),
            self.meshes[i].triangle_count()
        );
    }

    /// Re-triangulates every chunk in parallel.
    pub fn rebuild_all(&mut self) {
        let chunks = &self.chunks;
        let (cells, gaps) = self
            .meshes
            .par_iter_mut()
            .enumerate()
            .map(|(i, mesh)| {
                let s = build_chunk(chunks, i, mesh);
                (s.cells, s.gap_cells)
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));
        self.built_stamp.fill(self.stamp);
        log::debug!(
            "rebuilt all {} chunks: {} cells, {} gap cells",
            self.chunks.len(),
            cells,
            gaps
        );
    }

    /// Sends the meshes of `coords` to `sink`; off-map coordinates are skipped.
    pub fn publish(&self, coords: &[ChunkCoord], sink: &mut dyn MeshSink) {
        for &c in coords {
            if let Some(i) = self.chunk_index(c) {
                sink.submit(c, self.chunks[i].origin, &self.meshes[i]);
            }
        }
    }

    pub fn publish_all(&self, sink: &mut dyn MeshSink) {
        for (chunk, mesh) in self.chunks.iter().zip(&self.meshes) {
            sink.submit(chunk.coord, chunk.origin, mesh);
        }
    }

    /// Sum of the signed areas of every chunk mesh.
    pub fn mesh_area(&self) -> f32 {
        self.meshes.iter().map(MeshBuild::area).sum()
    }

    /// Voxel states as text, top row first: `#` filled, `.` empty.
    pub fn render_ascii(&self) -> String {
        let total = self.total_resolution();
        let mut out = String::with_capacity((total + 1) * total);
        for gy in (0..total).rev() {
            for gx in 0..total {
                let filled = self.state(gx, gy).unwrap_or(false);
                out.push(if filled { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

fn build_chunk(chunks: &[Chunk], i: usize, out: &mut MeshBuild) -> BuildStats {
    let chunk = &chunks[i];
    let n = &chunk.neighbors;
    let neighbors = GridNeighbors::new(
        n.x.map(|j| &chunks[j].grid),
        n.y.map(|j| &chunks[j].grid),
        n.xy.map(|j| &chunks[j].grid),
    );
    build_grid_mesh(&chunk.grid, &neighbors, out)
}
