use std::collections::HashMap;

use contour_edit::{Brush, Fill, StencilShape};
use contour_geom::Vec2;
use contour_mesh_cpu::MeshBuild;
use contour_world::{
    ChunkCoord, EditCommand, LogSink, MapConfig, TerrainParams, VoxelMap,
};

fn map(size: f32, voxel_resolution: usize, chunk_resolution: usize) -> VoxelMap {
    VoxelMap::new(MapConfig {
        size,
        voxel_resolution,
        chunk_resolution,
        terrain: None,
    })
}

fn filled_everywhere(size: f32, voxel_resolution: usize, chunk_resolution: usize) -> VoxelMap {
    VoxelMap::new(MapConfig {
        size,
        voxel_resolution,
        chunk_resolution,
        terrain: Some(TerrainParams {
            threshold: -2.0,
            ..TerrainParams::default()
        }),
    })
}

#[test]
fn fresh_map_is_empty_and_current() {
    let m = map(2.0, 8, 2);
    assert_eq!(m.chunks().len(), 4);
    assert_eq!(m.mesh_area(), 0.0);
    assert!(m.stale_chunks().is_empty());
    assert!(m.render_ascii().chars().all(|c| c == '.' || c == '\n'));
}

#[test]
fn filled_map_covers_sample_hull_without_seams() {
    let m = filled_everywhere(2.0, 8, 2);
    let vs = m.config().voxel_size();
    let hull = (2.0 - vs) * (2.0 - vs);
    assert!((m.mesh_area() - hull).abs() < 1e-4, "{} vs {}", m.mesh_area(), hull);
}

#[test]
fn filled_map_area_does_not_depend_on_chunking() {
    let one = filled_everywhere(3.0, 12, 1).mesh_area();
    let three = filled_everywhere(3.0, 4, 3).mesh_area();
    assert!((one - three).abs() < 1e-4);
}

#[test]
fn circle_radius_two_on_map() {
    let mut m = map(8.0, 8, 1);
    let brush = Brush::new(StencilShape::Circle, Fill::Filled, 2);
    let r = m.edit_voxel(4, 4, &brush);
    assert_eq!(r.touched, vec![ChunkCoord::new(0, 0)]);
    assert_eq!(r.changed, 21);
    // squared distance 4 is inside, 8 is outside
    assert_eq!(m.state(6, 4), Some(true));
    assert_eq!(m.state(4, 2), Some(true));
    assert_eq!(m.state(6, 6), Some(false));
    assert_eq!(m.state(2, 2), Some(false));
}

#[test]
fn point_edit_maps_to_voxel_and_fans_out_across_seams() {
    let mut m = map(2.0, 8, 2);
    let brush = Brush::new(StencilShape::Square, Fill::Filled, 0);
    // voxel (8, 3): first column of chunk (1, 0)
    let r = m.edit(&EditCommand::new(Vec2::new(0.01, -0.6), brush));
    assert_eq!(r.changed, 1);
    assert_eq!(m.state(8, 3), Some(true));
    assert_eq!(r.touched, vec![ChunkCoord::new(1, 0), ChunkCoord::new(0, 0)]);
    assert!(m.stale_chunks().is_empty());
    // the left chunk triangulates the seam cells that read the new voxel
    assert!(!m.mesh(ChunkCoord::new(0, 0)).unwrap().is_empty());
}

#[test]
fn edit_inside_a_chunk_touches_only_that_chunk() {
    let mut m = map(2.0, 8, 2);
    let brush = Brush::new(StencilShape::Square, Fill::Filled, 1);
    let r = m.edit_voxel(12, 12, &brush);
    assert_eq!(r.touched, vec![ChunkCoord::new(1, 1)]);
    assert_eq!(r.changed, 9);
}

#[test]
fn edit_past_the_map_edge_is_clamped() {
    let mut m = map(2.0, 8, 2);
    let brush = Brush::new(StencilShape::Square, Fill::Filled, 2);
    let r = m.edit(&EditCommand::new(Vec2::new(5.0, 5.0), brush));
    assert_eq!(r.touched, vec![ChunkCoord::new(1, 1)]);
    // 3x3 of the 5x5 square lands on the map
    assert_eq!(r.changed, 9);
    assert_eq!(m.state(15, 15), Some(true));
}

#[test]
fn erasing_restores_empty_meshes() {
    let mut m = map(2.0, 8, 2);
    let fill = Brush::new(StencilShape::Circle, Fill::Filled, 3);
    let erase = Brush::new(StencilShape::Square, Fill::Empty, 3);
    m.edit_voxel(8, 8, &fill);
    assert!(m.mesh_area() > 0.0);
    let r = m.edit_voxel(8, 8, &erase);
    assert_eq!(r.touched.len(), 4);
    assert_eq!(m.mesh_area(), 0.0);
}

#[test]
fn set_voxel_on_a_seam_marks_the_reader_stale() {
    let mut m = map(2.0, 4, 2);
    assert!(m.set_voxel(4, 0, true));
    assert!(!m.set_voxel(4, 0, true));
    assert!(!m.set_voxel(99, 0, true));
    assert_eq!(
        m.stale_chunks(),
        vec![ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]
    );
    assert!(m.mesh(ChunkCoord::new(0, 0)).unwrap().is_empty());
    let refreshed = m.refresh_stale();
    assert_eq!(refreshed, vec![ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]);
    assert!(m.stale_chunks().is_empty());
    assert!(!m.mesh(ChunkCoord::new(0, 0)).unwrap().is_empty());
}

#[test]
fn rebuild_chunk_rejects_off_map_coords() {
    let mut m = map(2.0, 4, 2);
    assert!(m.rebuild_chunk(ChunkCoord::new(1, 1)));
    assert!(!m.rebuild_chunk(ChunkCoord::new(2, 0)));
    assert!(!m.rebuild_chunk(ChunkCoord::new(-1, 0)));
}

#[test]
fn sinks_receive_placed_meshes() {
    let mut m = map(2.0, 4, 2);
    let r = m.edit_voxel(1, 1, &Brush::new(StencilShape::Square, Fill::Filled, 0));
    let mut placed: HashMap<ChunkCoord, MeshBuild> = HashMap::new();
    m.publish(&r.touched, &mut placed);
    assert_eq!(placed.len(), 1);
    let mesh = &placed[&ChunkCoord::new(0, 0)];
    // voxel (1,1) sits at chunk-local (0.375, 0.375), origin (-1, -1)
    assert!(
        mesh.triangles()
            .flatten()
            .any(|p| (p - Vec2::new(-0.625, -0.625)).length() < 1e-5)
    );
    let local = m.mesh(ChunkCoord::new(0, 0)).unwrap();
    assert!((mesh.area() - local.area()).abs() < 1e-6);

    let mut log = LogSink::default();
    m.publish_all(&mut log);
    assert_eq!(log.submitted, 4);
    assert_eq!(log.triangles, local.triangle_count());
}

fn meshes(m: &VoxelMap) -> Vec<MeshBuild> {
    m.chunks()
        .iter()
        .map(|c| m.mesh(c.coord).cloned().unwrap_or_default())
        .collect()
}

#[test]
fn edit_beside_a_seam_leaves_the_left_chunk_current() {
    let mut m = map(3.0, 6, 3);
    // voxel (11, 0) is the last column of chunk (1, 0); chunk (0, 0) never reads it
    let r = m.edit_voxel(11, 0, &Brush::new(StencilShape::Square, Fill::Filled, 0));
    assert_eq!(r.touched, vec![ChunkCoord::new(1, 0)]);
    assert!(m.stale_chunks().is_empty());
    let before = meshes(&m);
    m.rebuild_all();
    assert_eq!(before, meshes(&m));
}

#[test]
fn set_voxel_marks_only_chunks_that_read_it() {
    let mut m = map(3.0, 6, 3);
    // interior voxel of chunk (1, 0)
    assert!(m.set_voxel(9, 2, true));
    assert_eq!(m.stale_chunks(), vec![ChunkCoord::new(1, 0)]);
    m.refresh_stale();

    // row 0 of chunk (0, 1) is read by chunk (0, 0) through its +y seam
    assert!(m.set_voxel(2, 6, true));
    assert_eq!(
        m.stale_chunks(),
        vec![ChunkCoord::new(0, 0), ChunkCoord::new(0, 1)]
    );
    m.refresh_stale();

    // voxel (0, 0) of chunk (1, 1) is read by all three chunks below and left
    assert!(m.set_voxel(6, 6, true));
    assert_eq!(
        m.stale_chunks(),
        vec![
            ChunkCoord::new(0, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(0, 1),
            ChunkCoord::new(1, 1)
        ]
    );
    assert_eq!(m.refresh_stale().len(), 4);
    assert!(m.stale_chunks().is_empty());
}

#[test]
fn far_off_map_centers_touch_nothing() {
    let mut m = map(2.0, 8, 2);
    let brush = Brush::new(StencilShape::Square, Fill::Filled, 5);
    for (x, y) in [
        (i32::MAX as usize, 0),
        (0, i32::MAX as usize),
        (usize::MAX, usize::MAX),
    ] {
        let r = m.edit_voxel(x, y, &brush);
        assert!(r.touched.is_empty());
        assert_eq!(r.changed, 0);
    }
    assert_eq!(m.mesh_area(), 0.0);
}

#[test]
fn brush_centered_just_off_map_still_reaches_the_edge() {
    let mut m = map(2.0, 8, 2);
    let brush = Brush::new(StencilShape::Square, Fill::Filled, 5);
    let r = m.edit_voxel(18, 3, &brush);
    assert_eq!(r.touched, vec![ChunkCoord::new(1, 1), ChunkCoord::new(1, 0)]);
    // columns 13..=15, rows 0..=8
    assert_eq!(r.changed, 27);
    assert_eq!(m.state(13, 8), Some(true));
    assert_eq!(m.state(12, 3), Some(false));
}
