use contour_edit::{Brush, Fill, MAX_RADIUS, StencilShape};
use contour_world::{ChunkCoord, MapConfig, VoxelMap};
use proptest::prelude::*;

fn arb_brush() -> impl Strategy<Value = Brush> {
    (
        prop_oneof![Just(StencilShape::Square), Just(StencilShape::Circle)],
        prop_oneof![Just(Fill::Filled), Just(Fill::Empty)],
        0..=MAX_RADIUS,
    )
        .prop_map(|(shape, fill, radius)| Brush::new(shape, fill, radius))
}

fn meshes(m: &VoxelMap) -> Vec<contour_mesh_cpu::MeshBuild> {
    m.chunks()
        .iter()
        .map(|c| m.mesh(c.coord).cloned().unwrap_or_default())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Edits rebuild every chunk that reads a changed voxel, so nothing is
    // left stale and a full rebuild changes no mesh.
    #[test]
    fn edits_leave_no_stale_chunk(
        edits in prop::collection::vec((0usize..18, 0usize..18, arb_brush()), 1..12)
    ) {
        let mut m = VoxelMap::new(MapConfig {
            size: 3.0,
            voxel_resolution: 6,
            chunk_resolution: 3,
            terrain: None,
        });
        for (x, y, brush) in &edits {
            m.edit_voxel(*x, *y, brush);
            prop_assert!(m.stale_chunks().is_empty());
        }
        let before = meshes(&m);
        m.rebuild_all();
        prop_assert_eq!(before, meshes(&m));
    }

    #[test]
    fn touched_chunks_cover_every_changed_voxel(
        x in 0usize..16, y in 0usize..16, brush in arb_brush()
    ) {
        let mut m = VoxelMap::new(MapConfig {
            size: 2.0,
            voxel_resolution: 4,
            chunk_resolution: 4,
            terrain: None,
        });
        let before = m.render_ascii();
        let r = m.edit_voxel(x, y, &brush);
        let after = m.render_ascii();
        let total = m.total_resolution();
        let mut changed = 0;
        for (row, (a, b)) in before.lines().zip(after.lines()).enumerate() {
            for (gx, (ca, cb)) in a.chars().zip(b.chars()).enumerate() {
                if ca != cb {
                    changed += 1;
                    let gy = total - 1 - row;
                    let owner = ChunkCoord::new((gx / 4) as i32, (gy / 4) as i32);
                    prop_assert!(r.touched.contains(&owner));
                }
            }
        }
        prop_assert_eq!(changed, r.changed);
    }
}
