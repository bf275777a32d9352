use strata_blocks::TerrainType;
use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_mesh_cpu::{MeshBuild, SurfaceMeshBuilder, WATER_SURFACE_HEIGHT};
use strata_world::GridRegion;

fn grid(sx: usize, sy: usize, sz: usize, cells: &[(usize, usize, usize, TerrainType)]) -> VoxelGrid {
    let mut g = VoxelGrid::empty(GridRegion::new(0, 0, sx, sy, sz));
    for &(x, y, z, t) in cells {
        g.set(x, y, z, t);
    }
    g
}

fn quads(mesher: &SurfaceMeshBuilder, t: TerrainType) -> usize {
    mesher.buffers().bucket(t).map_or(0, MeshBuild::quad_count)
}

#[test]
fn lone_cell_in_column_shows_all_faces() {
    let g = grid(1, 5, 1, &[(0, 2, 0, TerrainType::Sand)]);
    let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
    mesher.build(&g);
    assert_eq!(quads(&mesher, TerrainType::Sand), 6);
    assert_eq!(mesher.buffers().stats().total_quads(), 6);
}

#[test]
fn lone_cell_on_the_bottom_row_shows_its_underside() {
    let g = grid(1, 4, 1, &[(0, 0, 0, TerrainType::HighGround)]);
    let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
    mesher.build(&g);
    assert_eq!(quads(&mesher, TerrainType::HighGround), 6);
    let mb = mesher.buffers().bucket(TerrainType::HighGround).unwrap();
    let down = (0..mb.vertex_count())
        .filter(|&i| mb.normal(i) == Vec3::new(0.0, -1.0, 0.0))
        .collect::<Vec<_>>();
    assert_eq!(down.len(), 4);
    assert!(down.iter().all(|&i| mb.position(i).y == 0.0));
}

#[test]
fn touching_ground_cells_hide_shared_face() {
    let g = grid(
        2,
        1,
        1,
        &[(0, 0, 0, TerrainType::DarkSand), (1, 0, 0, TerrainType::HighGround)],
    );
    let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
    mesher.build(&g);
    assert_eq!(quads(&mesher, TerrainType::DarkSand), 5);
    assert_eq!(quads(&mesher, TerrainType::HighGround), 5);
    // no +X face on the left cell sits on the shared plane x = 1
    let left = mesher.buffers().bucket(TerrainType::DarkSand).unwrap();
    for i in 0..left.vertex_count() {
        assert!(left.normal(i) != Vec3::new(1.0, 0.0, 0.0));
    }
}

#[test]
fn water_is_never_surfaced_at_the_grid_boundary() {
    let g = grid(1, 1, 1, &[(0, 0, 0, TerrainType::Water)]);
    let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
    assert!(mesher.build(&g).is_empty());
}

#[test]
fn water_surface_faces_air_only() {
    // water over ground, air above, inside a 3x3x3 ground-walled pit
    let mut g = grid(3, 3, 3, &[]);
    for z in 0..3 {
        for x in 0..3 {
            g.set(x, 0, z, TerrainType::LowGround);
        }
    }
    g.set(1, 1, 1, TerrainType::Water);
    for (x, z) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
        g.set(x, 1, z, TerrainType::Water);
    }
    let mut mesher = SurfaceMeshBuilder::new(1.0, 0.5);
    mesher.build(&g);
    let water = mesher.buffers().bucket(TerrainType::Water).unwrap();
    // five water cells: each has air above; the four arms also touch air sideways
    // at their diagonal neighbors, while faces on the grid boundary are skipped
    for i in 0..water.vertex_count() {
        let n = water.normal(i);
        if n == Vec3::new(0.0, 1.0, 0.0) {
            assert!((water.position(i).y - (1.0 + WATER_SURFACE_HEIGHT) * 0.5).abs() < 1e-6);
        }
        assert!(n != Vec3::new(0.0, -1.0, 0.0));
    }
    // top faces: 5; side faces toward air corners: 2 per arm
    assert_eq!(water.quad_count(), 5 + 4 * 2);
    // ground still shows its top under the water
    let ground = mesher.buffers().bucket(TerrainType::LowGround).unwrap();
    let tops: Vec<usize> = (0..ground.vertex_count())
        .filter(|&i| ground.normal(i) == Vec3::new(0.0, 1.0, 0.0))
        .collect();
    assert_eq!(tops.len(), 9 * 4);
    assert!(tops.iter().all(|&i| (ground.position(i).y - 0.5).abs() < 1e-6));
}

#[test]
fn rebuild_after_clear_is_identical() {
    let mut g = grid(4, 4, 4, &[]);
    for z in 0..4 {
        for x in 0..4 {
            for y in 0..=(x + z) % 4 {
                g.set(x, y, z, TerrainType::ground_band((x * 3 + z) % 5));
            }
        }
    }
    g.set(0, 3, 3, TerrainType::Water);
    let mut mesher = SurfaceMeshBuilder::new(1.0, 0.5);
    let first = mesher.build(&g).clone();
    let again = mesher.build(&g).clone();
    assert_eq!(first, again);
    mesher.clear();
    assert!(mesher.buffers().is_empty());
    assert_eq!(mesher.build(&g), &first);
}

#[test]
fn merged_mesh_keeps_one_submesh_per_bucket() {
    let g = grid(
        3,
        2,
        1,
        &[
            (0, 0, 0, TerrainType::Sand),
            (2, 0, 0, TerrainType::MidGround),
            (1, 0, 0, TerrainType::Water),
        ],
    );
    let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
    let merged = mesher.build(&g).merged();
    assert_eq!(merged.submesh_count(), strata_blocks::BUCKET_COUNT);
    let vc = merged.vertex_count() as u32;
    for sub in &merged.submeshes {
        assert_eq!(sub.len() % 6, 0);
        assert!(sub.iter().all(|&i| i < vc));
    }
    assert!(!merged.submeshes[TerrainType::Water.code() as usize].is_empty());
}
