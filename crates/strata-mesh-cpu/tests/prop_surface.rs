use proptest::prelude::*;
use strata_blocks::TerrainType;
use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_mesh_cpu::{MeshBuffers, SurfaceMeshBuilder};
use strata_world::GridRegion;

fn random_grid() -> impl Strategy<Value = VoxelGrid> {
    (1usize..=5, 1usize..=5, 1usize..=5).prop_flat_map(|(sx, sy, sz)| {
        proptest::collection::vec(0u8..7, sx * sy * sz).prop_map(move |codes| {
            let cells = codes
                .into_iter()
                .filter_map(TerrainType::from_code)
                .collect();
            VoxelGrid::from_cells(GridRegion::new(0, 0, sx, sy, sz), cells)
        })
    })
}

type Cell = (i32, i32, i32);

const NEIGHBORS: [Cell; 6] = [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)];

/// `(code, cell, outward direction)` for every quad, recovered from its geometry
/// at unit scale: step half a cell back from the quad's centroid along its normal.
fn surfaced_faces(bufs: &MeshBuffers) -> Vec<(u8, Cell, Cell)> {
    let mut out = Vec::new();
    for (kind, mb) in bufs.iter() {
        for q in 0..mb.quad_count() {
            let n = mb.normal(4 * q);
            let sum = (0..4).fold(Vec3::ZERO, |acc, k| acc + mb.position(4 * q + k));
            let inside = sum * 0.25 - n * 0.5;
            out.push((
                kind.code(),
                (inside.x.floor() as i32, inside.y.floor() as i32, inside.z.floor() as i32),
                (n.x.round() as i32, n.y.round() as i32, n.z.round() as i32),
            ));
        }
    }
    out.sort_unstable();
    out
}

/// Ground shows toward anything that is not ground, the grid edge included.
/// Water shows only toward air inside the grid.
fn exposed_faces(grid: &VoxelGrid) -> Vec<(u8, Cell, Cell)> {
    let mut out = Vec::new();
    for y in 0..grid.sy { for z in 0..grid.sz { for x in 0..grid.sx {
        let cell = grid.get(x, y, z);
        let at = (x as i32, y as i32, z as i32);
        for d in NEIGHBORS {
            let next = grid.get_checked(at.0 + d.0, at.1 + d.1, at.2 + d.2);
            let shown = match cell {
                TerrainType::Air => false,
                TerrainType::Water => next == Some(TerrainType::Air),
                _ => !next.is_some_and(TerrainType::is_ground),
            };
            if shown {
                out.push((cell.code(), at, d));
            }
        }
    }}}
    out.sort_unstable();
    out
}

proptest! {
    // Indices come in whole quads and never point past the bucket's vertices
    #[test]
    fn indices_are_whole_quads_in_range(grid in random_grid(), cw in 0.25f32..4.0, ch in 0.25f32..4.0) {
        let mut mesher = SurfaceMeshBuilder::new(cw, ch);
        let bufs = mesher.build(&grid);
        for (_, mb) in bufs.iter() {
            prop_assert_eq!(mb.idx.len() % 6, 0);
            prop_assert_eq!(mb.uv.len(), mb.vertex_count() * 2);
            prop_assert_eq!(mb.norm.len(), mb.pos.len());
            prop_assert!(mb.idx.iter().all(|&i| (i as usize) < mb.vertex_count()));
        }
    }

    // Each quad sits on an exposed face of a cell of its bucket's type, and every
    // exposed face gets exactly one quad
    #[test]
    fn quads_cover_exactly_the_exposed_faces(grid in random_grid()) {
        let mut mesher = SurfaceMeshBuilder::new(1.0, 1.0);
        let bufs = mesher.build(&grid);
        let surfaced = surfaced_faces(bufs);
        for &(code, (x, y, z), _) in &surfaced {
            prop_assert_eq!(grid.get_checked(x, y, z).map(TerrainType::code), Some(code));
        }
        prop_assert_eq!(surfaced, exposed_faces(&grid));
    }

    // Both triangles of every quad face outward
    #[test]
    fn triangles_wind_along_normal(grid in random_grid()) {
        let mut mesher = SurfaceMeshBuilder::new(1.0, 0.5);
        let bufs = mesher.build(&grid);
        for (_, mb) in bufs.iter() {
            for tri in mb.idx.chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mb.position(i as usize));
                let n = mb.normal(tri[0] as usize);
                prop_assert!((b - a).cross(c - a).dot(n) > 0.0);
            }
        }
    }

    // Meshing the same grid again, with or without clear, yields the same buffers
    #[test]
    fn rebuild_is_idempotent(grid in random_grid()) {
        let mut mesher = SurfaceMeshBuilder::new(1.0, 0.5);
        let first = mesher.build(&grid).clone();
        prop_assert_eq!(mesher.build(&grid), &first);
        mesher.clear();
        prop_assert_eq!(mesher.build(&grid), &first);
    }
}
