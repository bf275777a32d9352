use strata_blocks::TerrainType;
use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_world::WorldConfig;

use crate::buffers::MeshBuffers;
use crate::constants::{CUBE_VERTICES, WATER_VERTICES};
use crate::face::Face;

/// Whether `cell` shows its face toward `neighbor` (`None` = outside the grid).
#[inline]
pub fn face_visible(cell: TerrainType, neighbor: Option<TerrainType>) -> bool {
    match (cell, neighbor) {
        (c, _) if c.is_air() => false,
        (c, None) => !c.is_water(),
        (c, Some(n)) if c.is_water() => n.is_air(),
        (_, Some(n)) => !n.is_ground(),
    }
}

/// Emits the visible faces of every non-air cell, bucketed by terrain code. Buffers
/// persist between builds so repeated meshing of same-sized grids does not reallocate.
#[derive(Clone, Debug)]
pub struct SurfaceMeshBuilder {
    cell_width: f32,
    cell_height: f32,
    buffers: MeshBuffers,
}

impl SurfaceMeshBuilder {
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            buffers: MeshBuffers::default(),
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.cell_width, config.cell_height)
    }

    #[inline]
    pub fn cell_scale(&self) -> Vec3 {
        Vec3::new(self.cell_width, self.cell_height, self.cell_width)
    }

    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    pub fn into_buffers(self) -> MeshBuffers {
        self.buffers
    }

    /// Resets every bucket, keeping allocations.
    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    /// Replaces the current buffers with the surface of `grid`, in grid-local
    /// coordinates scaled by the cell size.
    pub fn build(&mut self, grid: &VoxelGrid) -> &MeshBuffers {
        self.buffers.clear();
        let scale = self.cell_scale();
        for y in 0..grid.sy {
            for z in 0..grid.sz {
                for x in 0..grid.sx {
                    let cell = grid.get(x, y, z);
                    let Some(bucket) = cell.bucket() else {
                        continue;
                    };
                    let table = if cell.is_water() {
                        &WATER_VERTICES
                    } else {
                        &CUBE_VERTICES
                    };
                    let origin = Vec3::new(x as f32, y as f32, z as f32);
                    for face in Face::ALL {
                        let (dx, dy, dz) = face.delta();
                        let neighbor =
                            grid.get_checked(x as i32 + dx, y as i32 + dy, z as i32 + dz);
                        if !face_visible(cell, neighbor) {
                            continue;
                        }
                        let corners = face.corners().map(|c| {
                            let [cx, cy, cz] = table[c];
                            (origin + Vec3::new(cx, cy, cz)).scale(scale)
                        });
                        self.buffers.bucket_mut(bucket).add_quad(corners, face.normal());
                    }
                }
            }
        }
        log::trace!(
            target: "mesh",
            "surface {}x{}x{} at ({}, {}): {}",
            grid.sx,
            grid.sy,
            grid.sz,
            grid.base_x,
            grid.base_z,
            self.buffers.stats()
        );
        &self.buffers
    }
}
