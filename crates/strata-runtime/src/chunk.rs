use std::time::Instant;

use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_mesh_cpu::{MeshBuffers, SurfaceMeshBuilder};
use strata_world::{ChunkCoord, GridRegion, HeightField, TerrainError, WorldConfig};

use crate::timing::{ChunkTiming, elapsed_us};

/// A resident chunk: its cells and the surface mesh built from them. Mesh
/// positions are chunk-local; place them with [`Chunk::world_origin`].
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub grid: VoxelGrid,
    mesher: SurfaceMeshBuilder,
    pub timing: ChunkTiming,
}

impl Chunk {
    pub fn build(
        coord: ChunkCoord,
        config: &WorldConfig,
        field: &HeightField,
    ) -> Result<Self, TerrainError> {
        let region = GridRegion::for_chunk(coord, config)?;
        let t_gen = Instant::now();
        let grid = if config.parallel_columns {
            VoxelGrid::generate_par(region, field)?
        } else {
            VoxelGrid::generate(region, field)?
        };
        let gen_us = elapsed_us(t_gen);

        let t_mesh = Instant::now();
        let mut mesher = SurfaceMeshBuilder::from_config(config);
        mesher.build(&grid);
        let mesh_us = elapsed_us(t_mesh);

        log::debug!(
            target: "chunk",
            "built ({}, {}) gen={}us mesh={}us {}",
            coord.cx,
            coord.cz,
            gen_us,
            mesh_us,
            mesher.buffers().stats()
        );
        Ok(Self {
            coord,
            grid,
            mesher,
            timing: ChunkTiming { gen_us, mesh_us },
        })
    }

    /// Regenerates cells and mesh in place, reusing both allocations.
    pub fn rebuild(&mut self, config: &WorldConfig, field: &HeightField) -> Result<(), TerrainError> {
        let region = GridRegion::for_chunk(self.coord, config)?;
        let t_gen = Instant::now();
        self.grid.regenerate(region, field, config.parallel_columns)?;
        let gen_us = elapsed_us(t_gen);
        let t_mesh = Instant::now();
        self.mesher.clear();
        self.mesher.build(&self.grid);
        self.timing = ChunkTiming {
            gen_us,
            mesh_us: elapsed_us(t_mesh),
        };
        log::debug!(
            target: "chunk",
            "rebuilt ({}, {}) gen={}us mesh={}us",
            self.coord.cx,
            self.coord.cz,
            self.timing.gen_us,
            self.timing.mesh_us
        );
        Ok(())
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuffers {
        self.mesher.buffers()
    }

    /// Cell `(0, 0)` of this chunk's grid.
    #[inline]
    pub fn grid_origin(&self) -> (i32, i32) {
        (self.grid.base_x, self.grid.base_z)
    }

    /// World-space position of the chunk's `(0, 0, 0)` corner.
    #[inline]
    pub fn world_origin(&self, config: &WorldConfig) -> Vec3 {
        let size = config.chunk_world_size();
        Vec3::new(self.coord.cx as f32 * size, 0.0, self.coord.cz as f32 * size)
    }
}
