//! Voxel grid storage and column-wise terrain generation.
#![forbid(unsafe_code)]

mod stats;

pub use stats::GridStats;

use rayon::prelude::*;
use strata_blocks::TerrainType;
use strata_world::{GridRegion, HeightField, TerrainError, TerrainProfile};

/// Dense `sx × sy × sz` block of cells, stored y-major as `(y * sz + z) * sx + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    pub base_x: i32,
    pub base_z: i32,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    pub cells: Vec<TerrainType>,
}

impl VoxelGrid {
    /// All-air grid covering `region`.
    pub fn empty(region: GridRegion) -> Self {
        Self {
            base_x: region.base_x,
            base_z: region.base_z,
            sx: region.size_x,
            sy: region.size_y,
            sz: region.size_z,
            cells: vec![TerrainType::Air; region.volume()],
        }
    }

    /// Wraps existing cells; a length mismatch is padded with air or truncated.
    pub fn from_cells(region: GridRegion, cells: Vec<TerrainType>) -> Self {
        let mut c = cells;
        let expect = region.volume();
        if c.len() != expect {
            c.resize(expect, TerrainType::Air);
        }
        Self {
            base_x: region.base_x,
            base_z: region.base_z,
            sx: region.size_x,
            sy: region.size_y,
            sz: region.size_z,
            cells: c,
        }
    }

    pub fn generate(region: GridRegion, field: &HeightField) -> Result<Self, TerrainError> {
        region.check()?;
        let mut grid = Self::empty(region);
        grid.fill(field)?;
        Ok(grid)
    }

    /// Same output as [`VoxelGrid::generate`], with columns sampled and layers
    /// filled on the rayon pool in scope.
    pub fn generate_par(region: GridRegion, field: &HeightField) -> Result<Self, TerrainError> {
        region.check()?;
        let mut grid = Self::empty(region);
        grid.fill_par(field)?;
        Ok(grid)
    }

    /// Re-runs generation for `region`, reusing the cell allocation.
    pub fn regenerate(
        &mut self,
        region: GridRegion,
        field: &HeightField,
        parallel: bool,
    ) -> Result<(), TerrainError> {
        region.check()?;
        self.base_x = region.base_x;
        self.base_z = region.base_z;
        self.sx = region.size_x;
        self.sy = region.size_y;
        self.sz = region.size_z;
        self.cells.clear();
        self.cells.resize(region.volume(), TerrainType::Air);
        if parallel {
            self.fill_par(field)?;
        } else {
            self.fill(field)?;
        }
        log::trace!(
            target: "grid",
            "regenerated {}x{}x{} at ({}, {})",
            self.sx,
            self.sy,
            self.sz,
            self.base_x,
            self.base_z
        );
        Ok(())
    }

    #[inline]
    pub fn region(&self) -> GridRegion {
        GridRegion::new(self.base_x, self.base_z, self.sx, self.sy, self.sz)
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> TerrainType {
        self.cells[self.idx(x, y, z)]
    }

    /// Signed lookup for neighbor probing; anything outside the grid is `None`.
    #[inline]
    pub fn get_checked(&self, x: i32, y: i32, z: i32) -> Option<TerrainType> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.sx || y >= self.sy || z >= self.sz {
            return None;
        }
        Some(self.get(x, y, z))
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, cell: TerrainType) {
        let i = self.idx(x, y, z);
        self.cells[i] = cell;
    }

    pub fn count(&self, kind: TerrainType) -> usize {
        self.cells.iter().filter(|c| **c == kind).count()
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.cells.iter().all(|c| c.is_air())
    }

    /// Rows below the first non-ground cell of column `(x, z)`.
    pub fn column_height(&self, x: usize, z: usize) -> usize {
        (0..self.sy)
            .take_while(|&y| self.get(x, y, z).is_ground())
            .count()
    }

    pub fn stats(&self) -> GridStats {
        GridStats::collect(self)
    }

    fn fill(&mut self, field: &HeightField) -> Result<(), TerrainError> {
        let profile = field.profile();
        let water_row = profile.water_row();
        for z in 0..self.sz {
            for x in 0..self.sx {
                let h = field.ground_height(self.base_x + x as i32, self.base_z + z as i32)?;
                for y in 0..self.sy {
                    let i = self.idx(x, y, z);
                    self.cells[i] = column_cell(profile, y as i32, h, water_row);
                }
            }
        }
        Ok(())
    }

    fn fill_par(&mut self, field: &HeightField) -> Result<(), TerrainError> {
        let (sx, sz) = (self.sx, self.sz);
        let (base_x, base_z) = (self.base_x, self.base_z);
        let heights: Vec<i32> = (0..sx * sz)
            .into_par_iter()
            .map(|c| field.ground_height(base_x + (c % sx) as i32, base_z + (c / sx) as i32))
            .collect::<Result<_, _>>()?;
        let profile = field.profile();
        let water_row = profile.water_row();
        let layer = sx * sz;
        if layer == 0 {
            return Ok(());
        }
        self.cells
            .par_chunks_mut(layer)
            .enumerate()
            .for_each(|(y, row)| {
                for (cell, &h) in row.iter_mut().zip(&heights) {
                    *cell = column_cell(profile, y as i32, h, water_row);
                }
            });
        Ok(())
    }
}

/// Cell at row `y` of a column whose ground height is `h`.
#[inline]
pub fn column_cell(profile: &TerrainProfile, y: i32, h: i32, water_row: i32) -> TerrainType {
    if y < h {
        profile.level_to_type(y - profile.height_offset() as i32)
    } else if y < water_row {
        TerrainType::Water
    } else {
        TerrainType::Air
    }
}
