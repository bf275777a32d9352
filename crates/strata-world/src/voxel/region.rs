use crate::error::TerrainError;
use crate::worldgen::WorldConfig;

use super::chunk_coord::ChunkCoord;

/// Box of grid cells to materialize: `size_x × size_y × size_z` starting at column
/// `(base_x, base_z)` and row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRegion {
    pub base_x: i32,
    pub base_z: i32,
    pub size_x: usize,
    pub size_y: usize,
    pub size_z: usize,
}

impl GridRegion {
    #[inline]
    pub const fn new(base_x: i32, base_z: i32, size_x: usize, size_y: usize, size_z: usize) -> Self {
        Self {
            base_x,
            base_z,
            size_x,
            size_y,
            size_z,
        }
    }

    pub fn for_chunk(coord: ChunkCoord, config: &WorldConfig) -> Result<Self, TerrainError> {
        let (base_x, base_z) = coord.grid_origin(config.chunk_size).ok_or_else(|| {
            TerrainError::OutOfRange(format!(
                "chunk ({}, {}) with chunk_size {}",
                coord.cx, coord.cz, config.chunk_size
            ))
        })?;
        let region = Self::new(
            base_x,
            base_z,
            config.chunk_size,
            config.grid_height(),
            config.chunk_size,
        );
        region.check()?;
        Ok(region)
    }

    /// The whole non-chunked world rooted at the origin.
    pub fn for_world(config: &WorldConfig) -> Self {
        Self::new(
            0,
            0,
            config.grid_x_length,
            config.grid_height(),
            config.grid_z_length,
        )
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.size_x * self.size_y * self.size_z
    }

    /// Every column and row index of the region must be addressable as `i32`.
    pub fn check(&self) -> Result<(), TerrainError> {
        fn last(base: i32, size: usize) -> Option<i32> {
            let size = i32::try_from(size).ok()?;
            base.checked_add(size.saturating_sub(1))
        }
        let fits = last(self.base_x, self.size_x).is_some()
            && last(self.base_z, self.size_z).is_some()
            && last(0, self.size_y).is_some()
            && self
                .size_x
                .checked_mul(self.size_y)
                .and_then(|v| v.checked_mul(self.size_z))
                .is_some();
        if fits {
            Ok(())
        } else {
            Err(TerrainError::OutOfRange(format!("{self:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize) -> WorldConfig {
        WorldConfig {
            chunk_size,
            terrain_levels: 8,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn chunk_region_starts_at_its_grid_origin() {
        let r = GridRegion::for_chunk(ChunkCoord::new(-3, 2), &config(10)).unwrap();
        assert_eq!((r.base_x, r.base_z), (-30, 20));
        assert_eq!((r.size_x, r.size_z), (10, 10));
        assert_eq!(r.size_y, config(10).grid_height());
    }

    #[test]
    fn chunk_whose_columns_leave_i32_is_rejected() {
        // origin 2147483640 fits, but its last column does not
        let err = GridRegion::for_chunk(ChunkCoord::new(214_748_364, 0), &config(10)).unwrap_err();
        assert!(matches!(err, TerrainError::OutOfRange(_)));
        let err = GridRegion::for_chunk(ChunkCoord::new(0, -750_000_000), &config(4)).unwrap_err();
        assert!(matches!(err, TerrainError::OutOfRange(_)));
        assert!(GridRegion::for_chunk(ChunkCoord::new(214_748_363, -214_748_364), &config(10)).is_ok());
    }

    #[test]
    fn check_rejects_oversized_regions() {
        assert!(GridRegion::new(0, 0, 4, 4, 4).check().is_ok());
        assert!(GridRegion::new(i32::MAX, 0, 1, 1, 1).check().is_ok());
        assert!(GridRegion::new(i32::MAX, 0, 2, 1, 1).check().is_err());
        assert!(GridRegion::new(0, 0, 1, usize::MAX, 1).check().is_err());
    }
}
