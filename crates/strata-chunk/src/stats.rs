use std::fmt;

use strata_blocks::TerrainType;

use crate::VoxelGrid;

/// Cell census of one grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridStats {
    pub counts: [usize; TerrainType::ALL.len()],
    pub min_height: usize,
    pub max_height: usize,
}

impl GridStats {
    pub fn collect(grid: &VoxelGrid) -> Self {
        let mut counts = [0usize; TerrainType::ALL.len()];
        for c in &grid.cells {
            counts[c.code() as usize] += 1;
        }
        let mut min_height = usize::MAX;
        let mut max_height = 0;
        for z in 0..grid.sz {
            for x in 0..grid.sx {
                let h = grid.column_height(x, z);
                min_height = min_height.min(h);
                max_height = max_height.max(h);
            }
        }
        if min_height == usize::MAX {
            min_height = 0;
        }
        Self {
            counts,
            min_height,
            max_height,
        }
    }

    #[inline]
    pub fn count(&self, kind: TerrainType) -> usize {
        self.counts[kind.code() as usize]
    }

    pub fn ground(&self) -> usize {
        TerrainType::ALL
            .iter()
            .filter(|t| t.is_ground())
            .map(|t| self.count(*t))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for GridStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cells={} ground={} water={} heights={}..={}",
            self.total(),
            self.ground(),
            self.count(TerrainType::Water),
            self.min_height,
            self.max_height
        )
    }
}
