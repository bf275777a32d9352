use serde::{Deserialize, Serialize};

/// Chunk position in chunk-grid units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// `None` when either axis would leave `i32`.
    #[inline]
    pub fn checked_offset(self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self::new(self.cx.checked_add(dx)?, self.cz.checked_add(dz)?))
    }

    /// Grid cell of this chunk's `(0, 0)` corner; `None` when it does not fit in `i32`.
    #[inline]
    pub fn grid_origin(self, chunk_size: usize) -> Option<(i32, i32)> {
        let s = i32::try_from(chunk_size).ok()?;
        Some((self.cx.checked_mul(s)?, self.cz.checked_mul(s)?))
    }

    /// Every coordinate of the `(2*half + 1)`-wide square centered here, row by row.
    /// `None` if a negative `half` is given or the square would leave `i32`.
    pub fn window(self, half: i32) -> Option<impl Iterator<Item = ChunkCoord>> {
        if half < 0 {
            return None;
        }
        let lo = self.checked_offset(-half, -half)?;
        let hi = self.checked_offset(half, half)?;
        Some((lo.cz..=hi.cz).flat_map(move |cz| (lo.cx..=hi.cx).map(move |cx| ChunkCoord::new(cx, cz))))
    }
}
