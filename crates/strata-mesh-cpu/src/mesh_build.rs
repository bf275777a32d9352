use strata_geom::Vec3;

use crate::constants::{INDICES_PER_QUAD, QUAD_INDICES, QUAD_UVS};

/// Flat vertex streams for one terrain bucket.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.idx.clear();
    }

    /// Appends four corners in emission order with the shared normal and the fixed
    /// quad UVs, then the two triangles `(v0, v1, v2)` and `(v2, v1, v3)`.
    pub fn add_quad(&mut self, corners: [Vec3; 4], n: Vec3) {
        let base = self.vertex_count() as u32;
        for (p, uv) in corners.iter().zip(QUAD_UVS.iter()) {
            self.pos.extend_from_slice(&[p.x, p.y, p.z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(uv);
        }
        self.idx.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / INDICES_PER_QUAD
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.pos.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_share_a_rebased_index_pattern() {
        let mut mb = MeshBuild::default();
        let n = Vec3::new(0.0, 1.0, 0.0);
        let c = [Vec3::ZERO; 4];
        mb.add_quad(c, n);
        mb.add_quad(c, n);
        assert_eq!(mb.vertex_count(), 8);
        assert_eq!(mb.quad_count(), 2);
        assert_eq!(mb.idx, vec![0, 1, 2, 2, 1, 3, 4, 5, 6, 6, 5, 7]);
        assert_eq!(&mb.uv[..8], &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
        assert_eq!(mb.normal(5), n);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut mb = MeshBuild::default();
        mb.add_quad([Vec3::ZERO; 4], Vec3::new(1.0, 0.0, 0.0));
        let cap = mb.pos.capacity();
        mb.clear_keep_capacity();
        assert!(mb.is_empty());
        assert_eq!(mb.vertex_count(), 0);
        assert_eq!(mb.pos.capacity(), cap);
    }
}
