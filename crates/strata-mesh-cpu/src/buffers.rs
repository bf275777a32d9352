use std::fmt;

use strata_blocks::{BUCKET_COUNT, TerrainType};
use strata_geom::Aabb;

use crate::mesh_build::MeshBuild;

/// One vertex stream per renderable terrain code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    buckets: [MeshBuild; BUCKET_COUNT],
}

/// Buckets flattened into shared vertex arrays with one index list per submesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    /// Indexed by terrain code; empty buckets keep an empty list.
    pub submeshes: Vec<Vec<u32>>,
}

impl MergedMesh {
    #[inline]
    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

impl MeshBuffers {
    #[inline]
    pub fn bucket(&self, kind: TerrainType) -> Option<&MeshBuild> {
        kind.bucket().map(|b| &self.buckets[b])
    }

    #[inline]
    pub(crate) fn bucket_mut(&mut self, bucket: usize) -> &mut MeshBuild {
        &mut self.buckets[bucket]
    }

    /// Buckets in terrain-code order.
    pub fn iter(&self) -> impl Iterator<Item = (TerrainType, &MeshBuild)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(i, mb)| TerrainType::from_code(i as u8).map(|t| (t, mb)))
    }

    pub fn clear(&mut self) {
        for mb in &mut self.buckets {
            mb.clear_keep_capacity();
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(MeshBuild::is_empty)
    }

    #[inline]
    pub fn submesh_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.buckets.iter().map(MeshBuild::vertex_count).sum()
    }

    pub fn merged(&self) -> MergedMesh {
        let vertices = self.vertex_count();
        let mut out = MergedMesh {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            submeshes: Vec::with_capacity(self.buckets.len()),
        };
        for mb in &self.buckets {
            let base = out.vertex_count() as u32;
            out.positions.extend_from_slice(&mb.pos);
            out.normals.extend_from_slice(&mb.norm);
            out.uvs.extend_from_slice(&mb.uv);
            out.submeshes.push(mb.idx.iter().map(|i| base + i).collect());
        }
        out
    }

    /// Box around every emitted vertex; `None` when nothing was emitted.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.buckets.iter().flat_map(|mb| mb.positions()))
    }

    pub fn stats(&self) -> MeshStats {
        let mut quads = [0usize; BUCKET_COUNT];
        for (q, mb) in quads.iter_mut().zip(&self.buckets) {
            *q = mb.quad_count();
        }
        MeshStats { quads }
    }
}

/// Quad counts per bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub quads: [usize; BUCKET_COUNT],
}

impl MeshStats {
    #[inline]
    pub fn quads_for(&self, kind: TerrainType) -> usize {
        kind.bucket().map_or(0, |b| self.quads[b])
    }

    pub fn total_quads(&self) -> usize {
        self.quads.iter().sum()
    }

    pub fn accumulate(&mut self, other: &MeshStats) {
        for (a, b) in self.quads.iter_mut().zip(other.quads.iter()) {
            *a += *b;
        }
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quads={}", self.total_quads())?;
        for (i, q) in self.quads.iter().enumerate() {
            if let Some(t) = TerrainType::from_code(i as u8) {
                write!(f, " {}={q}", t.name())?;
            }
        }
        Ok(())
    }
}
