use strata_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY,
    NegY,
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Indices into the cube corner tables, in emission order `v0..v3`.
    #[inline]
    pub fn corners(self) -> [usize; 4] {
        match self {
            Face::PosY => [3, 7, 2, 6],
            Face::NegY => [1, 5, 0, 4],
            Face::PosX => [1, 2, 5, 6],
            Face::NegX => [4, 7, 0, 3],
            Face::PosZ => [5, 6, 4, 7],
            Face::NegZ => [0, 3, 1, 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CUBE_VERTICES, WATER_VERTICES};

    fn v(c: [f32; 3]) -> Vec3 {
        Vec3::new(c[0], c[1], c[2])
    }

    #[test]
    fn corners_lie_on_their_face() {
        for f in Face::ALL {
            let n = f.normal();
            // every corner of a face shares the same coordinate along the normal
            let d: Vec<f32> = f.corners().iter().map(|&c| v(CUBE_VERTICES[c]).dot(n)).collect();
            assert!(d.iter().all(|x| (x - d[0]).abs() < 1e-6), "{f:?}");
            let expected = if n.x + n.y + n.z > 0.0 { 1.0 } else { 0.0 };
            assert!((d[0].abs() - expected).abs() < 1e-6, "{f:?}");
        }
    }

    #[test]
    fn both_triangles_wind_along_normal() {
        for table in [&CUBE_VERTICES, &WATER_VERTICES] {
            for f in Face::ALL {
                let [a, b, c, d] = f.corners().map(|i| v(table[i]));
                let n = f.normal();
                assert!((b - a).cross(c - a).dot(n) > 0.0, "{f:?}");
                assert!((b - c).cross(d - c).dot(n) > 0.0, "{f:?}");
            }
        }
    }
}
