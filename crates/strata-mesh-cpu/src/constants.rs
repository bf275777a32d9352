//! Cube geometry tables shared by the surface mesher.

pub(crate) const VERTICES_PER_QUAD: usize = 4;
pub(crate) const INDICES_PER_QUAD: usize = 6;

/// Fraction of a cell's height filled by a water surface.
pub const WATER_SURFACE_HEIGHT: f32 = 0.9;

/// Unit cube corners; 4..8 repeat the z = 0 loop 0..4 at z = 1.
pub const CUBE_VERTICES: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Same corners with the top face lowered to the water surface.
pub const WATER_VERTICES: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, WATER_SURFACE_HEIGHT, 0.0],
    [0.0, WATER_SURFACE_HEIGHT, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, WATER_SURFACE_HEIGHT, 1.0],
    [0.0, WATER_SURFACE_HEIGHT, 1.0],
];

/// Per-vertex UVs in emission order.
pub const QUAD_UVS: [[f32; 2]; VERTICES_PER_QUAD] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

/// Two triangles over the four emitted corners: `(v0, v1, v2)` and `(v2, v1, v3)`.
pub const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 2, 1, 3];
