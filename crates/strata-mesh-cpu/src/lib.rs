//! CPU surface meshing for terrain voxel grids.
#![forbid(unsafe_code)]

mod buffers;
mod build;
pub mod constants;
pub mod face;
mod mesh_build;

pub use buffers::{MergedMesh, MeshBuffers, MeshStats};
pub use build::{SurfaceMeshBuilder, face_visible};
pub use constants::WATER_SURFACE_HEIGHT;
pub use face::Face;
pub use mesh_build::MeshBuild;
