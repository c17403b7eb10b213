//! CPU chunk mesher: face culling, per-corner ambient occlusion, atlas UVs.
#![forbid(unsafe_code)]

mod ao;
mod atlas;
mod face;
mod mesher;

pub use ao::{AO_STEP, corner_ao, corner_ao_with};
pub use atlas::{AtlasConfig, AtlasUv, TextureAtlas, UvRect};
pub use face::{FaceGeometry, face_geometry};
pub use mesher::{ChunkMesher, rebuild_dirty, rebuild_dirty_with};
