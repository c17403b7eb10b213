//! Voxel types, face directions, and the per-type property registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use config::{RegistryConfig, VoxelOverride};
pub use registry::{RegistryError, VoxelProperties, VoxelRegistry, properties_of};
pub use types::{FaceRole, Voxel, VoxelFace, VoxelType};
