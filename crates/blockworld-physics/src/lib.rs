//! Agent movement: gravity, friction, jumping, and swept collision against voxels.
#![forbid(unsafe_code)]

mod agent;
mod camera;
mod params;
mod query;

pub use agent::{Agent, MotionState, MovementDirection};
pub use camera::{CameraMode, ViewCamera};
pub use params::{FrictionModel, PhysicsParams};
pub use query::{RegistryView, SolidityQuery, WorldVoxels};
