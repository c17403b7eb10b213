use serde::Deserialize;
use std::collections::HashMap;

use super::registry::{MAX_LIGHT_LEVEL, VoxelProperties};
use super::types::VoxelType;

// Top-level registry override file:
//
//   [voxels.glass]
//   break_time = 0.5
//   texture = 20
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RegistryConfig {
    #[serde(default)]
    pub voxels: HashMap<String, VoxelOverride>,
}

/// Per-type overrides. Absent fields keep the built-in value.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct VoxelOverride {
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub opaque: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub liquid: Option<bool>,
    #[serde(default)]
    pub emissive: Option<bool>,
    #[serde(default)]
    pub light_level: Option<u8>,
    #[serde(default)]
    pub break_time: Option<f32>,

    // `texture` sets all faces; the specific keys win over it.
    #[serde(default)]
    pub texture: Option<u16>,
    #[serde(default)]
    pub texture_top: Option<u16>,
    #[serde(default)]
    pub texture_bottom: Option<u16>,
    #[serde(default)]
    pub texture_sides: Option<u16>,
}

impl VoxelOverride {
    pub(crate) fn apply_to(&self, p: &mut VoxelProperties, ty: VoxelType) {
        if let Some(v) = self.solid {
            p.is_solid = v;
        }
        if let Some(v) = self.opaque {
            p.is_opaque = v;
        }
        if let Some(v) = self.transparent {
            p.is_transparent = v;
        }
        if let Some(v) = self.liquid {
            p.is_liquid = v;
        }
        if let Some(v) = self.emissive {
            p.is_emissive = v;
        }
        if let Some(v) = self.light_level {
            if v > MAX_LIGHT_LEVEL {
                log::warn!(
                    target: "registry",
                    "{}: light_level {} clamped to {}",
                    ty,
                    v,
                    MAX_LIGHT_LEVEL
                );
            }
            p.light_level = v.min(MAX_LIGHT_LEVEL);
        }
        if let Some(v) = self.break_time {
            p.break_time = v;
        }
        if let Some(t) = self.texture {
            p.texture_top = t;
            p.texture_bottom = t;
            p.texture_sides = t;
        }
        if let Some(t) = self.texture_top {
            p.texture_top = t;
        }
        if let Some(t) = self.texture_bottom {
            p.texture_bottom = t;
        }
        if let Some(t) = self.texture_sides {
            p.texture_sides = t;
        }
    }
}
