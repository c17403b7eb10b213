use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

use super::config::RegistryConfig;
use super::types::{FaceRole, VoxelFace, VoxelType};

/// Highest light level a voxel may emit.
pub const MAX_LIGHT_LEVEL: u8 = 15;

/// Static behaviour and appearance of one voxel type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelProperties {
    pub is_solid: bool,
    pub is_opaque: bool,
    pub is_transparent: bool,
    pub is_liquid: bool,
    pub is_emissive: bool,
    pub light_level: u8,
    /// Seconds to break; negative means unbreakable.
    pub break_time: f32,
    pub texture_top: u16,
    pub texture_bottom: u16,
    pub texture_sides: u16,
}

impl VoxelProperties {
    /// Baseline record: a solid, opaque, one-second block on texture 0.
    pub const BASE: VoxelProperties = VoxelProperties {
        is_solid: true,
        is_opaque: true,
        is_transparent: false,
        is_liquid: false,
        is_emissive: false,
        light_level: 0,
        break_time: 1.0,
        texture_top: 0,
        texture_bottom: 0,
        texture_sides: 0,
    };

    const fn solid(break_time: f32, tex: u16) -> Self {
        Self {
            break_time,
            texture_top: tex,
            texture_bottom: tex,
            texture_sides: tex,
            ..Self::BASE
        }
    }

    const fn see_through(break_time: f32, tex: u16) -> Self {
        Self {
            is_opaque: false,
            is_transparent: true,
            ..Self::solid(break_time, tex)
        }
    }

    #[inline]
    pub fn is_breakable(&self) -> bool {
        self.break_time >= 0.0
    }

    #[inline]
    pub fn texture_for(&self, face: VoxelFace) -> u16 {
        match face.role() {
            FaceRole::Top => self.texture_top,
            FaceRole::Bottom => self.texture_bottom,
            FaceRole::Side => self.texture_sides,
        }
    }
}

impl Default for VoxelProperties {
    fn default() -> Self {
        Self::BASE
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid registry config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown voxel type '{0}' in registry config")]
    UnknownVoxel(String),
}

/// Property table with exactly one record per [`VoxelType`].
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelRegistry {
    props: [VoxelProperties; VoxelType::COUNT],
}

static BUILTIN: OnceLock<VoxelRegistry> = OnceLock::new();

impl VoxelRegistry {
    /// Process-wide built-in table. Built on first use; later calls return the same table.
    pub fn builtin() -> &'static VoxelRegistry {
        BUILTIN.get_or_init(|| {
            log::debug!(target: "registry", "initialising built-in voxel table ({} types)", VoxelType::COUNT);
            VoxelRegistry::with_defaults()
        })
    }

    /// Forces the built-in table to exist. Safe to call any number of times.
    pub fn ensure_initialised() {
        let _ = Self::builtin();
    }

    /// A fresh copy of the built-in values, independent of the shared table.
    pub fn with_defaults() -> Self {
        let mut props = [VoxelProperties::BASE; VoxelType::COUNT];
        for ty in VoxelType::ALL {
            props[ty.index()] = default_properties(ty);
        }
        Self { props }
    }

    #[inline]
    pub fn properties_of(&self, ty: VoxelType) -> &VoxelProperties {
        &self.props[ty.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoxelType, &VoxelProperties)> {
        VoxelType::ALL.into_iter().zip(self.props.iter())
    }

    /// Built-in values with the overrides from a TOML document applied.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: RegistryConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn from_config(cfg: RegistryConfig) -> Result<Self, RegistryError> {
        let mut reg = Self::with_defaults();
        let mut entries: Vec<_> = cfg.voxels.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort so logs and errors are stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, ov) in entries {
            let ty = VoxelType::from_name(&name).ok_or_else(|| RegistryError::UnknownVoxel(name.clone()))?;
            ov.apply_to(&mut reg.props[ty.index()], ty);
            log::debug!(target: "registry", "applied overrides for {}", ty);
        }
        Ok(reg)
    }
}

impl Default for VoxelRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Properties of `ty` from the shared built-in table.
#[inline]
pub fn properties_of(ty: VoxelType) -> &'static VoxelProperties {
    VoxelRegistry::builtin().properties_of(ty)
}

fn default_properties(ty: VoxelType) -> VoxelProperties {
    match ty {
        VoxelType::Air => VoxelProperties {
            is_solid: false,
            is_opaque: false,
            is_transparent: true,
            break_time: 0.0,
            ..VoxelProperties::BASE
        },
        VoxelType::Stone => VoxelProperties::solid(1.5, 1),
        VoxelType::Dirt => VoxelProperties::solid(0.5, 2),
        VoxelType::Grass => VoxelProperties {
            texture_top: 3,
            texture_bottom: 2,
            texture_sides: 4,
            ..VoxelProperties::solid(0.6, 3)
        },
        VoxelType::Sand => VoxelProperties::solid(0.5, 5),
        VoxelType::Water => VoxelProperties {
            is_solid: false,
            is_liquid: true,
            ..VoxelProperties::see_through(0.0, 6)
        },
        VoxelType::Wood => VoxelProperties {
            texture_sides: 8,
            ..VoxelProperties::solid(2.0, 7)
        },
        VoxelType::Leaves => VoxelProperties::see_through(0.2, 9),
        VoxelType::Glass => VoxelProperties::see_through(0.3, 10),
        VoxelType::Cobblestone => VoxelProperties::solid(2.0, 11),
        VoxelType::Planks => VoxelProperties::solid(2.0, 12),
        VoxelType::Bedrock => VoxelProperties::solid(-1.0, 13),
        VoxelType::Gravel => VoxelProperties::solid(0.6, 14),
        VoxelType::Brick => VoxelProperties::solid(2.0, 15),
        VoxelType::Snow => VoxelProperties::solid(0.2, 16),
        VoxelType::Ice => VoxelProperties::see_through(0.5, 17),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_shared_and_stable() {
        let a = VoxelRegistry::builtin() as *const VoxelRegistry;
        VoxelRegistry::ensure_initialised();
        VoxelRegistry::ensure_initialised();
        let b = VoxelRegistry::builtin() as *const VoxelRegistry;
        assert_eq!(a, b);
        assert_eq!(VoxelRegistry::builtin(), &VoxelRegistry::with_defaults());
    }

    #[test]
    fn air_is_empty_space() {
        let air = properties_of(VoxelType::Air);
        assert!(!air.is_solid);
        assert!(!air.is_opaque);
        assert!(air.is_transparent);
        assert_eq!(air.break_time, 0.0);
    }

    #[test]
    fn water_is_liquid_and_not_solid() {
        let w = properties_of(VoxelType::Water);
        assert!(!w.is_solid && !w.is_opaque && w.is_transparent && w.is_liquid);
    }

    #[test]
    fn see_through_blocks_still_collide() {
        for ty in [VoxelType::Leaves, VoxelType::Glass, VoxelType::Ice] {
            let p = properties_of(ty);
            assert!(p.is_solid, "{ty} should be solid");
            assert!(!p.is_opaque, "{ty} should not be opaque");
            assert!(p.is_transparent, "{ty} should be transparent");
        }
    }

    #[test]
    fn only_bedrock_is_unbreakable() {
        for (ty, p) in VoxelRegistry::builtin().iter() {
            assert_eq!(!p.is_breakable(), ty == VoxelType::Bedrock, "{ty}");
        }
    }

    #[test]
    fn wood_has_ring_top_and_bark_sides() {
        let p = properties_of(VoxelType::Wood);
        assert_eq!(p.texture_for(VoxelFace::Top), 7);
        assert_eq!(p.texture_for(VoxelFace::Bottom), 7);
        assert_eq!(p.texture_for(VoxelFace::Left), 8);
    }
}
