use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use blockworld_chunk::CHUNK_HEIGHT;
use blockworld_mesh_cpu::AtlasConfig;
use blockworld_physics::PhysicsParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Layered test terrain and where the agent starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks loaded in each direction around the origin chunk.
    pub radius: i32,
    pub stone_top: i32,
    pub dirt_top: i32,
    pub grass_y: i32,
    pub spawn: [f32; 3],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 0,
            stone_top: 60,
            dirt_top: 69,
            grass_y: 70,
            spawn: [8.0, 72.0, 8.0],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub world: WorldConfig,
    pub physics: PhysicsParams,
    pub atlas: AtlasConfig,
    /// Optional voxel property overrides.
    pub registry_path: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: HarnessConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&s)?;
        log::info!(target: "config", "loaded {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        if !(0..=8).contains(&w.radius) {
            return Err(ConfigError::Invalid(format!(
                "world.radius must be in 0..=8, got {}",
                w.radius
            )));
        }
        if !(0 <= w.stone_top
            && w.stone_top < w.dirt_top
            && w.dirt_top < w.grass_y
            && w.grass_y < CHUNK_HEIGHT as i32)
        {
            return Err(ConfigError::Invalid(format!(
                "terrain layers must satisfy 0 <= stone_top < dirt_top < grass_y < {}",
                CHUNK_HEIGHT
            )));
        }
        if w.spawn.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("world.spawn must be finite".into()));
        }
        let p = &self.physics;
        if !(p.width > 0.0 && p.depth > 0.0 && p.height > 0.0) {
            return Err(ConfigError::Invalid("physics dimensions must be positive".into()));
        }
        if self.atlas.tile_size == 0 {
            return Err(ConfigError::Invalid("atlas.tile_size must be non-zero".into()));
        }
        Ok(())
    }
}
