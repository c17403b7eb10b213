use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Normalised texture rectangle. `(u0, v0)` is the top-left of the tile.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

/// Maps a texture index to its rectangle in the atlas.
pub trait AtlasUv {
    fn uv_rect(&self, index: u16) -> UvRect;
}

impl<F> AtlasUv for F
where
    F: Fn(u16) -> UvRect,
{
    #[inline]
    fn uv_rect(&self, index: u16) -> UvRect {
        self(index)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Atlas edge length in pixels.
    pub atlas_size: u32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Inset applied to every edge of a tile rectangle to avoid bleeding.
    pub padding: f32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            atlas_size: 256,
            tile_size: 16,
            padding: 0.001,
        }
    }
}

/// Square grid atlas: tile `i` sits at row `i / per_row`, column `i % per_row`.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    config: AtlasConfig,
    tiles_per_row: u32,
    names: HashMap<String, u16>,
}

impl TextureAtlas {
    pub fn new(config: AtlasConfig) -> Self {
        let tiles_per_row = if config.tile_size == 0 {
            0
        } else {
            config.atlas_size / config.tile_size
        };
        let tiles_per_row = if tiles_per_row == 0 {
            log::warn!(
                target: "atlas",
                "tile size {} does not fit atlas size {}; using a single tile",
                config.tile_size,
                config.atlas_size
            );
            1
        } else {
            tiles_per_row
        };
        Self {
            config,
            tiles_per_row,
            names: HashMap::new(),
        }
    }

    /// Grid derived from a loaded image's width and the tile size.
    pub fn from_image_size(atlas_px: u32, tile_px: u32) -> Self {
        Self::new(AtlasConfig {
            atlas_size: atlas_px,
            tile_size: tile_px,
            ..AtlasConfig::default()
        })
    }

    #[inline]
    pub fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    #[inline]
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn register(&mut self, name: impl Into<String>, index: u16) {
        self.names.insert(name.into(), index);
    }

    /// Index registered under `name`, or 0 when unknown.
    pub fn index_of(&self, name: &str) -> u16 {
        match self.names.get(name) {
            Some(i) => *i,
            None => {
                log::warn!(target: "atlas", "texture '{}' not registered; using index 0", name);
                0
            }
        }
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::new(AtlasConfig::default())
    }
}

impl AtlasUv for TextureAtlas {
    fn uv_rect(&self, index: u16) -> UvRect {
        let per_row = self.tiles_per_row;
        let row = index as u32 / per_row;
        let col = index as u32 % per_row;
        let step = 1.0 / per_row as f32;
        let pad = self.config.padding;
        UvRect {
            u0: col as f32 * step + pad,
            v0: row as f32 * step + pad,
            u1: (col + 1) as f32 * step - pad,
            v1: (row + 1) as f32 * step - pad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn default_grid_is_sixteen_by_sixteen() {
        let atlas = TextureAtlas::default();
        assert_eq!(atlas.tiles_per_row(), 16);
        let r = atlas.uv_rect(0);
        assert!(close(r.u0, 0.001) && close(r.v0, 0.001));
        assert!(close(r.u1, 0.0625 - 0.001) && close(r.v1, 0.0625 - 0.001));

        let r = atlas.uv_rect(17);
        assert!(close(r.u0, 0.0625 + 0.001));
        assert!(close(r.v0, 0.0625 + 0.001));
    }

    #[test]
    fn image_size_controls_tiles_per_row() {
        assert_eq!(TextureAtlas::from_image_size(512, 16).tiles_per_row(), 32);
        assert_eq!(TextureAtlas::from_image_size(8, 16).tiles_per_row(), 1);
        assert_eq!(TextureAtlas::from_image_size(256, 0).tiles_per_row(), 1);
    }

    #[test]
    fn names_fall_back_to_zero() {
        let mut atlas = TextureAtlas::default();
        atlas.register("stone", 1);
        assert_eq!(atlas.index_of("stone"), 1);
        assert_eq!(atlas.index_of("missing"), 0);
    }

    #[test]
    fn closures_act_as_atlases() {
        let flat = |_: u16| UvRect {
            u0: 0.0,
            v0: 0.0,
            u1: 1.0,
            v1: 1.0,
        };
        assert_eq!(flat.uv_rect(42).u1, 1.0);
    }
}
