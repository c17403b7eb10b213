use blockworld_blocks::VoxelType;
use blockworld_chunk::{Chunk, ChunkCoord, ChunkStore, StoreError};

use crate::config::WorldConfig;

/// Layered terrain chunk: stone, dirt, then one layer of grass.
pub fn terrain_chunk(coord: ChunkCoord, cfg: &WorldConfig) -> Chunk {
    let mut c = Chunk::new(coord);
    c.fill_layers(0, cfg.stone_top, VoxelType::Stone);
    c.fill_layers(cfg.stone_top + 1, cfg.dirt_top, VoxelType::Dirt);
    c.fill_layers(cfg.dirt_top + 1, cfg.grass_y, VoxelType::Grass);
    c
}

/// Loads the square of chunks within `radius` of the origin and links them.
pub fn build_world(cfg: &WorldConfig) -> Result<ChunkStore, StoreError> {
    let mut store = ChunkStore::new();
    for x in -cfg.radius..=cfg.radius {
        for z in -cfg.radius..=cfg.radius {
            store.insert(terrain_chunk(ChunkCoord::new(x, z), cfg))?;
        }
    }
    store.link_all();
    log::info!(target: "world", "loaded {} chunks", store.len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terrain_layers() {
        let c = terrain_chunk(ChunkCoord::default(), &WorldConfig::default());
        assert_eq!(c.voxel_type(0, 60, 0), VoxelType::Stone);
        assert_eq!(c.voxel_type(0, 61, 0), VoxelType::Dirt);
        assert_eq!(c.voxel_type(0, 69, 0), VoxelType::Dirt);
        assert_eq!(c.voxel_type(0, 70, 0), VoxelType::Grass);
        assert_eq!(c.voxel_type(0, 71, 0), VoxelType::Air);
        assert_eq!(c.non_air_count(), 71 * 256);
    }

    #[test]
    fn radius_loads_a_linked_square() {
        let cfg = WorldConfig {
            radius: 1,
            ..WorldConfig::default()
        };
        let store = build_world(&cfg).unwrap();
        assert_eq!(store.len(), 9);
        let centre = store.get_at(ChunkCoord::new(0, 0)).unwrap();
        assert!(blockworld_chunk::Cardinal::ALL.iter().all(|d| centre.has_neighbour(*d)));
    }
}
