use blockworld_blocks::{Voxel, VoxelRegistry};
use blockworld_chunk::{Chunk, ChunkStore};

/// Answers "does the voxel at this world cell block movement?".
///
/// Cells that are not loaded or lie outside the world height are not solid.
pub trait SolidityQuery {
    fn is_solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool;
}

/// Voxel storage addressed by world cell.
pub trait WorldVoxels {
    fn voxel_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel>;
}

impl WorldVoxels for Chunk {
    fn voxel_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        self.world_to_local(wx, wz)
            .and_then(|(lx, lz)| self.get_voxel(lx, wy, lz))
    }
}

impl WorldVoxels for ChunkStore {
    fn voxel_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        self.voxel_at_world(wx, wy, wz)
    }
}

/// A world paired with the registry that decides which voxels are solid.
pub struct RegistryView<'a, W: ?Sized> {
    world: &'a W,
    registry: &'a VoxelRegistry,
}

impl<'a, W: WorldVoxels + ?Sized> RegistryView<'a, W> {
    pub fn new(world: &'a W, registry: &'a VoxelRegistry) -> Self {
        Self { world, registry }
    }
}

impl<W: WorldVoxels + ?Sized> SolidityQuery for RegistryView<'_, W> {
    fn is_solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.world
            .voxel_at(wx, wy, wz)
            .is_some_and(|v| self.registry.properties_of(v.ty).is_solid)
    }
}

impl SolidityQuery for Chunk {
    fn is_solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        RegistryView::new(self, VoxelRegistry::builtin()).is_solid_at(wx, wy, wz)
    }
}

impl SolidityQuery for ChunkStore {
    fn is_solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        RegistryView::new(self, VoxelRegistry::builtin()).is_solid_at(wx, wy, wz)
    }
}

/// Any sampler closure over world cells.
impl<F> SolidityQuery for F
where
    F: Fn(i32, i32, i32) -> bool,
{
    #[inline]
    fn is_solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self(wx, wy, wz)
    }
}
