use std::ops::{Deref, DerefMut};

use blockworld_blocks::{Voxel, VoxelFace, VoxelRegistry, VoxelType};

use crate::coord::{Cardinal, ChunkCoord};
use crate::mesh::MeshBuffers;
use crate::store::{ChunkId, ChunkSource};

/// Horizontal edge length of a chunk in voxels.
pub const CHUNK_SIZE: usize = 16;
/// Vertical extent of a chunk in voxels. Chunks span the whole world height.
pub const CHUNK_HEIGHT: usize = 256;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

/// A 16x256x16 column of voxels.
///
/// The non-air count is maintained on every write, so [`Chunk::is_empty`] is
/// exact at all times. Any content change sets the dirty flag; installing a
/// mesh clears it.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    voxels: Vec<Voxel>,
    non_air: usize,
    dirty: bool,
    mesh: Option<MeshBuffers>,
    neighbours: [Option<ChunkId>; 4],
}

impl Chunk {
    /// All-air chunk at `coord`, marked dirty and without a mesh.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            voxels: vec![Voxel::AIR; CHUNK_VOLUME],
            non_air: 0,
            dirty: true,
            mesh: None,
            neighbours: [None; 4],
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn is_valid_position(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE as i32).contains(&x)
            && (0..CHUNK_HEIGHT as i32).contains(&y)
            && (0..CHUNK_SIZE as i32).contains(&z)
    }

    /// Linear storage index; x varies fastest, then z, then y.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        x + z * CHUNK_SIZE + y * CHUNK_SIZE * CHUNK_SIZE
    }

    #[inline]
    pub fn voxel_index(x: i32, y: i32, z: i32) -> Option<usize> {
        Self::is_valid_position(x, y, z).then(|| Self::index(x as usize, y as usize, z as usize))
    }

    #[inline]
    pub fn world_origin(&self) -> (i32, i32) {
        self.coord.world_origin()
    }

    #[inline]
    pub fn world_x(&self) -> i32 {
        self.world_origin().0
    }

    #[inline]
    pub fn world_z(&self) -> i32 {
        self.world_origin().1
    }

    /// Local column for a world column, if it lies in this chunk.
    #[inline]
    pub fn world_to_local(&self, wx: i32, wz: i32) -> Option<(i32, i32)> {
        let (lx, lz) = (wx - self.world_x(), wz - self.world_z());
        let range = 0..CHUNK_SIZE as i32;
        (range.contains(&lx) && range.contains(&lz)).then_some((lx, lz))
    }

    #[inline]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        Self::voxel_index(x, y, z).map(|i| self.voxels[i])
    }

    /// Type at a local position; out-of-range positions read as air.
    #[inline]
    pub fn voxel_type(&self, x: i32, y: i32, z: i32) -> VoxelType {
        self.get_voxel(x, y, z).map_or(VoxelType::Air, |v| v.ty)
    }

    /// Writable handle to one voxel. Emptiness and the dirty flag are
    /// reconciled when the handle is dropped, if the type changed.
    pub fn get_voxel_mut(&mut self, x: i32, y: i32, z: i32) -> Option<VoxelMut<'_>> {
        let index = Self::voxel_index(x, y, z)?;
        let before = self.voxels[index];
        Some(VoxelMut {
            chunk: self,
            index,
            before,
        })
    }

    /// Stores `voxel` at a local position and reports whether anything was
    /// written. Only a type change marks the chunk dirty; metadata is stored
    /// silently since it does not affect the mesh.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> bool {
        let Some(i) = Self::voxel_index(x, y, z) else {
            return false;
        };
        let old = self.voxels[i];
        if old == voxel {
            return false;
        }
        self.voxels[i] = voxel;
        if old.ty != voxel.ty {
            self.account(old, voxel);
            self.dirty = true;
        }
        true
    }

    pub fn set_voxel_type(&mut self, x: i32, y: i32, z: i32, ty: VoxelType) -> bool {
        self.set_voxel(x, y, z, Voxel::new(ty))
    }

    #[inline]
    fn account(&mut self, old: Voxel, new: Voxel) {
        match (old.is_air(), new.is_air()) {
            (true, false) => self.non_air += 1,
            (false, true) => self.non_air -= 1,
            _ => {}
        }
    }

    pub fn fill(&mut self, ty: VoxelType) {
        self.voxels.fill(Voxel::new(ty));
        self.non_air = if ty == VoxelType::Air { 0 } else { CHUNK_VOLUME };
        self.dirty = true;
    }

    /// Sets every voxel of horizontal layer `y`. Out-of-range layers are ignored.
    pub fn fill_layer(&mut self, y: i32, ty: VoxelType) {
        if !(0..CHUNK_HEIGHT as i32).contains(&y) {
            return;
        }
        let start = Self::index(0, y as usize, 0);
        let new = Voxel::new(ty);
        for i in start..start + CHUNK_SIZE * CHUNK_SIZE {
            let old = std::mem::replace(&mut self.voxels[i], new);
            self.account(old, new);
        }
        self.dirty = true;
    }

    /// Fills layers `y0..=y1`.
    pub fn fill_layers(&mut self, y0: i32, y1: i32, ty: VoxelType) {
        for y in y0..=y1 {
            self.fill_layer(y, ty);
        }
    }

    pub fn clear(&mut self) {
        self.fill(VoxelType::Air);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air == 0
    }

    #[inline]
    pub fn non_air_count(&self) -> usize {
        self.non_air
    }

    /// Recounts non-air voxels from storage.
    pub fn update_empty_status(&mut self) {
        self.non_air = self.voxels.iter().filter(|v| !v.is_air()).count();
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the current contents as meshed without installing buffers.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    #[inline]
    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }

    /// Installs a freshly built mesh and clears the dirty flag.
    pub fn set_mesh_data(&mut self, mesh: MeshBuffers) {
        self.mesh = Some(mesh);
        self.dirty = false;
    }

    pub fn clear_mesh(&mut self) -> Option<MeshBuffers> {
        self.mesh.take()
    }

    #[inline]
    pub fn neighbour(&self, dir: Cardinal) -> Option<ChunkId> {
        self.neighbours[dir.index()]
    }

    #[inline]
    pub fn has_neighbour(&self, dir: Cardinal) -> bool {
        self.neighbours[dir.index()].is_some()
    }

    /// Links (or unlinks) a horizontal neighbour. Boundary faces may change, so
    /// the chunk becomes dirty.
    pub fn set_neighbour(&mut self, dir: Cardinal, id: Option<ChunkId>) {
        self.neighbours[dir.index()] = id;
        self.dirty = true;
    }

    /// Whether `face` of the voxel at `(x, y, z)` must be drawn.
    ///
    /// Air never has visible faces. A face is visible when the cell it looks
    /// into is air, or is see-through while this voxel is not. Faces leaving
    /// the chunk vertically are always visible. Faces leaving it horizontally
    /// consult the linked neighbour through `source`; without a link the face
    /// is visible. Properties come from the built-in registry.
    pub fn is_face_visible<S>(&self, x: i32, y: i32, z: i32, face: VoxelFace, source: &S) -> bool
    where
        S: ChunkSource + ?Sized,
    {
        self.is_face_visible_with(x, y, z, face, source, VoxelRegistry::builtin())
    }

    /// [`Chunk::is_face_visible`] with transparency taken from `registry`.
    pub fn is_face_visible_with<S>(
        &self,
        x: i32,
        y: i32,
        z: i32,
        face: VoxelFace,
        source: &S,
        registry: &VoxelRegistry,
    ) -> bool
    where
        S: ChunkSource + ?Sized,
    {
        let Some(here) = self.get_voxel(x, y, z) else {
            return false;
        };
        if here.is_air() {
            return false;
        }
        let (dx, dy, dz) = face.delta();
        let (nx, ny, nz) = (x + dx, y + dy, z + dz);

        let other = if let Some(v) = self.get_voxel(nx, ny, nz) {
            v
        } else if !(0..CHUNK_HEIGHT as i32).contains(&ny) {
            return true;
        } else {
            let Some(dir) = Cardinal::from_face(face) else {
                return true;
            };
            let Some(neighbour) = self.neighbour(dir).and_then(|id| source.chunk(id)) else {
                return true;
            };
            let edge = CHUNK_SIZE as i32 - 1;
            let (lx, lz) = match dir {
                Cardinal::East => (0, nz),
                Cardinal::West => (edge, nz),
                Cardinal::North => (nx, 0),
                Cardinal::South => (nx, edge),
            };
            match neighbour.get_voxel(lx, ny, lz) {
                Some(v) => v,
                None => return true,
            }
        };

        let see_through = |v: Voxel| registry.properties_of(v.ty).is_transparent;
        other.is_air() || (see_through(other) && !see_through(here))
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }
}

/// Write guard returned by [`Chunk::get_voxel_mut`].
pub struct VoxelMut<'a> {
    chunk: &'a mut Chunk,
    index: usize,
    before: Voxel,
}

impl Deref for VoxelMut<'_> {
    type Target = Voxel;

    fn deref(&self) -> &Voxel {
        &self.chunk.voxels[self.index]
    }
}

impl DerefMut for VoxelMut<'_> {
    fn deref_mut(&mut self) -> &mut Voxel {
        &mut self.chunk.voxels[self.index]
    }
}

impl Drop for VoxelMut<'_> {
    fn drop(&mut self) {
        let after = self.chunk.voxels[self.index];
        if after.ty != self.before.ty {
            self.chunk.account(self.before, after);
            self.chunk.dirty = true;
        }
    }
}
