use rayon::prelude::*;

use blockworld_blocks::{Voxel, VoxelFace, VoxelRegistry};
use blockworld_chunk::{
    CHUNK_HEIGHT, CHUNK_SIZE, Chunk, ChunkId, ChunkSource, ChunkStore, ChunkVertex, MeshBuffers,
};

use crate::ao::corner_ao_with;
use crate::atlas::AtlasUv;
use crate::face::face_geometry;

const INITIAL_VERTEX_CAP: usize = 4096;
const INITIAL_INDEX_CAP: usize = 8192;

/// Builds one quad per visible voxel face. Buffers are reused between builds.
pub struct ChunkMesher<'a, A: AtlasUv + ?Sized> {
    atlas: &'a A,
    registry: &'a VoxelRegistry,
    buffers: MeshBuffers,
}

impl<'a, A: AtlasUv + ?Sized> ChunkMesher<'a, A> {
    /// Mesher using the built-in voxel properties.
    pub fn new(atlas: &'a A) -> Self {
        Self::with_registry(atlas, VoxelRegistry::builtin())
    }

    /// Culling, AO and textures follow `registry`.
    pub fn with_registry(atlas: &'a A, registry: &'a VoxelRegistry) -> Self {
        Self {
            atlas,
            registry,
            buffers: MeshBuffers::with_capacity(INITIAL_VERTEX_CAP, INITIAL_INDEX_CAP),
        }
    }

    /// Rebuilds the buffers for `chunk`. Boundary faces consult `source` for
    /// linked neighbours.
    pub fn build_mesh<S>(&mut self, chunk: &Chunk, source: &S)
    where
        S: ChunkSource + ?Sized,
    {
        self.buffers.clear_keep_capacity();
        if chunk.is_empty() {
            return;
        }
        for y in 0..CHUNK_HEIGHT as i32 {
            for z in 0..CHUNK_SIZE as i32 {
                for x in 0..CHUNK_SIZE as i32 {
                    let Some(voxel) = chunk.get_voxel(x, y, z) else {
                        continue;
                    };
                    if voxel.is_air() {
                        continue;
                    }
                    for face in VoxelFace::ALL {
                        if chunk.is_face_visible_with(x, y, z, face, source, self.registry) {
                            self.add_face(chunk, voxel, [x, y, z], face);
                        }
                    }
                }
            }
        }
        log::trace!(
            target: "mesher",
            "chunk ({}, {}): {} quads",
            chunk.coord().x,
            chunk.coord().z,
            self.buffers.quad_count()
        );
    }

    /// Greedy merging is not implemented; this produces the per-face mesh.
    pub fn build_mesh_greedy<S>(&mut self, chunk: &Chunk, source: &S)
    where
        S: ChunkSource + ?Sized,
    {
        self.build_mesh(chunk, source);
    }

    fn add_face(&mut self, chunk: &Chunk, voxel: Voxel, pos: [i32; 3], face: VoxelFace) {
        let geom = face_geometry(face);
        let uv = self
            .atlas
            .uv_rect(self.registry.properties_of(voxel.ty).texture_for(face));
        let uvs = [
            [uv.u0, uv.v1],
            [uv.u1, uv.v1],
            [uv.u1, uv.v0],
            [uv.u0, uv.v0],
        ];
        let (ox, oz) = chunk.coord().world_origin();
        let base = [(ox + pos[0]) as f32, pos[1] as f32, (oz + pos[2]) as f32];

        let corners: [ChunkVertex; 4] = std::array::from_fn(|i| {
            let c = geom.corners[i];
            ChunkVertex {
                position: [
                    base[0] + c[0] as f32,
                    base[1] + c[1] as f32,
                    base[2] + c[2] as f32,
                ],
                uv: uvs[i],
                normal: geom.normal,
                ao: corner_ao_with(chunk, self.registry, pos, geom, i),
            }
        });
        self.buffers.push_quad(corners);
    }

    /// Moves the finished buffers into `chunk`. An empty build clears the
    /// chunk's mesh instead. Either way the chunk is left clean.
    pub fn apply_mesh_to_chunk(&mut self, chunk: &mut Chunk) {
        if self.buffers.is_empty() {
            chunk.clear_mesh();
            chunk.mark_clean();
            return;
        }
        let mesh = std::mem::replace(
            &mut self.buffers,
            MeshBuffers::with_capacity(INITIAL_VERTEX_CAP, INITIAL_INDEX_CAP),
        );
        chunk.set_mesh_data(mesh);
    }

    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Hands the buffers to the caller, leaving empty ones behind.
    pub fn take_buffers(&mut self) -> MeshBuffers {
        std::mem::take(&mut self.buffers)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }
}

/// Meshes every dirty chunk in `store`. Builds run in parallel against a
/// shared read-only view; results are installed afterwards. Returns the number
/// of chunks rebuilt.
pub fn rebuild_dirty<A>(store: &mut ChunkStore, atlas: &A) -> usize
where
    A: AtlasUv + Sync + ?Sized,
{
    rebuild_dirty_with(store, atlas, VoxelRegistry::builtin())
}

/// [`rebuild_dirty`] with voxel properties from `registry`.
pub fn rebuild_dirty_with<A>(store: &mut ChunkStore, atlas: &A, registry: &VoxelRegistry) -> usize
where
    A: AtlasUv + Sync + ?Sized,
{
    let dirty = store.dirty_ids();
    if dirty.is_empty() {
        return 0;
    }
    let view: &ChunkStore = store;
    let built: Vec<(ChunkId, MeshBuffers)> = dirty
        .par_iter()
        .filter_map(|&id| {
            let chunk = view.get(id)?;
            let mut mesher = ChunkMesher::with_registry(atlas, registry);
            mesher.build_mesh(chunk, view);
            Some((id, mesher.take_buffers()))
        })
        .collect();

    let count = built.len();
    for (id, mesh) in built {
        let Some(chunk) = store.get_mut(id) else {
            continue;
        };
        if mesh.is_empty() {
            chunk.clear_mesh();
            chunk.mark_clean();
        } else {
            chunk.set_mesh_data(mesh);
        }
    }
    log::debug!(target: "mesher", "rebuilt {} dirty chunks", count);
    count
}
