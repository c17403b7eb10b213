use bytemuck::{Pod, Zeroable};

/// One mesh vertex as uploaded to the GPU: position, atlas UV, face normal, and
/// ambient-occlusion brightness in `[0, 1]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub ao: f32,
}

/// Chunk-local triangle mesh. Every quad contributes 4 vertices and 6 indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<ChunkVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends a quad given in counter-clockwise order and triangulates it as
    /// `(0, 1, 2)` and `(0, 2, 3)`.
    pub fn push_quad(&mut self, corners: [ChunkVertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32) -> ChunkVertex {
        ChunkVertex {
            position: [x, 0.0, 0.0],
            ..Default::default()
        }
    }

    #[test]
    fn quads_share_a_running_base() {
        let mut m = MeshBuffers::new();
        m.push_quad([v(0.0), v(1.0), v(2.0), v(3.0)]);
        m.push_quad([v(4.0), v(5.0), v(6.0), v(7.0)]);
        assert_eq!(m.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(m.quad_count(), 2);
        assert_eq!(m.triangle_count(), 4);
    }

    #[test]
    fn byte_views_have_packed_sizes() {
        let mut m = MeshBuffers::new();
        m.push_quad([v(0.0); 4]);
        assert_eq!(std::mem::size_of::<ChunkVertex>(), 36);
        assert_eq!(m.vertex_bytes().len(), 4 * 36);
        assert_eq!(m.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut m = MeshBuffers::with_capacity(64, 96);
        m.push_quad([v(0.0); 4]);
        m.clear_keep_capacity();
        assert!(m.is_empty());
        assert!(m.vertices.capacity() >= 64);
    }
}
