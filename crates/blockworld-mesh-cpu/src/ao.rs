use blockworld_blocks::VoxelRegistry;
use blockworld_chunk::Chunk;

use crate::face::FaceGeometry;

/// Brightness lost per occluding sample.
pub const AO_STEP: f32 = 0.2;

#[inline]
fn occludes(chunk: &Chunk, registry: &VoxelRegistry, p: [i32; 3]) -> bool {
    chunk.get_voxel(p[0], p[1], p[2]).is_some_and(|v| {
        let props = registry.properties_of(v.ty);
        props.is_solid && props.is_opaque
    })
}

/// Ambient-occlusion factor for corner `corner` of the face `geom` on the cell
/// at `pos`.
///
/// Samples the layer the face looks into: the two cells sharing an edge with
/// the corner and the cell diagonal to it. Only solid opaque cells inside
/// `chunk` count. Result is one of `1.0, 0.8, 0.6, 0.4`.
pub fn corner_ao(chunk: &Chunk, pos: [i32; 3], geom: &FaceGeometry, corner: usize) -> f32 {
    corner_ao_with(chunk, VoxelRegistry::builtin(), pos, geom, corner)
}

/// [`corner_ao`] with occluders classified by `registry`.
pub fn corner_ao_with(
    chunk: &Chunk,
    registry: &VoxelRegistry,
    pos: [i32; 3],
    geom: &FaceGeometry,
    corner: usize,
) -> f32 {
    let mut base = pos;
    for (b, n) in base.iter_mut().zip(geom.normal) {
        *b += n as i32;
    }
    let c = geom.corners[corner];
    let su = if c[geom.u_axis] == 1 { 1 } else { -1 };
    let sv = if c[geom.v_axis] == 1 { 1 } else { -1 };

    let mut side_u = base;
    side_u[geom.u_axis] += su;
    let mut side_v = base;
    side_v[geom.v_axis] += sv;
    let mut diag = side_u;
    diag[geom.v_axis] += sv;

    let count = [side_u, side_v, diag]
        .into_iter()
        .filter(|p| occludes(chunk, registry, *p))
        .count();
    1.0 - AO_STEP * count as f32
}
