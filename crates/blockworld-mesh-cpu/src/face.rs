use blockworld_blocks::VoxelFace;
use blockworld_geom::Vec3;

/// Static geometry for one face of a unit cell.
///
/// `corners` are offsets in `{0,1}^3` in bottom-left, bottom-right, top-right,
/// top-left order, counter-clockwise when viewed from outside. `u_axis` and
/// `v_axis` are the two in-plane axes (0 = x, 1 = y, 2 = z) used for AO sampling.
#[derive(Copy, Clone, Debug)]
pub struct FaceGeometry {
    pub corners: [[u8; 3]; 4],
    pub normal: [f32; 3],
    pub u_axis: usize,
    pub v_axis: usize,
}

const FACES: [FaceGeometry; 6] = [
    // Front (+Z)
    FaceGeometry {
        corners: [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
        normal: [0.0, 0.0, 1.0],
        u_axis: 0,
        v_axis: 1,
    },
    // Back (-Z)
    FaceGeometry {
        corners: [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
        normal: [0.0, 0.0, -1.0],
        u_axis: 0,
        v_axis: 1,
    },
    // Left (-X)
    FaceGeometry {
        corners: [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
        normal: [-1.0, 0.0, 0.0],
        u_axis: 2,
        v_axis: 1,
    },
    // Right (+X)
    FaceGeometry {
        corners: [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]],
        normal: [1.0, 0.0, 0.0],
        u_axis: 2,
        v_axis: 1,
    },
    // Top (+Y)
    FaceGeometry {
        corners: [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]],
        normal: [0.0, 1.0, 0.0],
        u_axis: 0,
        v_axis: 2,
    },
    // Bottom (-Y)
    FaceGeometry {
        corners: [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        normal: [0.0, -1.0, 0.0],
        u_axis: 0,
        v_axis: 2,
    },
];

#[inline]
pub fn face_geometry(face: VoxelFace) -> &'static FaceGeometry {
    &FACES[face.index()]
}

impl FaceGeometry {
    #[inline]
    pub fn corner(&self, i: usize) -> Vec3 {
        let [x, y, z] = self.corners[i];
        Vec3::new(x as f32, y as f32, z as f32)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_match_face_deltas() {
        for f in VoxelFace::ALL {
            let (dx, dy, dz) = f.delta();
            assert_eq!(face_geometry(f).normal, [dx as f32, dy as f32, dz as f32]);
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane_and_wind_ccw() {
        for f in VoxelFace::ALL {
            let g = face_geometry(f);
            let n = g.normal();
            let plane = if n.x + n.y + n.z > 0.0 { 1.0 } else { 0.0 };
            for i in 0..4 {
                let c = g.corner(i);
                assert_eq!(c.dot(Vec3::new(n.x.abs(), n.y.abs(), n.z.abs())), plane, "{f:?}");
            }
            let (a, b, c, d) = (g.corner(0), g.corner(1), g.corner(2), g.corner(3));
            assert!((b - a).cross(c - a).dot(n) > 0.0, "{f:?} first triangle");
            assert!((c - a).cross(d - a).dot(n) > 0.0, "{f:?} second triangle");
        }
    }

    #[test]
    fn in_plane_axes_exclude_the_normal_axis() {
        for f in VoxelFace::ALL {
            let g = face_geometry(f);
            assert_ne!(g.u_axis, g.v_axis);
            assert_eq!(g.normal[g.u_axis], 0.0);
            assert_eq!(g.normal[g.v_axis], 0.0);
        }
    }
}
