use blockworld_blocks::VoxelFace;
use serde::{Deserialize, Serialize};

use crate::chunk::CHUNK_SIZE;

/// Chunk position in chunk units on the XZ plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    #[inline]
    pub fn neighbour(self, dir: Cardinal) -> Self {
        let (dx, dz) = dir.delta();
        self.offset(dx, dz)
    }

    /// World-space voxel coordinates of this chunk's `(0, 0)` column.
    #[inline]
    pub fn world_origin(self) -> (i32, i32) {
        (self.x * CHUNK_SIZE as i32, self.z * CHUNK_SIZE as i32)
    }

    /// Chunk containing the world column `(wx, wz)`; negative coordinates round down.
    #[inline]
    pub fn containing(wx: i32, wz: i32) -> Self {
        Self {
            x: wx.div_euclid(CHUNK_SIZE as i32),
            z: wz.div_euclid(CHUNK_SIZE as i32),
        }
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Horizontal neighbour direction. Chunks never link vertically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    /// +Z
    North = 0,
    /// -Z
    South = 1,
    /// +X
    East = 2,
    /// -X
    West = 3,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::South,
        Cardinal::East,
        Cardinal::West,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Cardinal::North => (0, 1),
            Cardinal::South => (0, -1),
            Cardinal::East => (1, 0),
            Cardinal::West => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Cardinal {
        match self {
            Cardinal::North => Cardinal::South,
            Cardinal::South => Cardinal::North,
            Cardinal::East => Cardinal::West,
            Cardinal::West => Cardinal::East,
        }
    }

    /// Maps a side face onto the neighbour it looks into; top and bottom have none.
    #[inline]
    pub fn from_face(face: VoxelFace) -> Option<Cardinal> {
        match face {
            VoxelFace::Front => Some(Cardinal::North),
            VoxelFace::Back => Some(Cardinal::South),
            VoxelFace::Right => Some(Cardinal::East),
            VoxelFace::Left => Some(Cardinal::West),
            VoxelFace::Top | VoxelFace::Bottom => None,
        }
    }
}
