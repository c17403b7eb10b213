use serde::{Deserialize, Serialize};

use crate::registry::{VoxelProperties, properties_of};

/// Every block type the world knows about. The discriminant doubles as the
/// registry index, so a `VoxelType` can never address a missing record.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoxelType {
    #[default]
    Air = 0,
    Stone,
    Dirt,
    Grass,
    Sand,
    Water,
    Wood,
    Leaves,
    Glass,
    Cobblestone,
    Planks,
    Bedrock,
    Gravel,
    Brick,
    Snow,
    Ice,
}

impl VoxelType {
    pub const COUNT: usize = 16;

    pub const ALL: [VoxelType; Self::COUNT] = [
        VoxelType::Air,
        VoxelType::Stone,
        VoxelType::Dirt,
        VoxelType::Grass,
        VoxelType::Sand,
        VoxelType::Water,
        VoxelType::Wood,
        VoxelType::Leaves,
        VoxelType::Glass,
        VoxelType::Cobblestone,
        VoxelType::Planks,
        VoxelType::Bedrock,
        VoxelType::Gravel,
        VoxelType::Brick,
        VoxelType::Snow,
        VoxelType::Ice,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_u8(v: u8) -> Option<VoxelType> {
        Self::ALL.get(v as usize).copied()
    }

    /// Display name, e.g. `"Cobblestone"`.
    pub const fn name(self) -> &'static str {
        match self {
            VoxelType::Air => "Air",
            VoxelType::Stone => "Stone",
            VoxelType::Dirt => "Dirt",
            VoxelType::Grass => "Grass",
            VoxelType::Sand => "Sand",
            VoxelType::Water => "Water",
            VoxelType::Wood => "Wood",
            VoxelType::Leaves => "Leaves",
            VoxelType::Glass => "Glass",
            VoxelType::Cobblestone => "Cobblestone",
            VoxelType::Planks => "Planks",
            VoxelType::Bedrock => "Bedrock",
            VoxelType::Gravel => "Gravel",
            VoxelType::Brick => "Brick",
            VoxelType::Snow => "Snow",
            VoxelType::Ice => "Ice",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<VoxelType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn properties(self) -> &'static VoxelProperties {
        properties_of(self)
    }
}

impl std::fmt::Display for VoxelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Compact voxel representation stored in chunk buffers
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub ty: VoxelType,
    /// Reserved per-voxel state (growth stage, orientation). No logic reads it yet.
    pub metadata: u8,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        ty: VoxelType::Air,
        metadata: 0,
    };

    #[inline]
    pub const fn new(ty: VoxelType) -> Self {
        Self { ty, metadata: 0 }
    }

    #[inline]
    pub const fn with_metadata(ty: VoxelType, metadata: u8) -> Self {
        Self { ty, metadata }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.ty == VoxelType::Air
    }

    #[inline]
    pub fn properties(self) -> &'static VoxelProperties {
        properties_of(self.ty)
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.properties().is_solid
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.properties().is_opaque
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.properties().is_transparent
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        self.properties().is_liquid
    }

    #[inline]
    pub fn is_emissive(self) -> bool {
        self.properties().is_emissive
    }

    #[inline]
    pub fn light_level(self) -> u8 {
        self.properties().light_level
    }

    #[inline]
    pub fn break_time(self) -> f32 {
        self.properties().break_time
    }

    #[inline]
    pub fn texture_index(self, face: VoxelFace) -> u16 {
        self.properties().texture_for(face)
    }
}

impl From<VoxelType> for Voxel {
    fn from(ty: VoxelType) -> Self {
        Voxel::new(ty)
    }
}

/// The six faces of a unit cell. Discriminants follow the mesher's emit order.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VoxelFace {
    /// +Z
    Front = 0,
    /// -Z
    Back = 1,
    /// -X
    Left = 2,
    /// +X
    Right = 3,
    /// +Y
    Top = 4,
    /// -Y
    Bottom = 5,
}

impl VoxelFace {
    pub const ALL: [VoxelFace; 6] = [
        VoxelFace::Front,
        VoxelFace::Back,
        VoxelFace::Left,
        VoxelFace::Right,
        VoxelFace::Top,
        VoxelFace::Bottom,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<VoxelFace> {
        Self::ALL.get(i).copied()
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            VoxelFace::Front => (0, 0, 1),
            VoxelFace::Back => (0, 0, -1),
            VoxelFace::Left => (-1, 0, 0),
            VoxelFace::Right => (1, 0, 0),
            VoxelFace::Top => (0, 1, 0),
            VoxelFace::Bottom => (0, -1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> VoxelFace {
        match self {
            VoxelFace::Front => VoxelFace::Back,
            VoxelFace::Back => VoxelFace::Front,
            VoxelFace::Left => VoxelFace::Right,
            VoxelFace::Right => VoxelFace::Left,
            VoxelFace::Top => VoxelFace::Bottom,
            VoxelFace::Bottom => VoxelFace::Top,
        }
    }

    /// Classifies the face into top/bottom/side role for texture lookup.
    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            VoxelFace::Top => FaceRole::Top,
            VoxelFace::Bottom => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
}
