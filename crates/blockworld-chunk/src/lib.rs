//! Chunk voxel storage, neighbour links, and the chunk arena.
#![forbid(unsafe_code)]

mod chunk;
mod coord;
mod mesh;
mod store;

pub use chunk::{CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, Chunk, VoxelMut};
pub use coord::{Cardinal, ChunkCoord};
pub use mesh::{ChunkVertex, MeshBuffers};
pub use store::{ChunkId, ChunkSource, ChunkStore, NoNeighbours, StoreError};
