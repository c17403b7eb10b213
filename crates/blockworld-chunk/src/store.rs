use hashbrown::HashMap;
use thiserror::Error;

use blockworld_blocks::Voxel;

use crate::chunk::{CHUNK_SIZE, Chunk};
use crate::coord::{Cardinal, ChunkCoord};

/// Generational handle into a [`ChunkStore`]. A handle outlives its chunk
/// safely: once the slot is reused, lookups through the old handle fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkId {
    index: u32,
    generation: u32,
}

impl ChunkId {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Resolves neighbour handles to chunks.
pub trait ChunkSource {
    fn chunk(&self, id: ChunkId) -> Option<&Chunk>;
}

/// Source for a chunk considered in isolation; every link resolves to nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNeighbours;

impl ChunkSource for NoNeighbours {
    fn chunk(&self, _id: ChunkId) -> Option<&Chunk> {
        None
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("chunk ({}, {}) is already loaded", .0.x, .0.z)]
    DuplicateCoord(ChunkCoord),
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    chunk: Option<Chunk>,
}

/// Owns loaded chunks and indexes them by coordinate.
#[derive(Clone, Debug, Default)]
pub struct ChunkStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    by_coord: HashMap<ChunkCoord, ChunkId>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    /// Takes ownership of `chunk`. Links are not created; call
    /// [`ChunkStore::link_neighbours`] once the chunk should see its neighbours.
    pub fn insert(&mut self, chunk: Chunk) -> Result<ChunkId, StoreError> {
        let coord = chunk.coord();
        if self.by_coord.contains_key(&coord) {
            return Err(StoreError::DuplicateCoord(coord));
        }
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.chunk = Some(chunk);
                ChunkId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    chunk: Some(chunk),
                });
                ChunkId {
                    index,
                    generation: 0,
                }
            }
        };
        self.by_coord.insert(coord, id);
        log::debug!(target: "chunks", "insert ({}, {}) -> slot {}", coord.x, coord.z, id.index);
        Ok(id)
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.chunk.as_ref()
    }

    pub fn get_mut(&mut self, id: ChunkId) -> Option<&mut Chunk> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.chunk.as_mut()
    }

    #[inline]
    pub fn id_at(&self, coord: ChunkCoord) -> Option<ChunkId> {
        self.by_coord.get(&coord).copied()
    }

    pub fn get_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.id_at(coord).and_then(|id| self.get(id))
    }

    pub fn get_at_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        let id = self.id_at(coord)?;
        self.get_mut(id)
    }

    /// Links the chunk behind `id` with every loaded chunk adjacent to it, in
    /// both directions. Returns the number of links made.
    pub fn link_neighbours(&mut self, id: ChunkId) -> usize {
        let Some(coord) = self.get(id).map(Chunk::coord) else {
            return 0;
        };
        let mut linked = 0;
        for dir in Cardinal::ALL {
            let Some(other) = self.id_at(coord.neighbour(dir)) else {
                continue;
            };
            if let Some(c) = self.get_mut(id) {
                c.set_neighbour(dir, Some(other));
            }
            if let Some(n) = self.get_mut(other) {
                n.set_neighbour(dir.opposite(), Some(id));
            }
            linked += 1;
        }
        linked
    }

    /// Links every loaded chunk with its adjacent chunks.
    pub fn link_all(&mut self) {
        for id in self.ids() {
            self.link_neighbours(id);
        }
    }

    /// Unloads a chunk. Links pointing at it are cleared (dirtying those
    /// chunks) and the slot's generation advances so stale handles miss.
    pub fn remove(&mut self, id: ChunkId) -> Option<Chunk> {
        self.get(id)?;
        for slot in &mut self.slots {
            let Some(c) = slot.chunk.as_mut() else {
                continue;
            };
            for dir in Cardinal::ALL {
                if c.neighbour(dir) == Some(id) {
                    c.set_neighbour(dir, None);
                }
            }
        }
        let slot = &mut self.slots[id.index as usize];
        let mut chunk = slot.chunk.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.by_coord.remove(&chunk.coord());
        for dir in Cardinal::ALL {
            if chunk.neighbour(dir).is_some() {
                chunk.set_neighbour(dir, None);
            }
        }
        log::debug!(target: "chunks", "remove ({}, {})", chunk.coord().x, chunk.coord().z);
        Some(chunk)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkId, &Chunk)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.chunk.as_ref().map(|c| {
                (
                    ChunkId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    c,
                )
            })
        })
    }

    pub fn ids(&self) -> Vec<ChunkId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn dirty_ids(&self) -> Vec<ChunkId> {
        self.iter()
            .filter(|(_, c)| c.is_dirty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Voxel at a world position, or `None` when the column is not loaded or
    /// `wy` is outside the world height.
    pub fn voxel_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Voxel> {
        let chunk = self.get_at(ChunkCoord::containing(wx, wz))?;
        let s = CHUNK_SIZE as i32;
        chunk.get_voxel(wx.rem_euclid(s), wy, wz.rem_euclid(s))
    }
}

impl ChunkSource for ChunkStore {
    fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.get(id)
    }
}
