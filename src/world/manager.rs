use super::access::BlockAccess;
use super::generator::{self, WorldKind};
use crate::blocks::{chunk::coords, BlockId, ChunkData, ChunkKey, ChunkPos, ZoneId};
use bevy::math::IVec3;
use bevy::prelude::*;
use std::collections::HashMap;

/// In-memory voxel world for one zone
///
/// Tracks loaded chunks plus two work queues: chunks freshly generated by the
/// base terrain (awaiting deposit generation) and chunks that already existed
/// before deposits were installed (awaiting the retroactive pass).
#[derive(Resource)]
pub struct VoxelWorld {
    /// Zone (dimension) this world represents
    pub zone: ZoneId,

    /// Shape of the base terrain
    pub kind: WorldKind,

    /// World seed; per-chunk generation seeds derive from it
    pub seed: u64,

    /// Loaded chunk data
    pub chunks: HashMap<ChunkPos, ChunkData>,

    pending_generation: Vec<ChunkPos>,
    pending_retro: Vec<ChunkPos>,
}

impl VoxelWorld {
    pub fn new(zone: ZoneId, kind: WorldKind, seed: u64) -> Self {
        Self {
            zone,
            kind,
            seed,
            chunks: HashMap::new(),
            pending_generation: Vec::new(),
            pending_retro: Vec::new(),
        }
    }

    /// Ledger key of a chunk in this world's zone
    pub fn key(&self, pos: ChunkPos) -> ChunkKey {
        ChunkKey::from_pos(pos, self.zone)
    }

    /// Check if a chunk is currently loaded
    pub fn is_loaded(&self, pos: &ChunkPos) -> bool {
        self.chunks.contains_key(pos)
    }

    /// Generate base terrain for a chunk and queue it for deposit generation
    ///
    /// Does nothing if the chunk is already loaded.
    pub fn generate_chunk(&mut self, pos: ChunkPos) -> bool {
        if self.is_loaded(&pos) {
            return false;
        }
        let chunk = generator::generate_chunk(pos, self.kind, self.seed);
        self.chunks.insert(pos, chunk);
        self.pending_generation.push(pos);
        true
    }

    /// Insert a chunk that existed before deposits were installed
    ///
    /// The chunk skips normal generation and is queued for the retroactive pass.
    pub fn insert_existing(&mut self, chunk: ChunkData) {
        let pos = chunk.position;
        self.chunks.insert(pos, chunk);
        self.pending_retro.push(pos);
    }

    /// Take all chunks awaiting deposit generation
    pub fn take_pending_generation(&mut self) -> Vec<ChunkPos> {
        std::mem::take(&mut self.pending_generation)
    }

    /// Take all chunks awaiting the retroactive pass
    pub fn take_pending_retro(&mut self) -> Vec<ChunkPos> {
        std::mem::take(&mut self.pending_retro)
    }

    /// Check if either work queue still holds chunks
    pub fn has_pending_work(&self) -> bool {
        !self.pending_generation.is_empty() || !self.pending_retro.is_empty()
    }

    /// Get chunk data
    pub fn chunk(&self, pos: &ChunkPos) -> Option<&ChunkData> {
        self.chunks.get(pos)
    }

    /// Get statistics about the world state
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            zone: self.zone,
            loaded_chunks: self.chunks.len(),
            pending_generation: self.pending_generation.len(),
            pending_retro: self.pending_retro.len(),
        }
    }
}

impl BlockAccess for VoxelWorld {
    fn block_at(&self, pos: IVec3) -> Option<BlockId> {
        let (local_x, local_z) = coords::block_to_local(pos);
        self.chunks
            .get(&coords::block_to_chunk(pos))?
            .get_block(local_x, pos.y, local_z)
    }

    fn set_block(&mut self, pos: IVec3, block: BlockId) -> bool {
        let chunk_pos = coords::block_to_chunk(pos);
        let (local_x, local_z) = coords::block_to_local(pos);
        let Some(chunk) = self.chunks.get_mut(&chunk_pos) else {
            return false;
        };
        chunk.set_block(local_x, pos.y, local_z, block)
    }
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::new(0, WorldKind::Normal, 0)
    }
}

/// Statistics about the current world state
#[derive(Debug, Clone)]
pub struct WorldStats {
    pub zone: ZoneId,
    pub loaded_chunks: usize,
    pub pending_generation: usize,
    pub pending_retro: usize,
}

impl std::fmt::Display for WorldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Zone: {}, Loaded: {}, Pending generation: {}, Pending retro: {}",
            self.zone,
            self.loaded_chunks,
            self.pending_generation,
            self.pending_retro
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{GRASS, STONE, SURFACE_Y, TUFF, WORLD_MAX_Y};

    #[test]
    fn test_generate_queues_chunk_once() {
        let mut world = VoxelWorld::new(0, WorldKind::Normal, 1);
        assert!(world.generate_chunk(ChunkPos::new(0, 0)));
        assert!(!world.generate_chunk(ChunkPos::new(0, 0)));

        assert_eq!(world.take_pending_generation(), vec![ChunkPos::new(0, 0)]);
        assert!(world.take_pending_generation().is_empty());
        assert!(!world.has_pending_work());
    }

    #[test]
    fn test_insert_existing_queues_retro() {
        let mut world = VoxelWorld::default();
        world.insert_existing(ChunkData::filled(ChunkPos::new(-1, 2), STONE));
        assert!(world.is_loaded(&ChunkPos::new(-1, 2)));
        assert_eq!(world.take_pending_retro(), vec![ChunkPos::new(-1, 2)]);
        assert!(world.take_pending_generation().is_empty());
    }

    #[test]
    fn test_block_access_across_chunks() {
        let mut world = VoxelWorld::default();
        world.generate_chunk(ChunkPos::new(-1, 0));

        let pos = IVec3::new(-3, 10, 4);
        assert!(world.block_at(pos).is_some());
        assert!(world.set_block(pos, TUFF));
        assert_eq!(world.block_at(pos), Some(TUFF));

        // Unloaded chunk and out of height range
        assert_eq!(world.block_at(IVec3::new(3, 10, 4)), None);
        assert!(!world.set_block(IVec3::new(3, 10, 4), TUFF));
        assert!(!world.set_block(IVec3::new(-3, WORLD_MAX_Y, 4), TUFF));
    }

    #[test]
    fn test_surface_y() {
        let mut world = VoxelWorld::default();
        world.generate_chunk(ChunkPos::new(0, 0));
        assert_eq!(world.surface_y(4, 4), Some(SURFACE_Y));
        assert_eq!(world.block_at(IVec3::new(4, SURFACE_Y, 4)), Some(GRASS));
        assert_eq!(world.surface_y(40, 4), None);
    }
}
