use super::{constants::*, types::*};
use bevy::math::IVec3;

/// Block storage for one chunk column
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkData {
    pub position: ChunkPos,
    /// CHUNK_VOLUME block IDs, stored layer by layer from WORLD_MIN_Y upwards
    pub blocks: Box<[BlockId]>,
}

impl ChunkData {
    /// Create a new chunk with every position filled with a specific block
    pub fn filled(position: ChunkPos, block: BlockId) -> Self {
        Self {
            position,
            blocks: vec![block; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Create an empty chunk (all AIR)
    pub fn empty(position: ChunkPos) -> Self {
        Self::filled(position, AIR)
    }

    fn index(local_x: usize, y: i32, local_z: usize) -> Option<usize> {
        if local_x >= CHUNK_SIZE || local_z >= CHUNK_SIZE || !(WORLD_MIN_Y..WORLD_MAX_Y).contains(&y) {
            return None;
        }
        let layer = (y - WORLD_MIN_Y) as usize;
        Some((layer * CHUNK_SIZE + local_z) * CHUNK_SIZE + local_x)
    }

    /// Get block at local chunk coordinates (0-15, world Y, 0-15)
    pub fn get_block(&self, local_x: usize, y: i32, local_z: usize) -> Option<BlockId> {
        Self::index(local_x, y, local_z).map(|index| self.blocks[index])
    }

    /// Set block at local chunk coordinates (0-15, world Y, 0-15)
    pub fn set_block(&mut self, local_x: usize, y: i32, local_z: usize, block: BlockId) -> bool {
        match Self::index(local_x, y, local_z) {
            Some(index) => {
                self.blocks[index] = block;
                true
            }
            None => false,
        }
    }

    /// Fill a whole horizontal layer with one block
    pub fn fill_layer(&mut self, y: i32, block: BlockId) -> bool {
        let Some(start) = Self::index(0, y, 0) else {
            return false;
        };
        self.blocks[start..start + CHUNK_SIZE * CHUNK_SIZE].fill(block);
        true
    }

    /// Count blocks of a given type in the chunk
    pub fn count(&self, block: BlockId) -> usize {
        self.blocks.iter().filter(|&&b| b == block).count()
    }
}

/// Helper functions for block coordinate conversions
pub mod coords {
    use super::*;

    /// Convert block position to chunk position
    pub fn block_to_chunk(block_pos: IVec3) -> ChunkPos {
        ChunkPos::from_block(block_pos)
    }

    /// Convert block position to local column position within chunk (0-15, 0-15)
    pub fn block_to_local(block_pos: IVec3) -> (usize, usize) {
        let local_x = block_pos.x.rem_euclid(CHUNK_SIZE_I32) as usize;
        let local_z = block_pos.z.rem_euclid(CHUNK_SIZE_I32) as usize;
        (local_x, local_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_data_get_set() {
        let mut chunk = ChunkData::empty(ChunkPos::new(0, 0));

        assert!(chunk.set_block(5, 10, 12, STONE));
        assert_eq!(chunk.get_block(5, 10, 12), Some(STONE));
        assert_eq!(chunk.get_block(12, 10, 5), Some(AIR));

        // Lowest and highest layers
        assert!(chunk.set_block(0, WORLD_MIN_Y, 0, BEDROCK));
        assert!(chunk.set_block(15, WORLD_MAX_Y - 1, 15, DIRT));
        assert_eq!(chunk.get_block(0, WORLD_MIN_Y, 0), Some(BEDROCK));
        assert_eq!(chunk.get_block(15, WORLD_MAX_Y - 1, 15), Some(DIRT));

        // Out of bounds
        assert!(!chunk.set_block(16, 0, 0, STONE));
        assert!(!chunk.set_block(0, WORLD_MAX_Y, 0, STONE));
        assert_eq!(chunk.get_block(0, WORLD_MIN_Y - 1, 0), None);
    }

    #[test]
    fn test_fill_layer() {
        let mut chunk = ChunkData::empty(ChunkPos::new(2, -1));
        assert_eq!(chunk.count(GRASS), 0);

        assert!(chunk.fill_layer(40, GRASS));
        assert_eq!(chunk.count(GRASS), CHUNK_SIZE * CHUNK_SIZE);
        assert_eq!(chunk.get_block(3, 40, 3), Some(GRASS));
        assert_eq!(chunk.get_block(3, 41, 3), Some(AIR));

        // Out of height range
        assert!(!chunk.fill_layer(WORLD_MAX_Y, STONE));
        assert_eq!(chunk.count(STONE), 0);
    }

    #[test]
    fn test_block_to_local() {
        assert_eq!(coords::block_to_local(IVec3::new(17, 0, 3)), (1, 3));
        // Negative positions wrap to the end of the chunk
        assert_eq!(coords::block_to_local(IVec3::new(-1, 0, -16)), (15, 0));
        assert_eq!(coords::block_to_chunk(IVec3::new(-1, 0, -16)), ChunkPos::new(-1, -1));
    }
}
