use crate::blocks::{BlockId, AIR, WORLD_MAX_Y, WORLD_MIN_Y};
use bevy::math::IVec3;

/// Read/write access to live block storage
///
/// Deposit generation only ever touches the world through this trait, so it
/// runs the same against `VoxelWorld` and against test fakes.
pub trait BlockAccess {
    /// Block at a position, or `None` if the position is not loaded
    fn block_at(&self, pos: IVec3) -> Option<BlockId>;

    /// Overwrite the block at a position; returns false if it is not loaded
    fn set_block(&mut self, pos: IVec3, block: BlockId) -> bool;

    /// Vertical extent of the world as `(min inclusive, max exclusive)`
    fn height_range(&self) -> (i32, i32) {
        (WORLD_MIN_Y, WORLD_MAX_Y)
    }

    /// Y of the topmost non-air block in a column
    fn surface_y(&self, x: i32, z: i32) -> Option<i32> {
        let (min_y, max_y) = self.height_range();
        (min_y..max_y)
            .rev()
            .find(|&y| matches!(self.block_at(IVec3::new(x, y, z)), Some(block) if block != AIR))
    }
}
