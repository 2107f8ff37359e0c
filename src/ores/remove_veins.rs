use crate::blocks::{ChunkPos, CHUNK_SIZE_I32, CONFLICTING_VEIN_BLOCKS, TUFF};
use crate::world::BlockAccess;
use bevy::math::IVec3;

/// Replace every conflicting vanilla vein block in a chunk with tuff
///
/// Returns the number of blocks replaced.
pub fn remove_vanilla_veins<W>(world: &mut W, pos: ChunkPos) -> u32
where
    W: BlockAccess + ?Sized,
{
    let (min_y, max_y) = world.height_range();
    let mut removed = 0;

    for x in pos.min_block_x()..pos.min_block_x() + CHUNK_SIZE_I32 {
        for z in pos.min_block_z()..pos.min_block_z() + CHUNK_SIZE_I32 {
            for y in min_y..max_y {
                let block_pos = IVec3::new(x, y, z);
                let Some(block) = world.block_at(block_pos) else {
                    continue;
                };
                if CONFLICTING_VEIN_BLOCKS.contains(&block) && world.set_block(block_pos, TUFF) {
                    removed += 1;
                }
            }
        }
    }

    removed
}
