use crate::blocks::{BlockId, ChunkPos, AIR, CHUNK_SIZE_I32};
use crate::world::BlockAccess;
use bevy::math::IVec3;
use rand::Rng;

/// One surface sample per this many blocks of registered vein size
pub const SAMPLE_DIVISOR: u32 = 4;

/// Number of samples to drop for a deposit, at least one unless `max` is zero
pub fn sample_budget(sample_count: u32, max_per_chunk: u32) -> u32 {
    (sample_count / SAMPLE_DIVISOR).max(1).min(max_per_chunk)
}

/// Drop up to `budget` sample blocks on the surface of a chunk
///
/// Each sample sits on the topmost solid block of a random column, in air,
/// and never on top of another sample. Returns the number placed.
pub fn place_samples<W, R>(world: &mut W, pos: ChunkPos, sample: BlockId, budget: u32, rng: &mut R) -> u32
where
    W: BlockAccess + ?Sized,
    R: Rng + ?Sized,
{
    let mut placed = 0;
    for _ in 0..budget.saturating_mul(2) {
        if placed >= budget {
            break;
        }
        let x = pos.min_block_x() + rng.gen_range(0..CHUNK_SIZE_I32);
        let z = pos.min_block_z() + rng.gen_range(0..CHUNK_SIZE_I32);
        let Some(surface) = world.surface_y(x, z) else {
            continue;
        };
        if world.block_at(IVec3::new(x, surface, z)) == Some(sample) {
            continue;
        }
        let target = IVec3::new(x, surface + 1, z);
        if world.block_at(target) == Some(AIR) && world.set_block(target, sample) {
            placed += 1;
        }
    }
    placed
}
