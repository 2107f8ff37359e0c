use super::descriptor::{GeneratorDescriptor, MAX_WEIGHT};
use super::registry::{FeatureRegistry, GeneratorHandle};
use crate::blocks::{ChunkPos, ZoneId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Salt separating the zone material stream from the ore stream
const MATERIAL_SALT: u64 = 0x6D61_7465_7269_616C;

/// Mix a world seed and chunk coordinates into a per-chunk seed
pub fn chunk_seed(world_seed: u64, pos: ChunkPos) -> u64 {
    let mut h = world_seed
        ^ (pos.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (pos.z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    h ^ (h >> 33)
}

/// A generator picked for a chunk, plus the random stream placement continues
pub struct Selection<'a> {
    pub handle: GeneratorHandle,
    pub descriptor: &'a GeneratorDescriptor,
    pub rng: ChaCha8Rng,
}

/// Decides which generator, if any, runs in a chunk
///
/// Selection is two-stage: one candidate is picked uniformly among the
/// generators eligible for the zone, then the candidate fires with probability
/// `weight / 100`. Weight never biases which candidate is picked.
pub struct ChunkSelector<'a> {
    registry: &'a FeatureRegistry,
    excluded_zones: &'a [ZoneId],
}

impl<'a> ChunkSelector<'a> {
    pub fn new(registry: &'a FeatureRegistry, excluded_zones: &'a [ZoneId]) -> Self {
        Self {
            registry,
            excluded_zones,
        }
    }

    /// Check the zone against the configured exclusion list
    pub fn is_zone_allowed(&self, zone: ZoneId) -> bool {
        !self.excluded_zones.contains(&zone)
    }

    /// Pick the ore vein for a chunk; same inputs always give the same answer
    pub fn select_for(&self, pos: ChunkPos, zone: ZoneId, seed: u64) -> Option<Selection<'a>> {
        if !self.is_zone_allowed(zone) {
            return None;
        }
        let rng = ChaCha8Rng::seed_from_u64(chunk_seed(seed, pos));
        pick_then_accept(self.registry.list_for(zone), rng)
    }

    /// Pick the zone material pluton for a chunk
    pub fn select_material_for(&self, pos: ChunkPos, zone: ZoneId, seed: u64) -> Option<Selection<'a>> {
        if !self.is_zone_allowed(zone) {
            return None;
        }
        let rng = ChaCha8Rng::seed_from_u64(chunk_seed(seed ^ MATERIAL_SALT, pos));
        pick_then_accept(self.registry.materials_for(zone), rng)
    }
}

fn pick_then_accept(
    eligible: Vec<(GeneratorHandle, &GeneratorDescriptor)>,
    mut rng: ChaCha8Rng,
) -> Option<Selection<'_>> {
    if eligible.is_empty() {
        return None;
    }
    let (handle, descriptor) = eligible[rng.gen_range(0..eligible.len())];
    if rng.gen_range(0..MAX_WEIGHT) >= descriptor.weight {
        return None;
    }
    Some(Selection {
        handle,
        descriptor,
        rng,
    })
}
