use super::descriptor::GeneratorDescriptor;
use super::registry::FeatureRegistry;
use crate::blocks::BlockId;
use crate::world::BlockAccess;
use bevy::math::IVec3;
use bevy::log::warn;
use rand::Rng;
use std::collections::HashSet;

/// Horizontal distance the pluton origin may drift from its anchor
pub const HORIZONTAL_JITTER: i32 = 5;

/// Growth attempts allowed per requested block
pub const ATTEMPTS_PER_BLOCK: u32 = 4;

const NEIGHBOURS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

/// Outcome of growing one pluton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    /// Where growth started
    pub origin: IVec3,
    /// Blocks actually written
    pub placed: u32,
    /// Vein size asked for
    pub requested: u32,
    /// Growth attempts spent
    pub attempts: u32,
}

impl PlacementResult {
    /// True when the attempt budget ran out before the full size was placed
    pub fn is_exhausted(&self) -> bool {
        self.placed < self.requested
    }
}

/// Grows irregular plutons into live world state
pub struct VeinPlacer<'a> {
    registry: &'a FeatureRegistry,
}

impl<'a> VeinPlacer<'a> {
    pub fn new(registry: &'a FeatureRegistry) -> Self {
        Self { registry }
    }

    /// Grow a pluton of `descriptor` near `anchor`
    ///
    /// The origin is jittered horizontally by up to `HORIZONTAL_JITTER` and
    /// drawn from `[min_y, max_y)` vertically. Growth is a random branching
    /// walk: each attempt steps from a random grown block to one of its face
    /// neighbours. Only loaded, replaceable positions are written, never more
    /// than `vein_size` of them. Writes are not rolled back. A descriptor that
    /// fails validation places nothing.
    pub fn place<W, R>(&self, world: &mut W, descriptor: &GeneratorDescriptor, anchor: IVec3, rng: &mut R) -> PlacementResult
    where
        W: BlockAccess + ?Sized,
        R: Rng + ?Sized,
    {
        if let Err(e) = descriptor.validate() {
            warn!("Skipping invalid pluton at {}: {}", anchor, e);
            return PlacementResult {
                origin: anchor,
                placed: 0,
                requested: descriptor.vein_size,
                attempts: 0,
            };
        }

        let origin = IVec3::new(
            anchor.x + rng.gen_range(-HORIZONTAL_JITTER..=HORIZONTAL_JITTER),
            rng.gen_range(descriptor.min_y..descriptor.max_y),
            anchor.z + rng.gen_range(-HORIZONTAL_JITTER..=HORIZONTAL_JITTER),
        );
        let block = descriptor.kind.placed_block();
        let max_attempts = descriptor.vein_size.saturating_mul(ATTEMPTS_PER_BLOCK);

        let mut result = PlacementResult {
            origin,
            placed: 0,
            requested: descriptor.vein_size,
            attempts: 1,
        };

        // Grown blocks seed further growth; until one exists, growth walks
        // through any loaded position it has probed
        let mut visited = HashSet::from([origin]);
        let mut grown = Vec::new();
        let mut probed = Vec::new();

        match self.try_replace(world, descriptor, origin, block) {
            Some(true) => grown.push(origin),
            Some(false) => probed.push(origin),
            None => {}
        }
        result.placed = grown.len() as u32;

        while result.placed < descriptor.vein_size && result.attempts < max_attempts {
            let pool = if grown.is_empty() { &probed } else { &grown };
            if pool.is_empty() {
                break;
            }
            result.attempts += 1;

            let from = pool[rng.gen_range(0..pool.len())];
            let next = from + NEIGHBOURS[rng.gen_range(0..NEIGHBOURS.len())];
            if !visited.insert(next) {
                continue;
            }

            match self.try_replace(world, descriptor, next, block) {
                Some(true) => {
                    grown.push(next);
                    result.placed += 1;
                }
                Some(false) => probed.push(next),
                None => {}
            }
        }

        result
    }

    /// `None` if the position is not loaded, otherwise whether it was written
    fn try_replace<W>(&self, world: &mut W, descriptor: &GeneratorDescriptor, pos: IVec3, block: BlockId) -> Option<bool>
    where
        W: BlockAccess + ?Sized,
    {
        let current = world.block_at(pos)?;
        if !descriptor.can_replace(current, |b| self.registry.is_default_replaceable(b)) {
            return Some(false);
        }
        Some(world.set_block(pos, block))
    }
}
