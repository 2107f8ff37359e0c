use super::ledger::DepositLedger;
use super::pluton::{PlacementResult, VeinPlacer};
use super::registry::FeatureRegistry;
use super::remove_veins::remove_vanilla_veins;
use super::samples::{place_samples, sample_budget};
use super::selector::ChunkSelector;
use crate::blocks::{BlockRegistry, ChunkKey};
use crate::config::OreGenConfig;
use crate::world::BlockAccess;
use bevy::prelude::*;

/// What happened in one chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkReport {
    /// Conflicting vanilla blocks replaced with tuff
    pub removed_vanilla: u32,
    /// Zone material pluton, if one fired
    pub material: Option<PlacementResult>,
    /// Ore pluton, if one fired
    pub ore: Option<PlacementResult>,
    /// Deposit id recorded in the ledger
    pub deposit: Option<String>,
    /// Surface samples dropped
    pub samples: u32,
}

/// Runs the per-chunk generation steps against any world
pub struct DepositGenerator<'a> {
    pub registry: &'a FeatureRegistry,
    pub blocks: &'a BlockRegistry,
    pub config: &'a OreGenConfig,
    /// Flat worlds keep their vanilla blocks
    pub flat_world: bool,
}

impl<'a> DepositGenerator<'a> {
    pub fn new(registry: &'a FeatureRegistry, blocks: &'a BlockRegistry, config: &'a OreGenConfig, flat_world: bool) -> Self {
        Self {
            registry,
            blocks,
            config,
            flat_world,
        }
    }

    /// Remove conflicting vanilla veins if enabled for this world
    pub fn remove_vanilla<W>(&self, world: &mut W, key: ChunkKey) -> u32
    where
        W: BlockAccess + ?Sized,
    {
        if !self.config.remove_vanilla_ores || self.flat_world {
            return 0;
        }
        let removed = remove_vanilla_veins(world, key.pos());
        if removed > 0 && self.config.advanced_debug {
            info!("Removed {} vein blocks in chunk {}", removed, key);
        }
        removed
    }

    /// Generate a chunk's zone material and deposit
    ///
    /// Chunks that already have a recorded deposit are left untouched.
    pub fn generate<W>(&self, world: &mut W, ledger: &mut DepositLedger, key: ChunkKey, seed: u64) -> ChunkReport
    where
        W: BlockAccess + ?Sized,
    {
        let mut report = ChunkReport::default();
        if ledger.deposit_at(&key).is_some() {
            return report;
        }

        report.removed_vanilla = self.remove_vanilla(world, key);

        let selector = ChunkSelector::new(self.registry, &self.config.excluded_zones);
        let placer = VeinPlacer::new(self.registry);
        let anchor = key.pos().origin(0);

        // Zone materials go first so ores can cut through them
        if let Some(mut selection) = selector.select_material_for(key.pos(), key.zone, seed) {
            report.material = Some(placer.place(world, selection.descriptor, anchor, &mut selection.rng));
        }

        let Some(mut selection) = selector.select_for(key.pos(), key.zone, seed) else {
            return report;
        };
        let result = placer.place(world, selection.descriptor, anchor, &mut selection.rng);
        report.ore = Some(result);

        if self.config.advanced_debug {
            debug!(
                "Chunk {}: placed {}/{} ore blocks from {} in {} attempts",
                key, result.placed, result.requested, result.origin, result.attempts
            );
        }

        if result.placed == 0 {
            return report;
        }
        let Some(sample) = selection.descriptor.kind.sample() else {
            return report;
        };

        let deposit = self.blocks.deposit_name(sample);
        ledger.record_deposit(key, deposit.clone());
        if self.config.debug_generation {
            let (matching, total) = ledger.deposit_share(&deposit);
            info!(
                "{}: {}/{} ({:.1}%)",
                deposit,
                matching,
                total,
                100.0 * matching as f32 / total as f32
            );
        }

        let count = self.registry.sample_count(sample).unwrap_or(selection.descriptor.vein_size);
        let budget = sample_budget(count, self.config.max_samples_per_chunk);
        report.samples = place_samples(world, key.pos(), sample, budget, &mut selection.rng);
        report.deposit = Some(deposit);

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::*;
    use crate::ores::GeneratorDescriptor;
    use crate::world::{VoxelWorld, WorldKind};

    struct Fixture {
        registry: FeatureRegistry,
        blocks: BlockRegistry,
        config: OreGenConfig,
        sample: BlockId,
    }

    fn fixture(weight: u8) -> Fixture {
        let mut blocks = BlockRegistry::new();
        let ore = blocks.register("test:iron_ore");
        let sample = blocks.register("test:iron_sample");
        let mut registry = FeatureRegistry::new();
        registry
            .register(GeneratorDescriptor::ore(ore, sample, 8, 0, 40, weight))
            .unwrap();
        Fixture {
            registry,
            blocks,
            config: OreGenConfig::default(),
            sample,
        }
    }

    fn world_around(center: ChunkPos) -> VoxelWorld {
        let mut world = VoxelWorld::new(0, WorldKind::Normal, 99);
        for pos in center.chunks_in_radius(1) {
            world.generate_chunk(pos);
        }
        world
    }

    #[test]
    fn test_generate_records_deposit_and_samples() {
        let f = fixture(100);
        let generator = DepositGenerator::new(&f.registry, &f.blocks, &f.config, false);
        let mut world = world_around(ChunkPos::new(0, 0));
        let mut ledger = DepositLedger::new();
        let key = ChunkKey::new(0, 0, 0);

        let report = generator.generate(&mut world, &mut ledger, key, 99);

        assert!(report.removed_vanilla > 0);
        let ore = report.ore.expect("weight 100 always fires");
        assert!(ore.placed > 0 && ore.placed <= 8);
        assert_eq!(report.deposit.as_deref(), Some("test:iron_sample"));
        assert_eq!(ledger.deposit_at(&key), Some("test:iron_sample"));
        // Vein size 8 buys two samples
        assert!(report.samples > 0 && report.samples <= 2);
        assert_eq!(world.chunk(&key.pos()).unwrap().count(f.sample), report.samples as usize);
    }

    #[test]
    fn test_generated_chunk_is_not_regenerated() {
        let f = fixture(100);
        let generator = DepositGenerator::new(&f.registry, &f.blocks, &f.config, false);
        let mut world = world_around(ChunkPos::new(0, 0));
        let mut ledger = DepositLedger::new();
        let key = ChunkKey::new(0, 0, 0);

        generator.generate(&mut world, &mut ledger, key, 99);
        let before = world.chunk(&key.pos()).unwrap().clone();

        let report = generator.generate(&mut world, &mut ledger, key, 99);
        assert_eq!(report, ChunkReport::default());
        assert_eq!(world.chunk(&key.pos()).unwrap(), &before);
    }

    #[test]
    fn test_excluded_zone_is_untouched() {
        let f = fixture(100);
        let generator = DepositGenerator::new(&f.registry, &f.blocks, &f.config, false);
        let mut world = world_around(ChunkPos::new(0, 0));
        let mut ledger = DepositLedger::new();

        // Zone -1 is excluded by default
        let report = generator.generate(&mut world, &mut ledger, ChunkKey::new(0, 0, -1), 99);
        assert_eq!(report.ore, None);
        assert_eq!(ledger.deposit_count(), 0);
    }

    #[test]
    fn test_flat_world_keeps_vanilla_blocks() {
        let f = fixture(0);
        let generator = DepositGenerator::new(&f.registry, &f.blocks, &f.config, true);
        let mut world = world_around(ChunkPos::new(0, 0));
        let mut ledger = DepositLedger::new();

        let report = generator.generate(&mut world, &mut ledger, ChunkKey::new(0, 0, 0), 99);
        assert_eq!(report.removed_vanilla, 0);
        assert!(world.chunk(&ChunkPos::new(0, 0)).unwrap().count(COPPER_ORE) > 0);
        assert_eq!(report.ore, None);
    }

    #[test]
    fn test_material_runs_before_ore() {
        let mut f = fixture(100);
        let limestone = f.blocks.register("test:limestone");
        f.registry.register_material(limestone, 0, 40, 100).unwrap();
        let generator = DepositGenerator::new(&f.registry, &f.blocks, &f.config, false);
        let mut world = world_around(ChunkPos::new(0, 0));
        let mut ledger = DepositLedger::new();

        let report = generator.generate(&mut world, &mut ledger, ChunkKey::new(0, 0, 0), 99);
        let material = report.material.expect("weight 100 always fires");
        assert!(material.placed > 0);
        assert!(report.ore.is_some());
    }
}
