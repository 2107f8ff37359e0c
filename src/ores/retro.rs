use super::generation::{ChunkReport, DepositGenerator};
use super::ledger::DepositLedger;
use crate::blocks::ChunkKey;
use crate::world::BlockAccess;

/// Result of running the retroactive pass on one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetroOutcome {
    /// Retroactive replacement is switched off
    Disabled,
    /// The chunk was already reprocessed; regenned is terminal
    AlreadyRegenned,
    /// The chunk was reprocessed and is now marked regenned
    Regenned(ChunkReport),
}

/// Bring a chunk generated before deposits existed up to date
///
/// Conflicting vanilla veins are removed, a deposit is generated unless one
/// is already recorded, and the chunk is marked regenned.
pub fn run_retroactive<W>(
    generator: &DepositGenerator<'_>,
    world: &mut W,
    ledger: &mut DepositLedger,
    key: ChunkKey,
    seed: u64,
) -> RetroOutcome
where
    W: BlockAccess + ?Sized,
{
    if !generator.config.retro_replace {
        return RetroOutcome::Disabled;
    }
    if ledger.has_regenned(&key) {
        return RetroOutcome::AlreadyRegenned;
    }

    let report = if ledger.deposit_at(&key).is_some() {
        ChunkReport {
            removed_vanilla: generator.remove_vanilla(world, key),
            ..ChunkReport::default()
        }
    } else {
        generator.generate(world, ledger, key, seed)
    };

    ledger.mark_regenned(key);
    RetroOutcome::Regenned(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::*;
    use crate::config::OreGenConfig;
    use crate::ores::{FeatureRegistry, GeneratorDescriptor};
    use crate::world::{generate_chunk, VoxelWorld, WorldKind};

    fn setup() -> (FeatureRegistry, BlockRegistry, VoxelWorld) {
        let mut blocks = BlockRegistry::new();
        let ore = blocks.register("test:tin_ore");
        let sample = blocks.register("test:tin_sample");
        let mut registry = FeatureRegistry::new();
        registry
            .register(GeneratorDescriptor::ore(ore, sample, 12, 0, 40, 100))
            .unwrap();

        let mut world = VoxelWorld::new(0, WorldKind::Normal, 4);
        for pos in ChunkPos::new(0, 0).chunks_in_radius(1) {
            world.insert_existing(generate_chunk(pos, WorldKind::Normal, 4));
        }
        (registry, blocks, world)
    }

    #[test]
    fn test_disabled_by_default() {
        let (registry, blocks, mut world) = setup();
        let config = OreGenConfig::default();
        let generator = DepositGenerator::new(&registry, &blocks, &config, false);
        let mut ledger = DepositLedger::new();

        let outcome = run_retroactive(&generator, &mut world, &mut ledger, ChunkKey::new(0, 0, 0), 4);
        assert_eq!(outcome, RetroOutcome::Disabled);
        assert!(!ledger.has_regenned(&ChunkKey::new(0, 0, 0)));
    }

    #[test]
    fn test_regen_is_terminal() {
        let (registry, blocks, mut world) = setup();
        let config = OreGenConfig {
            retro_replace: true,
            ..OreGenConfig::default()
        };
        let generator = DepositGenerator::new(&registry, &blocks, &config, false);
        let mut ledger = DepositLedger::new();
        let key = ChunkKey::new(0, 0, 0);

        let RetroOutcome::Regenned(report) = run_retroactive(&generator, &mut world, &mut ledger, key, 4) else {
            panic!("expected the chunk to be reprocessed");
        };
        assert!(report.removed_vanilla > 0);
        assert_eq!(report.deposit.as_deref(), Some("test:tin_sample"));
        assert!(ledger.has_regenned(&key));

        let before = world.chunk(&key.pos()).unwrap().clone();
        assert_eq!(
            run_retroactive(&generator, &mut world, &mut ledger, key, 4),
            RetroOutcome::AlreadyRegenned
        );
        assert_eq!(world.chunk(&key.pos()).unwrap(), &before);
        assert_eq!(ledger.regenned_count(), 1);
    }

    #[test]
    fn test_existing_deposit_is_kept() {
        let (registry, blocks, mut world) = setup();
        let config = OreGenConfig {
            retro_replace: true,
            ..OreGenConfig::default()
        };
        let generator = DepositGenerator::new(&registry, &blocks, &config, false);
        let mut ledger = DepositLedger::new();
        let key = ChunkKey::new(1, 1, 0);
        ledger.record_deposit(key, "test:older_sample");

        let RetroOutcome::Regenned(report) = run_retroactive(&generator, &mut world, &mut ledger, key, 4) else {
            panic!("expected the chunk to be reprocessed");
        };
        assert_eq!(report.ore, None);
        assert!(report.removed_vanilla > 0);
        assert_eq!(ledger.deposit_at(&key), Some("test:older_sample"));
        assert!(ledger.has_regenned(&key));
    }
}
