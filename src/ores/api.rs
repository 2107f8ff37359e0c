use super::descriptor::{GeneratorDescriptor, ValidationError};
use super::ledger::{DepositLedger, LedgerSnapshot};
use super::registry::{FeatureRegistry, GeneratorHandle};
use crate::blocks::{BlockId, BlockRegistry, ChunkKey, ZoneId};
use bevy::prelude::*;

/// Registration and lookup entry points for other add-ons
///
/// Registration is the only way into the `FeatureRegistry` from outside
/// this crate. Call it while building the app, before chunks generate.
pub trait VeinAppExt {
    /// Register a block by name, returning its ID
    fn register_block(&mut self, name: &str) -> BlockId;

    /// Register an ore vein that replaces the default stone-like set
    #[allow(clippy::too_many_arguments)]
    fn register_vein_generator(
        &mut self,
        ore: BlockId,
        sample: BlockId,
        vein_size: u32,
        min_y: i32,
        max_y: i32,
        weight: u8,
        excluded_zones: &[ZoneId],
    ) -> Result<GeneratorHandle, ValidationError>;

    /// Register a fully specified descriptor, e.g. one with its own replaceable set
    fn register_vein_generator_with(&mut self, descriptor: GeneratorDescriptor) -> Result<GeneratorHandle, ValidationError>;

    /// Register a zone material; its block becomes replaceable by ore veins
    fn register_zone_material(
        &mut self,
        block: BlockId,
        min_y: i32,
        max_y: i32,
        weight: u8,
    ) -> Result<GeneratorHandle, ValidationError>;

    /// Copy of every recorded deposit and regen flag
    fn deposits(&self) -> LedgerSnapshot;

    /// Check if a chunk went through the retroactive pass
    fn has_chunk_regenned(&self, key: ChunkKey) -> bool;
}

impl VeinAppExt for App {
    fn register_block(&mut self, name: &str) -> BlockId {
        self.world_mut()
            .get_resource_or_init::<BlockRegistry>()
            .register(name)
    }

    fn register_vein_generator(
        &mut self,
        ore: BlockId,
        sample: BlockId,
        vein_size: u32,
        min_y: i32,
        max_y: i32,
        weight: u8,
        excluded_zones: &[ZoneId],
    ) -> Result<GeneratorHandle, ValidationError> {
        let descriptor = GeneratorDescriptor::ore(ore, sample, vein_size, min_y, max_y, weight)
            .with_excluded_zones(excluded_zones.iter().copied());
        self.register_vein_generator_with(descriptor)
    }

    fn register_vein_generator_with(&mut self, descriptor: GeneratorDescriptor) -> Result<GeneratorHandle, ValidationError> {
        self.world_mut()
            .get_resource_or_init::<FeatureRegistry>()
            .register(descriptor)
    }

    fn register_zone_material(
        &mut self,
        block: BlockId,
        min_y: i32,
        max_y: i32,
        weight: u8,
    ) -> Result<GeneratorHandle, ValidationError> {
        self.world_mut()
            .get_resource_or_init::<FeatureRegistry>()
            .register_material(block, min_y, max_y, weight)
    }

    fn deposits(&self) -> LedgerSnapshot {
        self.world()
            .get_resource::<DepositLedger>()
            .map(DepositLedger::snapshot)
            .unwrap_or_default()
    }

    fn has_chunk_regenned(&self, key: ChunkKey) -> bool {
        self.world()
            .get_resource::<DepositLedger>()
            .is_some_and(|ledger| ledger.has_regenned(&key))
    }
}
