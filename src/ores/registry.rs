use super::descriptor::{DepositKind, GeneratorDescriptor, ValidationError, MATERIAL_PLUTON_SIZE};
use crate::blocks::{is_stone_like, BlockId, ZoneId};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

/// Handle to a registered descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorHandle {
    /// Index into the ore vein list
    Vein(usize),
    /// Index into the zone material list
    Material(usize),
}

/// Append-only store of every registered pluton generator
///
/// Ore veins and zone materials are kept in separate lists because each chunk
/// draws from both independently.
#[derive(Resource, Debug, Default)]
pub struct FeatureRegistry {
    veins: Vec<GeneratorDescriptor>,
    materials: Vec<GeneratorDescriptor>,
    /// Blocks of registered zone materials; ores may replace these by default
    material_blocks: HashSet<BlockId>,
    /// Ore block -> sample block
    samples: HashMap<BlockId, BlockId>,
    /// Sample block -> vein size it was registered with
    sample_counts: HashMap<BlockId, u32>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a descriptor, routing it by kind
    pub fn register(&mut self, descriptor: GeneratorDescriptor) -> Result<GeneratorHandle, ValidationError> {
        descriptor.validate()?;

        match descriptor.kind {
            DepositKind::Ore { ore, sample } => {
                self.samples.insert(ore, sample);
                self.sample_counts.insert(sample, descriptor.vein_size);
                self.veins.push(descriptor);
                Ok(GeneratorHandle::Vein(self.veins.len() - 1))
            }
            DepositKind::Filler { block } => {
                self.material_blocks.insert(block);
                self.materials.push(descriptor);
                Ok(GeneratorHandle::Material(self.materials.len() - 1))
            }
        }
    }

    /// Register a zone material pluton with the default size
    pub fn register_material(
        &mut self,
        block: BlockId,
        min_y: i32,
        max_y: i32,
        weight: u8,
    ) -> Result<GeneratorHandle, ValidationError> {
        self.register(GeneratorDescriptor::filler(block, MATERIAL_PLUTON_SIZE, min_y, max_y, weight))
    }

    pub fn get(&self, handle: GeneratorHandle) -> Option<&GeneratorDescriptor> {
        match handle {
            GeneratorHandle::Vein(index) => self.veins.get(index),
            GeneratorHandle::Material(index) => self.materials.get(index),
        }
    }

    /// Ore veins allowed to run in a zone, in registration order
    pub fn list_for(&self, zone: ZoneId) -> Vec<(GeneratorHandle, &GeneratorDescriptor)> {
        self.veins
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| !descriptor.is_excluded(zone))
            .map(|(index, descriptor)| (GeneratorHandle::Vein(index), descriptor))
            .collect()
    }

    /// Zone materials allowed to run in a zone, in registration order
    pub fn materials_for(&self, zone: ZoneId) -> Vec<(GeneratorHandle, &GeneratorDescriptor)> {
        self.materials
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| !descriptor.is_excluded(zone))
            .map(|(index, descriptor)| (GeneratorHandle::Material(index), descriptor))
            .collect()
    }

    /// Default replaceable set: the stone family plus registered zone materials
    pub fn is_default_replaceable(&self, block: BlockId) -> bool {
        is_stone_like(block) || self.material_blocks.contains(&block)
    }

    /// Sample block registered for an ore block
    pub fn sample_for(&self, ore: BlockId) -> Option<BlockId> {
        self.samples.get(&ore).copied()
    }

    /// Vein size registered with a sample block
    pub fn sample_count(&self, sample: BlockId) -> Option<u32> {
        self.sample_counts.get(&sample).copied()
    }

    /// Number of registered ore veins
    pub fn len(&self) -> usize {
        self.veins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.veins.is_empty()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{DIRT, STONE};

    const IRON_ORE: BlockId = 100;
    const IRON_SAMPLE: BlockId = 101;
    const LIMESTONE: BlockId = 102;

    #[test]
    fn test_register_routes_by_kind() {
        let mut registry = FeatureRegistry::new();
        let vein = registry
            .register(GeneratorDescriptor::ore(IRON_ORE, IRON_SAMPLE, 8, 0, 64, 100))
            .unwrap();
        let material = registry.register_material(LIMESTONE, 0, 80, 40).unwrap();

        assert_eq!(vein, GeneratorHandle::Vein(0));
        assert_eq!(material, GeneratorHandle::Material(0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.material_count(), 1);
        assert_eq!(registry.get(material).map(|d| d.vein_size), Some(MATERIAL_PLUTON_SIZE));
        assert_eq!(registry.get(GeneratorHandle::Vein(5)), None);
    }

    #[test]
    fn test_invalid_descriptor_is_rejected() {
        let mut registry = FeatureRegistry::new();
        let result = registry.register(GeneratorDescriptor::ore(IRON_ORE, IRON_SAMPLE, 8, 64, 0, 100));
        assert_eq!(result, Err(ValidationError::EmptyHeightRange { min_y: 64, max_y: 0 }));
        assert!(registry.is_empty());
        assert_eq!(registry.sample_for(IRON_ORE), None);

        assert_eq!(
            registry.register_material(LIMESTONE, 0, 80, 200),
            Err(ValidationError::WeightOutOfRange(200))
        );
        assert!(!registry.is_default_replaceable(LIMESTONE));
    }

    #[test]
    fn test_list_for_skips_excluded_zones() {
        let mut registry = FeatureRegistry::new();
        registry
            .register(GeneratorDescriptor::ore(IRON_ORE, IRON_SAMPLE, 8, 0, 64, 100).with_excluded_zones([-1, 1]))
            .unwrap();
        registry
            .register(GeneratorDescriptor::ore(110, 111, 12, 0, 32, 50))
            .unwrap();

        for zone in [-1, 1] {
            let listed = registry.list_for(zone);
            assert_eq!(listed.len(), 1);
            assert!(listed.iter().all(|(_, d)| !d.excluded_zones.contains(&zone)));
        }
        assert_eq!(registry.list_for(0).len(), 2);
    }

    #[test]
    fn test_sample_tables_and_default_replaceable() {
        let mut registry = FeatureRegistry::new();
        registry
            .register(GeneratorDescriptor::ore(IRON_ORE, IRON_SAMPLE, 24, 0, 64, 100))
            .unwrap();
        registry.register_material(LIMESTONE, 0, 80, 40).unwrap();

        assert_eq!(registry.sample_for(IRON_ORE), Some(IRON_SAMPLE));
        assert_eq!(registry.sample_count(IRON_SAMPLE), Some(24));
        assert!(registry.is_default_replaceable(STONE));
        assert!(registry.is_default_replaceable(LIMESTONE));
        assert!(!registry.is_default_replaceable(DIRT));
    }
}
