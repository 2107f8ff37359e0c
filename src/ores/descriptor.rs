use crate::blocks::{BlockId, ZoneId};
use std::collections::HashSet;
use thiserror::Error;

/// Default pluton size for zone materials registered without one
pub const MATERIAL_PLUTON_SIZE: u32 = 64;

/// Highest accepted spawn weight
pub const MAX_WEIGHT: u8 = 100;

/// What a pluton is made of and what it leaves on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositKind {
    /// Ore vein; the sample block marks it on the surface
    Ore { ore: BlockId, sample: BlockId },
    /// Zone material (a stone variety); leaves no sample
    Filler { block: BlockId },
}

impl DepositKind {
    /// Block written into the world by the pluton
    pub fn placed_block(&self) -> BlockId {
        match *self {
            DepositKind::Ore { ore, .. } => ore,
            DepositKind::Filler { block } => block,
        }
    }

    /// Surface sample block, if this kind has one
    pub fn sample(&self) -> Option<BlockId> {
        match *self {
            DepositKind::Ore { sample, .. } => Some(sample),
            DepositKind::Filler { .. } => None,
        }
    }
}

/// Error returned when a descriptor is registered with out-of-range fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("vein size must be greater than zero")]
    ZeroVeinSize,
    #[error("min_y ({min_y}) must be below max_y ({max_y})")]
    EmptyHeightRange { min_y: i32, max_y: i32 },
    #[error("weight {0} is outside 0..=100")]
    WeightOutOfRange(u8),
}

/// Everything needed to generate one kind of pluton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorDescriptor {
    pub kind: DepositKind,
    /// Maximum number of blocks placed per pluton
    pub vein_size: u32,
    /// Lowest Y the pluton origin may use (inclusive)
    pub min_y: i32,
    /// Highest Y the pluton origin may use (exclusive)
    pub max_y: i32,
    /// Percent chance the pluton fires once picked for a chunk
    pub weight: u8,
    /// Zones this generator never runs in
    pub excluded_zones: HashSet<ZoneId>,
    /// Blocks this pluton may replace; empty means the default stone-like set
    pub replaceable: HashSet<BlockId>,
}

impl GeneratorDescriptor {
    /// Describe an ore vein
    pub fn ore(ore: BlockId, sample: BlockId, vein_size: u32, min_y: i32, max_y: i32, weight: u8) -> Self {
        Self::new(DepositKind::Ore { ore, sample }, vein_size, min_y, max_y, weight)
    }

    /// Describe a zone material pluton
    pub fn filler(block: BlockId, vein_size: u32, min_y: i32, max_y: i32, weight: u8) -> Self {
        Self::new(DepositKind::Filler { block }, vein_size, min_y, max_y, weight)
    }

    pub fn new(kind: DepositKind, vein_size: u32, min_y: i32, max_y: i32, weight: u8) -> Self {
        Self {
            kind,
            vein_size,
            min_y,
            max_y,
            weight,
            excluded_zones: HashSet::new(),
            replaceable: HashSet::new(),
        }
    }

    pub fn with_excluded_zones(mut self, zones: impl IntoIterator<Item = ZoneId>) -> Self {
        self.excluded_zones.extend(zones);
        self
    }

    pub fn with_replaceable(mut self, blocks: impl IntoIterator<Item = BlockId>) -> Self {
        self.replaceable.extend(blocks);
        self
    }

    /// Check field ranges; nothing is ever clamped
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vein_size == 0 {
            return Err(ValidationError::ZeroVeinSize);
        }
        if self.min_y >= self.max_y {
            return Err(ValidationError::EmptyHeightRange {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        if self.weight > MAX_WEIGHT {
            return Err(ValidationError::WeightOutOfRange(self.weight));
        }
        Ok(())
    }

    pub fn is_excluded(&self, zone: ZoneId) -> bool {
        self.excluded_zones.contains(&zone)
    }

    /// Whether the pluton may overwrite `current`
    ///
    /// `default_replaceable` decides when the descriptor has no explicit set.
    pub fn can_replace(&self, current: BlockId, default_replaceable: impl Fn(BlockId) -> bool) -> bool {
        if self.replaceable.is_empty() {
            default_replaceable(current)
        } else {
            self.replaceable.contains(&current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{is_stone_like, DIRT, GRANITE, STONE};

    #[test]
    fn test_validation() {
        assert_eq!(GeneratorDescriptor::ore(100, 101, 8, 0, 64, 100).validate(), Ok(()));
        assert_eq!(GeneratorDescriptor::ore(100, 101, 8, 0, 64, 0).validate(), Ok(()));
        assert_eq!(
            GeneratorDescriptor::ore(100, 101, 0, 0, 64, 50).validate(),
            Err(ValidationError::ZeroVeinSize)
        );
        assert_eq!(
            GeneratorDescriptor::ore(100, 101, 8, 64, 64, 50).validate(),
            Err(ValidationError::EmptyHeightRange { min_y: 64, max_y: 64 })
        );
        assert_eq!(
            GeneratorDescriptor::filler(100, 8, 0, 64, 101).validate(),
            Err(ValidationError::WeightOutOfRange(101))
        );
    }

    #[test]
    fn test_kind_roles() {
        let ore = DepositKind::Ore { ore: 100, sample: 101 };
        assert_eq!(ore.placed_block(), 100);
        assert_eq!(ore.sample(), Some(101));

        let filler = DepositKind::Filler { block: 102 };
        assert_eq!(filler.placed_block(), 102);
        assert_eq!(filler.sample(), None);
    }

    #[test]
    fn test_can_replace() {
        let default_set = GeneratorDescriptor::ore(100, 101, 8, 0, 64, 100);
        assert!(default_set.can_replace(STONE, is_stone_like));
        assert!(!default_set.can_replace(DIRT, is_stone_like));

        let explicit = default_set.clone().with_replaceable([DIRT]);
        assert!(explicit.can_replace(DIRT, is_stone_like));
        assert!(!explicit.can_replace(GRANITE, is_stone_like));
    }
}
