use super::constants::{BUILTIN_BLOCKS, FIRST_CUSTOM_BLOCK};
use super::types::BlockId;
use bevy::prelude::*;
use std::collections::HashMap;

/// Name <-> ID table for every block the world knows about
///
/// Built-in blocks keep their constant IDs; blocks registered by add-ons are
/// numbered from `FIRST_CUSTOM_BLOCK` upwards.
#[derive(Resource, Debug, Clone)]
pub struct BlockRegistry {
    names: HashMap<BlockId, String>,
    ids: HashMap<String, BlockId>,
    next_id: BlockId,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            names: HashMap::new(),
            ids: HashMap::new(),
            next_id: FIRST_CUSTOM_BLOCK,
        };
        for (id, name) in BUILTIN_BLOCKS {
            registry.insert(id, name);
        }
        registry
    }

    fn insert(&mut self, id: BlockId, name: &str) {
        self.names.insert(id, name.to_string());
        self.ids.insert(name.to_string(), id);
    }

    /// Register a block by name, returning the existing ID if already known
    pub fn register(&mut self, name: &str) -> BlockId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.insert(id, name);
        id
    }

    /// Look up a block name by ID
    pub fn name(&self, id: BlockId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name used as deposit identifier, falling back to `#id` for unnamed blocks
    pub fn deposit_name(&self, id: BlockId) -> String {
        self.name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::constants::{STONE, TUFF};

    #[test]
    fn test_builtins_are_registered() {
        let registry = BlockRegistry::new();
        assert_eq!(registry.name(STONE), Some("core:stone"));
        assert_eq!(registry.name(TUFF), Some("core:tuff"));
        assert_eq!(registry.len(), BUILTIN_BLOCKS.len());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = BlockRegistry::new();
        let hematite = registry.register("demo:hematite_ore");
        assert_eq!(hematite, FIRST_CUSTOM_BLOCK);
        assert_eq!(registry.register("demo:hematite_ore"), hematite);

        let sample = registry.register("demo:hematite_sample");
        assert_eq!(sample, FIRST_CUSTOM_BLOCK + 1);
        assert_eq!(registry.deposit_name(sample), "demo:hematite_sample");
        assert_eq!(registry.deposit_name(9999), "#9999");
    }
}
