use crate::blocks::BlockRegistry;
use crate::config::OreGenConfig;
use crate::ores::{DepositLedger, FeatureRegistry};
use crate::world::{loader, LedgerAutosave, VoxelWorld};
use bevy::prelude::*;

/// Installs deposit generation, the retroactive pass and ledger persistence
pub struct OreGenPlugin {
    pub config: OreGenConfig,
}

impl OreGenPlugin {
    pub fn new(config: OreGenConfig) -> Self {
        Self { config }
    }
}

impl Default for OreGenPlugin {
    fn default() -> Self {
        Self::new(OreGenConfig::default())
    }
}

impl Plugin for OreGenPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(LedgerAutosave::from_seconds(self.config.autosave_interval_secs))
            .init_resource::<FeatureRegistry>()
            .init_resource::<BlockRegistry>()
            .init_resource::<DepositLedger>()
            .init_resource::<VoxelWorld>()
            .add_systems(Startup, loader::load_deposit_ledger)
            .add_systems(
                Update,
                (
                    loader::generate_pending_chunks,
                    loader::run_retroactive_pass.after(loader::generate_pending_chunks),
                    loader::autosave_ledger.after(loader::run_retroactive_pass),
                    loader::log_world_stats.after(loader::autosave_ledger),
                ),
            )
            .add_systems(Last, loader::save_ledger_on_exit);
    }
}
