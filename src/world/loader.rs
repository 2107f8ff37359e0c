use super::generator::WorldKind;
use super::manager::VoxelWorld;
use crate::blocks::BlockRegistry;
use crate::config::OreGenConfig;
use crate::ores::{run_retroactive, DepositGenerator, DepositLedger, FeatureRegistry, RetroOutcome};
use bevy::prelude::*;

/// Shortest autosave interval the timer accepts
pub const MIN_AUTOSAVE_INTERVAL_SECS: f32 = 1.0;

/// Timer driving periodic ledger saves
#[derive(Resource, Deref, DerefMut)]
pub struct LedgerAutosave(pub Timer);

impl LedgerAutosave {
    /// Intervals below `MIN_AUTOSAVE_INTERVAL_SECS` (or NaN) are raised to it
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(
            seconds.max(MIN_AUTOSAVE_INTERVAL_SECS),
            TimerMode::Repeating,
        ))
    }
}

/// System to load the deposit ledger when the world opens
pub fn load_deposit_ledger(config: Res<OreGenConfig>, mut ledger: ResMut<DepositLedger>) {
    *ledger = DepositLedger::load_or_empty(&config.ledger_path);
}

/// System to generate deposits in freshly generated chunks
pub fn generate_pending_chunks(
    mut world: ResMut<VoxelWorld>,
    mut ledger: ResMut<DepositLedger>,
    registry: Res<FeatureRegistry>,
    blocks: Res<BlockRegistry>,
    config: Res<OreGenConfig>,
) {
    let pending = world.take_pending_generation();
    if pending.is_empty() {
        return;
    }

    let seed = world.seed;
    let generator = DepositGenerator::new(&registry, &blocks, &config, world.kind == WorldKind::Flat);
    let mut deposits = 0;

    for pos in &pending {
        let key = world.key(*pos);
        let report = generator.generate(&mut *world, &mut ledger, key, seed);
        if report.deposit.is_some() {
            deposits += 1;
        }
    }

    debug!("Generated {} chunks, {} new deposits", pending.len(), deposits);

    #[cfg(feature = "debug_chunks")]
    print_deposit_grid(&world, &ledger);
}

/// System to bring pre-existing chunks up to date
pub fn run_retroactive_pass(
    mut world: ResMut<VoxelWorld>,
    mut ledger: ResMut<DepositLedger>,
    registry: Res<FeatureRegistry>,
    blocks: Res<BlockRegistry>,
    config: Res<OreGenConfig>,
) {
    let pending = world.take_pending_retro();
    if pending.is_empty() || !config.retro_replace {
        return;
    }

    let seed = world.seed;
    let generator = DepositGenerator::new(&registry, &blocks, &config, world.kind == WorldKind::Flat);
    let mut regenned = 0;

    for pos in pending {
        let key = world.key(pos);
        if let RetroOutcome::Regenned(report) = run_retroactive(&generator, &mut *world, &mut ledger, key, seed) {
            regenned += 1;
            if config.advanced_debug {
                info!(
                    "Retro-generated chunk {}: removed {} vein blocks, deposit {:?}",
                    key, report.removed_vanilla, report.deposit
                );
            }
        }
    }

    if regenned > 0 {
        info!("Retroactively regenerated {} chunks", regenned);
    }
}

/// System to periodically save the ledger (autosave)
pub fn autosave_ledger(
    time: Res<Time>,
    mut timer: ResMut<LedgerAutosave>,
    config: Res<OreGenConfig>,
    mut ledger: ResMut<DepositLedger>,
) {
    if !timer.tick(time.delta()).just_finished() || !ledger.is_dirty() {
        return;
    }

    match ledger.save_file(&config.ledger_path) {
        Ok(()) => debug!("Autosaved deposit ledger to {}", config.ledger_path.display()),
        Err(e) => error!("Failed to autosave deposit ledger: {}", e),
    }
}

/// System to save the ledger when the app exits
pub fn save_ledger_on_exit(
    mut exit: MessageReader<AppExit>,
    config: Res<OreGenConfig>,
    mut ledger: ResMut<DepositLedger>,
) {
    if exit.read().next().is_none() {
        return;
    }

    match ledger.save_file(&config.ledger_path) {
        Ok(()) => info!(
            "Saved deposit ledger to {} ({} deposits)",
            config.ledger_path.display(),
            ledger.deposit_count()
        ),
        Err(e) => error!("Failed to save deposit ledger: {}", e),
    }
}

/// System to log world statistics for debugging
pub fn log_world_stats(world: Res<VoxelWorld>, ledger: Res<DepositLedger>) {
    debug!(
        "World stats: {} | Deposits: {}, Regenned: {}",
        world.stats(),
        ledger.deposit_count(),
        ledger.regenned_count()
    );
}

/// Print a map of which loaded chunks received a deposit
#[cfg(feature = "debug_chunks")]
fn print_deposit_grid(world: &VoxelWorld, ledger: &DepositLedger) {
    let Some(min_x) = world.chunks.keys().map(|pos| pos.x).min() else {
        return;
    };
    let max_x = world.chunks.keys().map(|pos| pos.x).max().unwrap_or(min_x);
    let min_z = world.chunks.keys().map(|pos| pos.z).min().unwrap_or(0);
    let max_z = world.chunks.keys().map(|pos| pos.z).max().unwrap_or(min_z);

    let mut grid = String::new();
    grid.push_str("\n╔════════════ Deposit Grid ════════════╗\n");

    grid.push_str("   ");
    for x in min_x..=max_x {
        grid.push_str(&format!("{:3}", x));
    }
    grid.push('\n');

    for z in min_z..=max_z {
        grid.push_str(&format!("{:3}", z));
        for x in min_x..=max_x {
            let pos = crate::blocks::ChunkPos::new(x, z);
            let key = world.key(pos);
            let symbol = if !world.is_loaded(&pos) {
                " · "
            } else if ledger.deposit_at(&key).is_some() {
                " ◆ "
            } else if ledger.has_regenned(&key) {
                " ○ "
            } else {
                " █ "
            };
            grid.push_str(symbol);
        }
        grid.push('\n');
    }

    grid.push_str("╚══════════════════════════════════════╝\n");
    grid.push_str("Legend: ◆ = Deposit  ○ = Regenned  █ = Loaded  · = Unloaded\n");
    grid.push_str(&format!(
        "Loaded: {} | Deposits: {}\n",
        world.chunks.len(),
        ledger.deposit_count()
    ));

    info!("{}", grid);
}
