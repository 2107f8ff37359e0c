use bevy::log::LogPlugin;
use bevy::prelude::*;

use veinseed::blocks::{ChunkPos, DEMO_CHUNK_RADIUS, DEMO_LEGACY_RADIUS, STONE};
use veinseed::ores::{DepositLedger, GeneratorDescriptor};
use veinseed::world::{generate_chunk, loader, VoxelWorld, WorldKind};
use veinseed::{OreGenConfig, OreGenPlugin, VeinAppExt};

const CONFIG_PATH: &str = "veinseed.toml";
const WORLD_SEED: u64 = 0x5eed_0f_0e5;

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    let config = match OreGenConfig::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}, using defaults", CONFIG_PATH, e);
            OreGenConfig::default()
        }
    };

    app.insert_resource(VoxelWorld::new(0, WorldKind::Normal, WORLD_SEED))
        .add_plugins(OreGenPlugin::new(config))
        .add_systems(Startup, spawn_demo_chunks)
        .add_systems(
            Update,
            exit_when_generated.after(loader::run_retroactive_pass),
        );

    if let Err(e) = register_demo_deposits(&mut app) {
        error!("Failed to register demo deposits: {}", e);
        return AppExit::error();
    }

    app.run()
}

fn register_demo_deposits(app: &mut App) -> Result<(), veinseed::ores::ValidationError> {
    let hematite = app.register_block("demo:hematite_ore");
    let hematite_sample = app.register_block("demo:hematite_sample");
    let malachite = app.register_block("demo:malachite_ore");
    let malachite_sample = app.register_block("demo:malachite_sample");
    let galena = app.register_block("demo:galena_ore");
    let galena_sample = app.register_block("demo:galena_sample");
    let marble = app.register_block("demo:marble");
    let limestone = app.register_block("demo:limestone");

    app.register_vein_generator(hematite, hematite_sample, 48, -32, 56, 60, &[])?;
    app.register_vein_generator(malachite, malachite_sample, 32, 0, 60, 45, &[])?;
    // Galena only cuts through limestone
    app.register_vein_generator_with(
        GeneratorDescriptor::ore(galena, galena_sample, 24, 8, 48, 30).with_replaceable([limestone, STONE]),
    )?;
    app.register_zone_material(marble, -48, 40, 25)?;
    app.register_zone_material(limestone, 16, 60, 35)?;
    Ok(())
}

/// Spawn chunks that predate the deposits, then a ring of fresh ones
fn spawn_demo_chunks(mut world: ResMut<VoxelWorld>) {
    let (kind, seed) = (world.kind, world.seed);
    for pos in ChunkPos::new(0, 0).chunks_in_radius(DEMO_LEGACY_RADIUS) {
        world.insert_existing(generate_chunk(pos, kind, seed));
    }

    let mut fresh = 0;
    for pos in ChunkPos::new(0, 0).chunks_in_radius(DEMO_CHUNK_RADIUS) {
        if world.generate_chunk(pos) {
            fresh += 1;
        }
    }
    info!("Spawned {} fresh chunks around the origin", fresh);
}

fn exit_when_generated(world: Res<VoxelWorld>, ledger: Res<DepositLedger>, mut exit: MessageWriter<AppExit>) {
    if world.has_pending_work() {
        return;
    }

    let snapshot = ledger.snapshot();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for deposit in snapshot.deposits.values() {
        match counts.iter_mut().find(|(name, _)| *name == deposit.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((deposit.as_str(), 1)),
        }
    }
    counts.sort_unstable();

    info!("World stats: {}", world.stats());
    for (deposit, count) in counts {
        info!("{}: {} chunks", deposit, count);
    }
    exit.write(AppExit::Success);
}
