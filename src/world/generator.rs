use crate::blocks::*;

/// Shape of the base terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldKind {
    /// Layered stone/deepslate terrain with scattered vanilla ores
    #[default]
    Normal,
    /// Superflat: bedrock, dirt and grass only
    Flat,
}

/// One in this many underground blocks becomes a vanilla ore
const VANILLA_ORE_RARITY: u64 = 97;

/// Generate the base terrain for the chunk at the given position
pub fn generate_chunk(position: ChunkPos, kind: WorldKind, seed: u64) -> ChunkData {
    match kind {
        WorldKind::Normal => generate_normal(position, seed),
        WorldKind::Flat => generate_flat(position),
    }
}

fn generate_flat(position: ChunkPos) -> ChunkData {
    let mut chunk = ChunkData::empty(position);
    chunk.fill_layer(WORLD_MIN_Y, BEDROCK);
    for y in WORLD_MIN_Y + 1..FLAT_SURFACE_Y {
        chunk.fill_layer(y, DIRT);
    }
    chunk.fill_layer(FLAT_SURFACE_Y, GRASS);
    chunk
}

fn generate_normal(position: ChunkPos, seed: u64) -> ChunkData {
    let mut chunk = ChunkData::empty(position);

    chunk.fill_layer(WORLD_MIN_Y, BEDROCK);
    for y in WORLD_MIN_Y + 1..DEEPSLATE_TOP_Y {
        chunk.fill_layer(y, DEEPSLATE);
    }
    for y in DEEPSLATE_TOP_Y..SURFACE_Y - DIRT_DEPTH {
        chunk.fill_layer(y, STONE);
    }
    for y in SURFACE_Y - DIRT_DEPTH..SURFACE_Y {
        chunk.fill_layer(y, DIRT);
    }
    chunk.fill_layer(SURFACE_Y, GRASS);

    // Scatter vanilla ores through the stone layers
    for y in WORLD_MIN_Y + 1..SURFACE_Y - DIRT_DEPTH {
        for local_z in 0..CHUNK_SIZE {
            for local_x in 0..CHUNK_SIZE {
                let world_x = position.min_block_x() + local_x as i32;
                let world_z = position.min_block_z() + local_z as i32;
                if position_hash(seed, world_x, y, world_z) % VANILLA_ORE_RARITY != 0 {
                    continue;
                }
                let ore = if y < DEEPSLATE_TOP_Y {
                    DEEPSLATE_IRON_ORE
                } else {
                    COPPER_ORE
                };
                chunk.set_block(local_x, y, local_z, ore);
            }
        }
    }

    chunk
}

/// Deterministic per-position hash (splitmix64 finalizer)
fn position_hash(seed: u64, x: i32, y: i32, z: i32) -> u64 {
    let mut h = seed
        ^ (x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as i64 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
        ^ (z as i64 as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}
