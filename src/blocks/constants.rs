use super::types::BlockId;

/// Size of each chunk in blocks along X and Z
pub const CHUNK_SIZE: usize = 16;

/// Size of each chunk as i32 for coordinate calculations
pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;

/// Lowest buildable Y level (inclusive)
pub const WORLD_MIN_Y: i32 = -64;

/// Highest buildable Y level (exclusive)
pub const WORLD_MAX_Y: i32 = 320;

/// Number of block layers in a chunk column
pub const WORLD_HEIGHT: usize = (WORLD_MAX_Y - WORLD_MIN_Y) as usize; // 384 layers

/// Total number of blocks in a chunk
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * WORLD_HEIGHT; // 98,304 blocks

// Base terrain layout
/// Y of the grass layer in normal worlds
pub const SURFACE_Y: i32 = 63;

/// Number of dirt layers under the grass
pub const DIRT_DEPTH: i32 = 3;

/// Deepslate replaces stone below this Y
pub const DEEPSLATE_TOP_Y: i32 = 0;

/// Y of the grass layer in flat worlds
pub const FLAT_SURFACE_Y: i32 = WORLD_MIN_Y + 3;

// Built-in block constants
/// Air
pub const AIR: BlockId = 0;

pub const STONE: BlockId = 1;
pub const DEEPSLATE: BlockId = 2;
pub const GRANITE: BlockId = 3;
pub const DIORITE: BlockId = 4;
pub const ANDESITE: BlockId = 5;
pub const TUFF: BlockId = 6;
pub const DIRT: BlockId = 7;
pub const GRASS: BlockId = 8;
pub const BEDROCK: BlockId = 9;

// Vanilla ore blocks placed by the base terrain
pub const COAL_ORE: BlockId = 10;
pub const IRON_ORE: BlockId = 11;
pub const COPPER_ORE: BlockId = 12;
pub const DEEPSLATE_IRON_ORE: BlockId = 13;
pub const RAW_IRON_BLOCK: BlockId = 14;
pub const RAW_COPPER_BLOCK: BlockId = 15;

/// First ID handed out to blocks registered at runtime
pub const FIRST_CUSTOM_BLOCK: BlockId = 64;

/// Names of the built-in blocks, indexed by block ID
pub const BUILTIN_BLOCKS: [(BlockId, &str); 16] = [
    (AIR, "core:air"),
    (STONE, "core:stone"),
    (DEEPSLATE, "core:deepslate"),
    (GRANITE, "core:granite"),
    (DIORITE, "core:diorite"),
    (ANDESITE, "core:andesite"),
    (TUFF, "core:tuff"),
    (DIRT, "core:dirt"),
    (GRASS, "core:grass"),
    (BEDROCK, "core:bedrock"),
    (COAL_ORE, "core:coal_ore"),
    (IRON_ORE, "core:iron_ore"),
    (COPPER_ORE, "core:copper_ore"),
    (DEEPSLATE_IRON_ORE, "core:deepslate_iron_ore"),
    (RAW_IRON_BLOCK, "core:raw_iron_block"),
    (RAW_COPPER_BLOCK, "core:raw_copper_block"),
];

/// Blocks a pluton may replace when its descriptor names no replaceable set
pub const STONE_LIKE_BLOCKS: [BlockId; 6] = [STONE, DEEPSLATE, GRANITE, DIORITE, ANDESITE, TUFF];

/// Vanilla vein blocks that conflict with registered deposits
pub const CONFLICTING_VEIN_BLOCKS: [BlockId; 4] =
    [RAW_IRON_BLOCK, RAW_COPPER_BLOCK, DEEPSLATE_IRON_ORE, COPPER_ORE];

/// Check if a block belongs to the built-in stone family
pub fn is_stone_like(block: BlockId) -> bool {
    STONE_LIKE_BLOCKS.contains(&block)
}

// Chunk loading radius used by the demo world
/// Radius of chunks generated around the origin (9x9 = 81 chunks)
pub const DEMO_CHUNK_RADIUS: i32 = 4;

/// Radius of chunks treated as pre-existing (generated before the add-on)
pub const DEMO_LEGACY_RADIUS: i32 = 1;
