pub mod chunk;
pub mod constants;
pub mod registry;
pub mod types;

// Re-export commonly used items
pub use chunk::ChunkData;
pub use constants::*;
pub use registry::BlockRegistry;
pub use types::{BlockId, ChunkKey, ChunkPos, ParseChunkKeyError, ZoneId};
