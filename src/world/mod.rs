pub mod access;
pub mod generator;
pub mod loader;
pub mod manager;
pub mod serialization;

// Re-export commonly used items
pub use access::BlockAccess;
pub use generator::{generate_chunk, WorldKind};
pub use loader::LedgerAutosave;
pub use manager::{VoxelWorld, WorldStats};
