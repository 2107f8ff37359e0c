//! Ore deposit generation for voxel worlds
//!
//! Each chunk receives at most one ore deposit, grown as a blob ("pluton")
//! from a registered generator, plus optional zone materials and surface
//! samples. Chosen deposits are recorded in a persistent ledger so other
//! systems can ask what a chunk holds.

pub mod blocks;
pub mod config;
pub mod ores;
pub mod plugin;
pub mod world;

pub use config::{ConfigError, OreGenConfig};
pub use ores::VeinAppExt;
pub use plugin::OreGenPlugin;
