pub mod api;
pub mod descriptor;
pub mod generation;
pub mod ledger;
pub mod pluton;
pub mod registry;
pub mod remove_veins;
pub mod retro;
pub mod samples;
pub mod selector;

// Re-export commonly used items
pub use api::VeinAppExt;
pub use descriptor::{DepositKind, GeneratorDescriptor, ValidationError};
pub use generation::{ChunkReport, DepositGenerator};
pub use ledger::{DepositLedger, LedgerSnapshot};
pub use pluton::{PlacementResult, VeinPlacer};
pub use registry::{FeatureRegistry, GeneratorHandle};
pub use retro::{run_retroactive, RetroOutcome};
pub use selector::{chunk_seed, ChunkSelector, Selection};
