use crate::blocks::ZoneId;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: String },
}

/// Deposit generation settings, read once at startup
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OreGenConfig {
    /// Zones in which no deposit or zone material is generated
    pub excluded_zones: Vec<ZoneId>,

    /// Replace conflicting vanilla vein blocks with tuff
    pub remove_vanilla_ores: bool,

    /// Run the retroactive pass over chunks that predate the add-on
    pub retro_replace: bool,

    /// Log per-deposit distribution whenever a deposit is recorded
    pub debug_generation: bool,

    /// Log per-chunk placement and removal details
    pub advanced_debug: bool,

    /// Where the deposit ledger is persisted
    pub ledger_path: PathBuf,

    /// Seconds between ledger autosaves
    pub autosave_interval_secs: f32,

    /// Upper bound on surface samples dropped per chunk
    pub max_samples_per_chunk: u32,
}

impl Default for OreGenConfig {
    fn default() -> Self {
        Self {
            excluded_zones: vec![-1, 1],
            remove_vanilla_ores: true,
            retro_replace: false,
            debug_generation: false,
            advanced_debug: false,
            ledger_path: PathBuf::from("saves/world/veinseed/deposits.bin"),
            autosave_interval_secs: 30.0,
            max_samples_per_chunk: 10,
        }
    }
}

impl OreGenConfig {
    /// Parse a TOML document; missing keys take their default
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the plugin cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.autosave_interval_secs;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "autosave_interval_secs",
                value: interval.to_string(),
            });
        }
        Ok(())
    }

    /// Load a TOML file, falling back to defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(source) => Self::from_toml_str(&source),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = OreGenConfig::from_toml_str(
            r#"
            excluded_zones = [7]
            retro_replace = true
            "#,
        )
        .unwrap();

        assert_eq!(config.excluded_zones, vec![7]);
        assert!(config.retro_replace);
        assert!(config.remove_vanilla_ores);
        assert_eq!(config.max_samples_per_chunk, 10);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            OreGenConfig::from_toml_str("retro_replace = \"sometimes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_autosave_interval_must_be_positive() {
        for source in ["autosave_interval_secs = -1.0", "autosave_interval_secs = 0.0", "autosave_interval_secs = nan"] {
            assert!(matches!(
                OreGenConfig::from_toml_str(source),
                Err(ConfigError::Invalid {
                    field: "autosave_interval_secs",
                    ..
                })
            ));
        }
        assert_eq!(
            OreGenConfig::from_toml_str("autosave_interval_secs = 5.5")
                .unwrap()
                .autosave_interval_secs,
            5.5
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = env::temp_dir().join("veinseed_missing_config.toml");
        let _ = fs::remove_file(&path);
        assert_eq!(OreGenConfig::load(&path).unwrap(), OreGenConfig::default());
    }

    #[test]
    fn test_load_file() {
        let path = env::temp_dir().join("veinseed_test_config.toml");
        fs::write(&path, "debug_generation = true\nledger_path = \"/tmp/ledger.bin\"\n").unwrap();

        let config = OreGenConfig::load(&path).unwrap();
        assert!(config.debug_generation);
        assert_eq!(config.ledger_path, PathBuf::from("/tmp/ledger.bin"));

        // Cleanup
        let _ = fs::remove_file(path);
    }
}
