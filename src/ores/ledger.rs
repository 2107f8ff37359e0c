use crate::blocks::ChunkKey;
use crate::world::serialization::{self, DepositRecord, LedgerRecords, PersistenceError, RegenRecord};
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Where each chunk's deposit went and which chunks were retroactively reprocessed
///
/// A chunk moves from ungenerated, to generated (deposit recorded), to
/// regenned (flag set by the retroactive pass). Entries are only ever added
/// or overwritten.
#[derive(Resource, Debug, Default)]
pub struct DepositLedger {
    deposits: HashMap<ChunkKey, String>,
    regenned: HashSet<ChunkKey>,
    dirty: bool,
}

/// Owned copy of both ledger maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub deposits: HashMap<ChunkKey, String>,
    pub regenned: HashSet<ChunkKey>,
}

impl DepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the deposit placed in a chunk; the last write wins
    pub fn record_deposit(&mut self, key: ChunkKey, deposit: impl Into<String>) -> Option<String> {
        self.dirty = true;
        self.deposits.insert(key, deposit.into())
    }

    pub fn deposit_at(&self, key: &ChunkKey) -> Option<&str> {
        self.deposits.get(key).map(String::as_str)
    }

    /// Mark a chunk as retroactively reprocessed
    pub fn mark_regenned(&mut self, key: ChunkKey) {
        if self.regenned.insert(key) {
            self.dirty = true;
        }
    }

    pub fn has_regenned(&self, key: &ChunkKey) -> bool {
        self.regenned.contains(key)
    }

    pub fn deposit_count(&self) -> usize {
        self.deposits.len()
    }

    pub fn regenned_count(&self) -> usize {
        self.regenned.len()
    }

    /// Chunks carrying `deposit` and the total number of recorded chunks
    pub fn deposit_share(&self, deposit: &str) -> (usize, usize) {
        let matching = self.deposits.values().filter(|d| d.as_str() == deposit).count();
        (matching, self.deposits.len())
    }

    /// Copy both maps for iteration while generation keeps mutating the ledger
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            deposits: self.deposits.clone(),
            regenned: self.regenned.clone(),
        }
    }

    /// Check if entries changed since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn to_records(&self) -> LedgerRecords {
        let mut deposits: Vec<DepositRecord> = self
            .deposits
            .iter()
            .map(|(key, deposit)| DepositRecord {
                x: key.x,
                z: key.z,
                zone: key.zone,
                deposit: deposit.clone(),
            })
            .collect();
        deposits.sort_by_key(DepositRecord::key);

        let mut regenned: Vec<RegenRecord> = self.regenned.iter().copied().map(RegenRecord::from).collect();
        regenned.sort_by_key(RegenRecord::key);

        LedgerRecords { deposits, regenned }
    }

    fn from_records(records: LedgerRecords) -> Self {
        Self {
            deposits: records
                .deposits
                .into_iter()
                .map(|record| (record.key(), record.deposit))
                .collect(),
            regenned: records.regenned.iter().map(RegenRecord::key).collect(),
            dirty: false,
        }
    }

    /// Write both maps in the current ledger format
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), PersistenceError> {
        serialization::write_ledger(writer, &self.to_records())
    }

    /// Read a ledger written by `save_to` or by an older release
    pub fn load_from<R: Read>(reader: &mut R) -> Result<Self, PersistenceError> {
        serialization::read_ledger(reader).map(Self::from_records)
    }

    /// Save the ledger to a file, creating parent directories
    ///
    /// The ledger is written to a `.tmp` sibling first and renamed over the
    /// target, so an interrupted save leaves the previous file intact.
    pub fn save_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = temp_path(path);
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        self.save_to(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        fs::rename(&tmp_path, path)?;

        self.dirty = false;
        Ok(())
    }

    /// Load the ledger from a file
    ///
    /// A missing file is a fresh world. Any other failure is logged and the
    /// ledger starts empty; a damaged ledger never blocks world loading.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No deposit ledger at {}, starting empty", path.display());
                return Self::new();
            }
            Err(e) => {
                warn!("Failed to open deposit ledger {}: {}, starting empty", path.display(), e);
                return Self::new();
            }
        };

        match Self::load_from(&mut BufReader::new(file)) {
            Ok(ledger) => {
                info!(
                    "Loaded deposit ledger {} ({} deposits, {} regenned chunks)",
                    path.display(),
                    ledger.deposit_count(),
                    ledger.regenned_count()
                );
                ledger
            }
            Err(e) => {
                warn!("Failed to load deposit ledger {}: {}, starting empty", path.display(), e);
                Self::new()
            }
        }
    }
}

/// `deposits.bin` -> `deposits.bin.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
