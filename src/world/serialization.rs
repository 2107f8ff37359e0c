use crate::blocks::{ChunkKey, ZoneId};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Magic number for deposit ledger files ("VEIN" in ASCII)
const MAGIC_NUMBER: [u8; 4] = [b'V', b'E', b'I', b'N'];

/// Current ledger file format version
pub const VERSION: u16 = 2;

/// Version of the string-keyed format written by older releases
pub const LEGACY_VERSION: u16 = 1;

/// Upper bound on the payload size accepted when loading
const MAX_PAYLOAD_LEN: u32 = 64 * 1024 * 1024;

/// Error type for ledger serialization operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid magic number")]
    InvalidMagicNumber,
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u16),
    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(u32),
    #[error("Checksum mismatch")]
    InvalidChecksum,
    #[error("Decode error: {0}")]
    Decode(#[from] bincode::Error),
}

/// One recorded deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub x: i32,
    pub z: i32,
    pub zone: ZoneId,
    pub deposit: String,
}

impl DepositRecord {
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.x, self.z, self.zone)
    }
}

/// One chunk that went through the retroactive pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenRecord {
    pub x: i32,
    pub z: i32,
    pub zone: ZoneId,
}

impl RegenRecord {
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.x, self.z, self.zone)
    }
}

impl From<ChunkKey> for RegenRecord {
    fn from(key: ChunkKey) -> Self {
        Self {
            x: key.x,
            z: key.z,
            zone: key.zone,
        }
    }
}

/// Payload of a version 2 ledger file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecords {
    pub deposits: Vec<DepositRecord>,
    pub regenned: Vec<RegenRecord>,
}

/// Payload of a version 1 ledger file: maps keyed by `[x,z,zone]` strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyRecords {
    pub deposits: Vec<(String, String)>,
    pub regenned: Vec<(String, bool)>,
}

impl LegacyRecords {
    /// Convert to the current schema
    ///
    /// Entries whose key does not parse are dropped, as are regen flags
    /// stored as `false`.
    pub fn migrate(self) -> LedgerRecords {
        let mut records = LedgerRecords::default();

        for (key, deposit) in self.deposits {
            match key.parse::<ChunkKey>() {
                Ok(key) => records.deposits.push(DepositRecord {
                    x: key.x,
                    z: key.z,
                    zone: key.zone,
                    deposit,
                }),
                Err(e) => warn!("Skipping legacy deposit with key {:?}: {}", key, e),
            }
        }

        for (key, regenned) in self.regenned {
            if !regenned {
                continue;
            }
            match key.parse::<ChunkKey>() {
                Ok(key) => records.regenned.push(key.into()),
                Err(e) => warn!("Skipping legacy regen flag with key {:?}: {}", key, e),
            }
        }

        records
    }
}

/// Write a framed payload: magic, version, length, payload, CRC32
fn write_frame<W: Write>(writer: &mut W, version: u16, payload: &[u8]) -> Result<(), PersistenceError> {
    let len = u32::try_from(payload.len()).map_err(|_| PersistenceError::PayloadTooLarge(u32::MAX))?;

    writer.write_all(&MAGIC_NUMBER)?;
    writer.write_all(&version.to_le_bytes())?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(payload)?;

    let checksum = crc32fast::hash(payload);
    writer.write_all(&checksum.to_le_bytes())?;
    Ok(())
}

/// Save ledger records in the current format
pub fn write_ledger<W: Write>(writer: &mut W, records: &LedgerRecords) -> Result<(), PersistenceError> {
    let payload = bincode::serialize(records)?;
    write_frame(writer, VERSION, &payload)
}

/// Save ledger records in the legacy string-keyed format
pub fn write_legacy_ledger<W: Write>(writer: &mut W, records: &LegacyRecords) -> Result<(), PersistenceError> {
    let payload = bincode::serialize(records)?;
    write_frame(writer, LEGACY_VERSION, &payload)
}

/// Load ledger records, migrating legacy files to the current schema
pub fn read_ledger<R: Read>(reader: &mut R) -> Result<LedgerRecords, PersistenceError> {
    // Read and verify magic number
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC_NUMBER {
        return Err(PersistenceError::InvalidMagicNumber);
    }

    // Read and verify version
    let mut version_bytes = [0u8; 2];
    reader.read_exact(&mut version_bytes)?;
    let version = u16::from_le_bytes(version_bytes);
    if version != VERSION && version != LEGACY_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }

    // Read payload
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes);
    if len > MAX_PAYLOAD_LEN {
        return Err(PersistenceError::PayloadTooLarge(len));
    }
    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload)?;

    // Read and verify checksum
    let mut checksum_bytes = [0u8; 4];
    reader.read_exact(&mut checksum_bytes)?;
    let expected_checksum = u32::from_le_bytes(checksum_bytes);
    if crc32fast::hash(&payload) != expected_checksum {
        return Err(PersistenceError::InvalidChecksum);
    }

    if version == LEGACY_VERSION {
        let legacy: LegacyRecords = bincode::deserialize(&payload)?;
        info!(
            "Migrating legacy deposit ledger ({} deposits, {} regen flags)",
            legacy.deposits.len(),
            legacy.regenned.len()
        );
        return Ok(legacy.migrate());
    }

    Ok(bincode::deserialize(&payload)?)
}
