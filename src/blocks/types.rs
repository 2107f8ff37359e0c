use bevy::math::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::constants::CHUNK_SIZE_I32;

/// Type alias for block IDs (u16 allows 0-65,535 unique blocks)
pub type BlockId = u16;

/// Identifier of an isolated generation context (a dimension)
pub type ZoneId = i32;

/// Chunk position in chunk coordinates (not block coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert from block position to the chunk containing it
    pub fn from_block(block_pos: IVec3) -> Self {
        Self {
            x: block_pos.x.div_euclid(CHUNK_SIZE_I32),
            z: block_pos.z.div_euclid(CHUNK_SIZE_I32),
        }
    }

    /// Smallest block X inside this chunk
    pub const fn min_block_x(&self) -> i32 {
        self.x * CHUNK_SIZE_I32
    }

    /// Smallest block Z inside this chunk
    pub const fn min_block_z(&self) -> i32 {
        self.z * CHUNK_SIZE_I32
    }

    /// Block position of the chunk's corner at the given height
    pub fn origin(&self, y: i32) -> IVec3 {
        IVec3::new(self.min_block_x(), y, self.min_block_z())
    }

    /// Get all chunks in a square radius around this chunk
    pub fn chunks_in_radius(&self, radius: i32) -> Vec<ChunkPos> {
        let mut chunks = Vec::with_capacity(((radius * 2 + 1) * (radius * 2 + 1)) as usize);
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                chunks.push(ChunkPos::new(self.x + dx, self.z + dz));
            }
        }
        chunks
    }
}

/// Key of a chunk inside a specific zone, used by the deposit ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
    pub zone: ZoneId,
}

impl ChunkKey {
    pub const fn new(x: i32, z: i32, zone: ZoneId) -> Self {
        Self { x, z, zone }
    }

    pub const fn from_pos(pos: ChunkPos, zone: ZoneId) -> Self {
        Self::new(pos.x, pos.z, zone)
    }

    pub const fn pos(&self) -> ChunkPos {
        ChunkPos::new(self.x, self.z)
    }
}

/// Formats as `[x,z,zone]`, the form persisted by older ledger files
impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.x, self.z, self.zone)
    }
}

/// Error returned when a `[x,z,zone]` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseChunkKeyError {
    #[error("expected 3 comma separated fields, found {0}")]
    FieldCount(usize),
    #[error("invalid coordinate {0:?}")]
    InvalidNumber(String),
}

impl FromStr for ChunkKey {
    type Err = ParseChunkKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.replace(['[', ']'], "");
        let parts: Vec<&str> = stripped.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseChunkKeyError::FieldCount(parts.len()));
        }

        let mut fields = [0i32; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            *field = part
                .parse()
                .map_err(|_| ParseChunkKeyError::InvalidNumber((*part).to_string()))?;
        }

        Ok(Self::new(fields[0], fields[1], fields[2]))
    }
}
