//! Recipe identifiers.
//!
//! 12 bytes rendered as 24 lowercase hex characters:
//! 4 bytes of big-endian unix seconds, 5 random bytes chosen once per process,
//! and a 3 byte big-endian counter seeded randomly.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

const ID_BYTES: usize = 12;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId([u8; ID_BYTES]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid recipe id (expected 24 hex characters)")]
pub struct InvalidRecipeId(pub String);

impl RecipeId {
    /// Generates a fresh identifier. Used by the document stores on insert.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0u8; ID_BYTES];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    pub fn parse(s: &str) -> Result<Self, InvalidRecipeId> {
        if s.len() != ID_BYTES * 2 {
            return Err(InvalidRecipeId(s.to_string()));
        }
        let decoded = hex::decode(s).map_err(|_| InvalidRecipeId(s.to_string()))?;
        let mut bytes = [0u8; ID_BYTES];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Creation time embedded in the identifier.
    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        let mut secs = [0u8; 4];
        secs.copy_from_slice(&self.0[0..4]);
        chrono::DateTime::from_timestamp(u32::from_be_bytes(secs) as i64, 0).unwrap_or_default()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RecipeId {
    type Err = InvalidRecipeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecipeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecipeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
