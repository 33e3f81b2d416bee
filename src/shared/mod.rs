//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// One day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for asset identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── Range ───────────────────────────────────────────────────────────────────

/// A named history window.
///
/// Variant order is the catalog order (finest to `max`) and `Ord` follows it,
/// so a `BTreeSet<Range>` iterates in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Range {
    #[serde(rename = "24h")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "1m")]
    Month1,
    #[serde(rename = "3m")]
    Month3,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "2y")]
    Year2,
    #[serde(rename = "5y")]
    Year5,
    #[serde(rename = "max")]
    Max,
}

impl Range {
    /// The full catalog, in order.
    pub const ALL: [Range; 8] = [
        Range::Day1,
        Range::Day7,
        Range::Month1,
        Range::Month3,
        Range::Year1,
        Range::Year2,
        Range::Year5,
        Range::Max,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Day1 => "24h",
            Self::Day7 => "7d",
            Self::Month1 => "1m",
            Self::Month3 => "3m",
            Self::Year1 => "1y",
            Self::Year2 => "2y",
            Self::Year5 => "5y",
            Self::Max => "max",
        }
    }

    /// Nominal window length in milliseconds. `None` for `max` (unbounded).
    pub fn nominal_duration_ms(&self) -> Option<i64> {
        let days = match self {
            Self::Day1 => 1,
            Self::Day7 => 7,
            Self::Month1 => 30,
            Self::Month3 => 90,
            Self::Year1 => 365,
            Self::Year2 => 730,
            Self::Year5 => 1825,
            Self::Max => return None,
        };
        Some(days * DAY_MS)
    }

    /// Position in the catalog.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a catalog entry by its key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.iter().copied().find(|r| r.key() == key)
    }

    /// Like [`Range::from_key`], but a blank key means `max`.
    pub fn normalize(key: &str) -> Option<Self> {
        if key.trim().is_empty() {
            return Some(Self::Max);
        }
        Self::from_key(key)
    }

    pub fn is_max(&self) -> bool {
        matches!(self, Self::Max)
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Range {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("Unknown range: {}", s))
    }
}
