//! Record identity based on ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Display prefix for risk identifiers
const PREFIX: &str = "RISK";

/// A stable identifier for a risk record.
///
/// Assigned once at creation and preserved across edits, so a selected
/// table row always resolves to the same record regardless of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiskId(Ulid);

impl RiskId {
    /// Create a new unique RiskId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse a RiskId from its string form
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", PREFIX, self.0)
    }
}

impl FromStr for RiskId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if prefix != PREFIX {
            return Err(IdParseError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for RiskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RiskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing risk IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid identifier prefix: '{0}' (expected RISK)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in risk ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
