//! AssetId - Identifier of a uniquely owned asset

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing asset ids
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetIdError {
    #[error("Invalid asset id: {0}")]
    Invalid(String),
}

/// Identifier of a non-fungible asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = AssetIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| AssetIdError::Invalid(s.to_string()))
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: AssetId = "7".parse().unwrap();
        assert_eq!(id, AssetId::new(7));
        assert_eq!(id.to_string(), "#7");
        assert_eq!("#7".parse::<AssetId>().unwrap(), id);
        assert!("seven".parse::<AssetId>().is_err());
    }
}
