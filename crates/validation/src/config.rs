//! Validation configuration
//!
//! Loaded from a JSON file when present, then overridden from the
//! environment. Every field has a default so partial files are accepted.

use crate::policy::{AllowAll, AllowList, ValidatorPolicy};
use custodian_core::{Address, AddressError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable holding a comma separated validator list
pub const VALIDATORS_ENV: &str = "CUSTODIAN_VALIDATORS";

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid validator address '{value}': {source}")]
    InvalidValidator {
        value: String,
        #[source]
        source: AddressError,
    },
}

/// Configuration for the validation engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Addresses allowed to confirm requests
    #[serde(default)]
    pub validators: Vec<Address>,

    /// Let any caller confirm requests (disables the validator check)
    #[serde(default)]
    pub open_validation: bool,
}

impl ValidationConfig {
    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load from `path` if it exists, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        if let Ok(raw) = std::env::var(VALIDATORS_ENV) {
            config.validators = parse_validator_list(&raw)?;
        }

        Ok(config)
    }

    /// Build the validator policy described by this config
    pub fn policy(&self) -> Box<dyn ValidatorPolicy> {
        if self.open_validation {
            Box::new(AllowAll)
        } else {
            Box::new(AllowList::new(self.validators.iter().copied()))
        }
    }
}

/// Parse `"0x..,0x.."` into addresses, ignoring blank items
pub fn parse_validator_list(raw: &str) -> Result<Vec<Address>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|source| ConfigError::InvalidValidator {
                value: item.to_string(),
                source,
            })
        })
        .collect()
}
