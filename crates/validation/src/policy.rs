//! Validator authority
//!
//! Who may confirm requests is decided outside the engine. The engine only
//! asks the installed policy before every confirmation.

use custodian_core::Address;
use std::collections::BTreeSet;

/// Decides whether a caller may confirm pending requests
pub trait ValidatorPolicy: Send + Sync {
    /// Policy name (for logging)
    fn name(&self) -> &str;

    fn is_authorized_validator(&self, caller: &Address) -> bool;
}

/// Fixed set of validator addresses
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    validators: BTreeSet<Address>,
}

impl AllowList {
    pub fn new(validators: impl IntoIterator<Item = Address>) -> Self {
        Self {
            validators: validators.into_iter().collect(),
        }
    }

    /// Add a validator (returns false if already present)
    pub fn add(&mut self, validator: Address) -> bool {
        self.validators.insert(validator)
    }

    /// Remove a validator (returns false if absent)
    pub fn remove(&mut self, validator: &Address) -> bool {
        self.validators.remove(validator)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl ValidatorPolicy for AllowList {
    fn name(&self) -> &str {
        "AllowList"
    }

    fn is_authorized_validator(&self, caller: &Address) -> bool {
        self.validators.contains(caller)
    }
}

/// Accepts every caller. Used for journal replay and open deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ValidatorPolicy for AllowAll {
    fn name(&self) -> &str {
        "AllowAll"
    }

    fn is_authorized_validator(&self, _caller: &Address) -> bool {
        true
    }
}
