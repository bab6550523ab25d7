//! In-memory reference ledger

use crate::error::RegistryError;
use crate::ledger::AssetLedger;
use custodian_core::{Address, AssetId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory asset ownership ledger
///
/// Ownership is kept in a `BTreeMap` so enumeration is ordered by asset id.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    owners: BTreeMap<AssetId, Address>,
    approvals: HashMap<AssetId, Address>,
    operators: HashSet<(Address, Address)>,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new asset owned by `to`
    pub fn mint(&mut self, to: Address, asset: AssetId) -> Result<(), RegistryError> {
        if to.is_null() {
            return Err(RegistryError::NullRecipient);
        }
        if self.owners.contains_key(&asset) {
            return Err(RegistryError::AlreadyMinted(asset));
        }
        self.owners.insert(asset, to);
        Ok(())
    }

    /// Destroy an asset, clearing its single-asset approval
    pub fn burn(&mut self, asset: AssetId) -> Result<Address, RegistryError> {
        let owner = self
            .owners
            .remove(&asset)
            .ok_or(RegistryError::UnknownAsset(asset))?;
        self.approvals.remove(&asset);
        Ok(owner)
    }

    /// Whether the asset exists
    pub fn exists(&self, asset: AssetId) -> bool {
        self.owners.contains_key(&asset)
    }

    /// Number of assets held by `owner`
    pub fn balance_of(&self, owner: &Address) -> usize {
        self.owners.values().filter(|o| *o == owner).count()
    }

    /// Assets held by `owner`, ordered by id
    pub fn assets_of(&self, owner: &Address) -> Vec<AssetId> {
        self.owners
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(asset, _)| *asset)
            .collect()
    }

    /// Total number of existing assets
    pub fn total_supply(&self) -> usize {
        self.owners.len()
    }
}

impl AssetLedger for AssetRegistry {
    fn owner_of(&self, asset: AssetId) -> Result<Address, RegistryError> {
        self.owners
            .get(&asset)
            .copied()
            .ok_or(RegistryError::UnknownAsset(asset))
    }

    fn get_approved(&self, asset: AssetId) -> Result<Option<Address>, RegistryError> {
        if !self.exists(asset) {
            return Err(RegistryError::UnknownAsset(asset));
        }
        Ok(self.approvals.get(&asset).copied())
    }

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    fn raw_transfer(
        &mut self,
        from: Address,
        to: Address,
        asset: AssetId,
    ) -> Result<(), RegistryError> {
        let owner = self.owner_of(asset)?;
        if owner != from {
            return Err(RegistryError::IncorrectOwner {
                asset,
                expected: from,
                actual: owner,
            });
        }
        if to.is_null() {
            return Err(RegistryError::NullRecipient);
        }

        // A single-asset approval never survives a change of owner
        self.approvals.remove(&asset);
        self.owners.insert(asset, to);
        Ok(())
    }

    fn raw_approve(&mut self, grantee: Address, asset: AssetId) -> Result<(), RegistryError> {
        if !self.exists(asset) {
            return Err(RegistryError::UnknownAsset(asset));
        }
        if grantee.is_null() {
            self.approvals.remove(&asset);
        } else {
            self.approvals.insert(asset, grantee);
        }
        Ok(())
    }

    fn raw_approve_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        grant: bool,
    ) -> Result<(), RegistryError> {
        if owner == operator {
            return Err(RegistryError::SelfOperator(owner));
        }
        if grant {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
        Ok(())
    }
}
