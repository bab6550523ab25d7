//! Ledger contract consumed by the validation layer

use crate::error::RegistryError;
use custodian_core::{Address, AssetId};

/// Asset ownership ledger
///
/// The `raw_*` operations perform the mutation without any caller
/// authorization; gating them is the job of whoever holds the ledger.
pub trait AssetLedger {
    /// Current owner of `asset`. Fails if the asset does not exist.
    fn owner_of(&self, asset: AssetId) -> Result<Address, RegistryError>;

    /// Account currently approved for `asset`, if any.
    fn get_approved(&self, asset: AssetId) -> Result<Option<Address>, RegistryError>;

    /// Whether `operator` holds blanket permission over `owner`'s assets.
    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool;

    /// Move `asset` from `from` to `to`.
    fn raw_transfer(&mut self, from: Address, to: Address, asset: AssetId)
        -> Result<(), RegistryError>;

    /// Grant `grantee` permission over a single asset.
    fn raw_approve(&mut self, grantee: Address, asset: AssetId) -> Result<(), RegistryError>;

    /// Set or clear `operator`'s blanket permission over `owner`'s assets.
    fn raw_approve_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        grant: bool,
    ) -> Result<(), RegistryError>;

    /// Owner, single-asset grantee, or blanket operator of the owner.
    fn is_approved_or_owner(&self, spender: &Address, asset: AssetId) -> Result<bool, RegistryError> {
        let owner = self.owner_of(asset)?;
        if owner == *spender {
            return Ok(true);
        }
        if self.get_approved(asset)?.as_ref() == Some(spender) {
            return Ok(true);
        }
        Ok(self.is_approved_for_all(&owner, spender))
    }
}
