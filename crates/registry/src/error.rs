//! Registry errors

use custodian_core::{Address, AssetId};
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(AssetId),

    #[error("Asset already minted: {0}")]
    AlreadyMinted(AssetId),

    #[error("Null address cannot hold assets")]
    NullRecipient,

    #[error("Asset {asset} is owned by {actual}, not {expected}")]
    IncorrectOwner {
        asset: AssetId,
        expected: Address,
        actual: Address,
    },

    #[error("Account {0} cannot be its own operator")]
    SelfOperator(Address),
}
