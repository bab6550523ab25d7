//! Custodian Registry - Asset ownership ledger
//!
//! The validation layer never stores ownership itself. It consumes a small
//! ledger contract and defers every real mutation to it.
//!
//! # Key Types
//! - `AssetLedger`: The operations the validation layer consumes
//! - `AssetRegistry`: In-memory reference ledger (mint, burn, enumeration)
//! - `RegistryError`: Failures reported by the ledger

pub mod error;
pub mod ledger;
pub mod registry;

pub use error::RegistryError;
pub use ledger::AssetLedger;
pub use registry::AssetRegistry;
