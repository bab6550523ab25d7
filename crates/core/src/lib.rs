//! Custodian Core - Domain types
//!
//! This crate contains the identifiers shared across Custodian:
//! - `Address`: 20-byte account identifier, with a reserved null value
//! - `AssetId`: Identifier of a uniquely owned asset

pub mod address;
pub mod asset;

pub use address::{Address, AddressError};
pub use asset::{AssetId, AssetIdError};
