//! # trx-primitives
//!
//! Primitive value types for the trx TRON client SDK.
//!
//! This crate provides the fundamental data types shared by every layer:
//! the dual-form [`Address`], the [`H256`] hash, and amount-unit helpers.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;
mod units;

pub use address::{
    Address, AddressError, ADDRESS_BASE58_LEN, ADDRESS_BASE58_PREFIX, ADDRESS_LEN,
    ADDRESS_PREFIX, EVM_ADDRESS_LEN,
};
pub use hash::{H256, Hash, HashError};
pub use units::{parse_units, to_sun, UnitsError, SUN_PER_TRX, TRX_DECIMALS};

/// Block height type
pub type BlockHeight = i64;

/// On-chain amount in SUN (integer minor units)
pub type Sun = i64;
