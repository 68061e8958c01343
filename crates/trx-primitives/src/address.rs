//! TRON account address (21-byte native form, base58check text form)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Network prefix byte of every native address
pub const ADDRESS_PREFIX: u8 = 0x41;
/// First character of every base58check address
pub const ADDRESS_BASE58_PREFIX: char = 'T';
/// Length of the native form in bytes
pub const ADDRESS_LEN: usize = 21;
/// Length of the EVM form in bytes
pub const EVM_ADDRESS_LEN: usize = 20;
/// Length of the base58check text form
pub const ADDRESS_BASE58_LEN: usize = 34;

/// Address parsing error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Input has a length no constructor accepts
    #[error("invalid address length: {0}")]
    InvalidLength(usize),
    /// Native form does not start with 0x41 / text form does not start with 'T'
    #[error("invalid address prefix")]
    InvalidPrefix,
    /// Input is not valid hex / base58
    #[error("invalid address encoding: {0}")]
    InvalidEncoding(String),
    /// base58check checksum mismatch
    #[error("invalid address checksum")]
    InvalidChecksum,
}

/// TRON account address.
///
/// Holds the 21-byte native form (leading byte fixed to `0x41`) together
/// with its base58check string, both computed once at construction. The
/// last 20 bytes are the EVM form of the same account.
///
/// Equality, ordering and hashing are over the 21-byte form only.
#[derive(Clone)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
    base58: String,
}

impl Address {
    fn from_array(bytes: [u8; ADDRESS_LEN]) -> Self {
        let base58 = bs58::encode(bytes).with_check().into_string();
        Address { bytes, base58 }
    }

    /// Parse a 34-character base58check address starting with `T`.
    pub fn from_base58(s: &str) -> Result<Self, AddressError> {
        if s.len() != ADDRESS_BASE58_LEN {
            return Err(AddressError::InvalidLength(s.len()));
        }
        if !s.starts_with(ADDRESS_BASE58_PREFIX) {
            return Err(AddressError::InvalidPrefix);
        }
        let data = bs58::decode(s)
            .with_check(Some(ADDRESS_PREFIX))
            .into_vec()
            .map_err(|e| match e {
                bs58::decode::Error::InvalidChecksum { .. } => AddressError::InvalidChecksum,
                bs58::decode::Error::InvalidVersion { .. } => AddressError::InvalidPrefix,
                other => AddressError::InvalidEncoding(other.to_string()),
            })?;
        if data.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength(data.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&data);
        Ok(Self::from_array(bytes))
    }

    /// Parse a hex address, case-insensitive, `0x` prefix optional.
    ///
    /// 40 hex chars are promoted to the native form by prepending `0x41`;
    /// 42 hex chars must already start with `41`.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        match s.len() {
            40 | 42 => {}
            other => return Err(AddressError::InvalidLength(other)),
        }
        let data = hex::decode(s).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&data)
    }

    /// Construct from raw bytes: 21 bytes (prefix-checked) or 20 bytes
    /// (promoted by prepending `0x41`).
    pub fn from_bytes(data: &[u8]) -> Result<Self, AddressError> {
        match data.len() {
            ADDRESS_LEN => {
                if data[0] != ADDRESS_PREFIX {
                    return Err(AddressError::InvalidPrefix);
                }
                let mut bytes = [0u8; ADDRESS_LEN];
                bytes.copy_from_slice(data);
                Ok(Self::from_array(bytes))
            }
            EVM_ADDRESS_LEN => {
                let mut bytes = [0u8; ADDRESS_LEN];
                bytes[0] = ADDRESS_PREFIX;
                bytes[1..].copy_from_slice(data);
                Ok(Self::from_array(bytes))
            }
            other => Err(AddressError::InvalidLength(other)),
        }
    }

    /// Construct from a 20-byte EVM address.
    pub fn from_evm_bytes(data: [u8; EVM_ADDRESS_LEN]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(&data);
        Self::from_array(bytes)
    }

    /// The base58check string (canonical user-facing form).
    pub fn to_base58(&self) -> &str {
        &self.base58
    }

    /// The 21-byte native form.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.bytes
    }

    /// The 20-byte EVM form (native form minus the prefix byte).
    pub fn evm_bytes(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Lowercase hex of the native form, `41`-prefixed, no `0x`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Lowercase hex of the EVM form with a `0x` prefix.
    pub fn to_evm_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes[1..]))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Address {}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base58)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({} / 0x{})", self.base58, self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Dispatch on shape: 34 chars starting with `T` is base58check,
    /// anything else is tried as hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == ADDRESS_BASE58_LEN && s.starts_with(ADDRESS_BASE58_PREFIX) {
            return Self::from_base58(s);
        }
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}
