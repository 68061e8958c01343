//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Invalid address input
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid caller-supplied argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// ABI JSON or type-string parse failure
    #[error("abi parse error: {0}")]
    AbiParse(String),

    /// ABI encoding failure
    #[error("abi encoding error: {0}")]
    AbiEncode(String),

    /// ABI decoding failure
    #[error("abi decoding error: {0}")]
    AbiDecode(String),

    /// Contract carries no ABI on-chain and none was supplied
    #[error("contract abi unavailable")]
    AbiUnavailable,

    /// Method name not present in the ABI
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Invalid key material or signing backend failure
    #[error("signing error: {0}")]
    Signing(String),

    /// Channel acquisition or RPC call failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Structured error status from the node
    #[error("rpc error: {code} - {message}")]
    Rpc {
        /// gRPC status code
        code: i32,
        /// status message
        message: String,
    },

    /// Node rejected the operation in its result record
    #[error("node rejected {operation}: {code} {message}")]
    NodeRejected {
        /// RPC verb that was rejected
        operation: &'static str,
        /// node response code, stringified
        code: String,
        /// node message
        message: String,
    },

    /// Node returned nil where a value was required
    #[error("node returned no result for {0}")]
    NilResult(&'static str),

    /// Confirmation poll exhausted without a confirmed record
    #[error("transaction not confirmed after {0} attempts")]
    ConfirmationTimeout(u32),

    /// Connection pool has been closed
    #[error("connection pool closed")]
    PoolClosed,

    /// Protobuf or JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<trx_primitives::AddressError> for SdkError {
    fn from(e: trx_primitives::AddressError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}

impl From<trx_crypto::CryptoError> for SdkError {
    fn from(e: trx_crypto::CryptoError) -> Self {
        SdkError::Signing(e.to_string())
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidArgument(format!("invalid hex: {}", e))
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<prost::DecodeError> for SdkError {
    fn from(e: prost::DecodeError) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<tonic::Status> for SdkError {
    fn from(s: tonic::Status) -> Self {
        SdkError::Rpc {
            code: s.code() as i32,
            message: s.message().to_string(),
        }
    }
}
