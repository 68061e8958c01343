//! SDK-level view types

use trx_proto::{api::transaction_info::Log, Return, ResourceCode};

use crate::abi::Token;
use crate::SdkError;

/// Resource kinds grantable by staking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceKind {
    /// Bandwidth meters transaction bytes
    #[default]
    Bandwidth,
    /// Energy meters contract execution cost
    Energy,
    /// Tron power backs witness votes
    TronPower,
}

impl ResourceKind {
    /// Wire discriminant
    pub fn code(self) -> i32 {
        match self {
            ResourceKind::Bandwidth => ResourceCode::Bandwidth as i32,
            ResourceKind::Energy => ResourceCode::Energy as i32,
            ResourceKind::TronPower => ResourceCode::TronPower as i32,
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bandwidth" => Ok(ResourceKind::Bandwidth),
            "energy" => Ok(ResourceKind::Energy),
            "tronpower" | "tron_power" => Ok(ResourceKind::TronPower),
            other => Err(SdkError::InvalidArgument(format!(
                "unknown resource kind: {}",
                other
            ))),
        }
    }
}

/// One decoded parameter of a call or event
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedParam {
    /// Parameter name from the ABI (may be empty)
    pub name: String,
    /// Decoded value
    pub value: Token,
    /// Whether the parameter was indexed (events only)
    pub indexed: bool,
}

/// A decoded contract call (input data)
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// Method name, or `unknown(<hex of 4 bytes>)` when the selector has
    /// no match in the ABI
    pub method: String,
    /// Decoded inputs in declaration order; empty for unknown selectors
    pub params: Vec<DecodedParam>,
}

/// A decoded event log
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Event name
    pub name: String,
    /// Parameters in declaration order, each tagged indexed or not
    pub params: Vec<DecodedParam>,
}

/// Result of a simulated contract execution
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Decoded return values of the method
    pub values: Vec<Token>,
    /// Energy the node reports the execution would use
    pub energy_used: i64,
    /// The node's result record for the simulation
    pub result: Option<Return>,
    /// Logs the execution would have emitted
    pub logs: Vec<Log>,
}

/// Deploy-stage parameters for a new contract
#[derive(Debug, Clone)]
pub struct DeployParams {
    /// Contract name (no control characters)
    pub name: String,
    /// Compiled bytecode, non-empty
    pub bytecode: Vec<u8>,
    /// ABI JSON, required when constructor arguments are supplied
    pub abi_json: Option<String>,
    /// Constructor arguments, appended to the bytecode after encoding
    pub constructor_args: Vec<Token>,
    /// Energy limit charged to the contract origin, must be positive
    pub origin_energy_limit: i64,
    /// Share of execution cost paid by callers, in [0, 100]
    pub consume_user_resource_percent: i64,
    /// TRX transferred to the contract at deploy time
    pub call_value: i64,
}

impl Default for DeployParams {
    fn default() -> Self {
        DeployParams {
            name: String::new(),
            bytecode: Vec::new(),
            abi_json: None,
            constructor_args: Vec::new(),
            origin_energy_limit: 10_000_000,
            consume_user_resource_percent: 100,
            call_value: 0,
        }
    }
}
