//! # trx-proto
//!
//! Hand-written protobuf types for the TRON node protocol, compatible with
//! the official definitions, so no protoc runs at build time. Only the
//! messages the SDK exchanges with a node are defined; fields inside
//! `transaction::Raw` are complete so that re-encoding a node-built
//! transaction reproduces the node's canonical bytes bit-for-bit.

#![warn(clippy::all)]

pub mod api;
pub mod chain;
pub mod paths;

pub use api::{
    AccountNetMessage, AccountResourceMessage, BytesMessage, EmptyMessage,
    EstimateEnergyMessage, NumberMessage, Return, SmartContractDataWrapper,
    TransactionExtention, TransactionInfo,
};
pub use chain::{
    transaction, Account, Block, BlockHeader, ClearAbiContract, CreateSmartContract,
    DelegateResourceContract, FreezeBalanceV2Contract, ResourceCode, SmartContract,
    Transaction, TransferContract, TriggerSmartContract, UnDelegateResourceContract,
    UnfreezeBalanceV2Contract, UpdateEnergyLimitContract, UpdateSettingContract,
    WithdrawBalanceContract, WithdrawExpireUnfreezeContract,
};

/// A contract payload that can be boxed into the `Any` slot of a
/// transaction contract entry.
pub trait ContractPayload: prost::Message + Default + Sized {
    /// `type.googleapis.com/...` URL carried in the `Any` wrapper
    const TYPE_URL: &'static str;
    /// Contract type discriminant of the enclosing entry
    const CONTRACT_TYPE: chain::transaction::contract::ContractType;

    /// Wrap the payload in an `Any`
    fn to_any(&self) -> prost_types::Any {
        prost_types::Any {
            type_url: Self::TYPE_URL.to_string(),
            value: self.encode_to_vec(),
        }
    }

    /// Unwrap a payload of this type from an `Any`, if the URL matches
    fn from_any(any: &prost_types::Any) -> Option<Self> {
        if any.type_url != Self::TYPE_URL {
            return None;
        }
        Self::decode(any.value.as_slice()).ok()
    }
}

macro_rules! contract_payload {
    ($ty:ty, $url:literal, $kind:ident) => {
        impl ContractPayload for $ty {
            const TYPE_URL: &'static str = concat!("type.googleapis.com/protocol.", $url);
            const CONTRACT_TYPE: chain::transaction::contract::ContractType =
                chain::transaction::contract::ContractType::$kind;
        }
    };
}

contract_payload!(TransferContract, "TransferContract", TransferContract);
contract_payload!(FreezeBalanceV2Contract, "FreezeBalanceV2Contract", FreezeBalanceV2Contract);
contract_payload!(UnfreezeBalanceV2Contract, "UnfreezeBalanceV2Contract", UnfreezeBalanceV2Contract);
contract_payload!(DelegateResourceContract, "DelegateResourceContract", DelegateResourceContract);
contract_payload!(UnDelegateResourceContract, "UnDelegateResourceContract", UnDelegateResourceContract);
contract_payload!(WithdrawExpireUnfreezeContract, "WithdrawExpireUnfreezeContract", WithdrawExpireUnfreezeContract);
contract_payload!(WithdrawBalanceContract, "WithdrawBalanceContract", WithdrawBalanceContract);
contract_payload!(TriggerSmartContract, "TriggerSmartContract", TriggerSmartContract);
contract_payload!(CreateSmartContract, "CreateSmartContract", CreateSmartContract);
contract_payload!(UpdateSettingContract, "UpdateSettingContract", UpdateSettingContract);
contract_payload!(UpdateEnergyLimitContract, "UpdateEnergyLimitContract", UpdateEnergyLimitContract);
contract_payload!(ClearAbiContract, "ClearABIContract", ClearAbiContract);
