//! API-side envelopes exchanged with the node's wallet service.

use prost::Message;

use crate::chain::Transaction;

/// Empty request body
#[derive(Clone, PartialEq, Message)]
pub struct EmptyMessage {}

/// Single-number request body
#[derive(Clone, PartialEq, Message)]
pub struct NumberMessage {
    #[prost(int64, tag = "1")]
    pub num: i64,
}

/// Single-bytes request body
#[derive(Clone, PartialEq, Message)]
pub struct BytesMessage {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// Node verdict on a submitted operation
#[derive(Clone, PartialEq, Message)]
pub struct Return {
    #[prost(bool, tag = "1")]
    pub result: bool,
    #[prost(enumeration = "r#return::ResponseCode", tag = "2")]
    pub code: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub message: Vec<u8>,
}

pub mod r#return {
    /// Response codes for [`super::Return`]
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum ResponseCode {
        Success = 0,
        SigError = 1,
        ContractValidateError = 2,
        ContractExeError = 3,
        BandwidthError = 4,
        DupTransactionError = 5,
        TaposError = 6,
        TooBigTransactionError = 7,
        TransactionExpirationError = 8,
        ServerBusy = 9,
        NoConnection = 10,
        NotEnoughEffectiveConnection = 11,
        OtherError = 20,
    }
}

impl Return {
    /// Message bytes as lossy UTF-8
    pub fn message_str(&self) -> String {
        String::from_utf8_lossy(&self.message).into_owned()
    }
}

/// Transaction build/simulation envelope returned by the node
#[derive(Clone, PartialEq, Message)]
pub struct TransactionExtention {
    #[prost(message, optional, tag = "1")]
    pub transaction: Option<Transaction>,
    /// Tentative id computed by the node
    #[prost(bytes = "vec", tag = "2")]
    pub txid: Vec<u8>,
    /// Output byte segments of a constant call
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub constant_result: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "4")]
    pub result: Option<Return>,
    #[prost(int64, tag = "5")]
    pub energy_used: i64,
    #[prost(int64, tag = "7")]
    pub energy_penalty: i64,
    /// Logs a simulated execution would have emitted
    #[prost(message, repeated, tag = "8")]
    pub logs: Vec<transaction_info::Log>,
}

/// Confirmed transaction record
#[derive(Clone, PartialEq, Message)]
pub struct TransactionInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub fee: i64,
    #[prost(int64, tag = "3")]
    pub block_number: i64,
    #[prost(int64, tag = "4")]
    pub block_time_stamp: i64,
    #[prost(bytes = "vec", repeated, tag = "5")]
    pub contract_result: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "6")]
    pub contract_address: Vec<u8>,
    #[prost(message, optional, tag = "7")]
    pub receipt: Option<ResourceReceipt>,
    #[prost(message, repeated, tag = "8")]
    pub log: Vec<transaction_info::Log>,
    #[prost(enumeration = "transaction_info::Code", tag = "9")]
    pub result: i32,
    #[prost(bytes = "vec", tag = "10")]
    pub res_message: Vec<u8>,
    #[prost(int64, tag = "15")]
    pub withdraw_amount: i64,
    #[prost(int64, tag = "16")]
    pub unfreeze_amount: i64,
}

pub mod transaction_info {
    use prost::Message;

    /// One emitted event log
    #[derive(Clone, PartialEq, Message)]
    pub struct Log {
        #[prost(bytes = "vec", tag = "1")]
        pub address: Vec<u8>,
        #[prost(bytes = "vec", repeated, tag = "2")]
        pub topics: Vec<Vec<u8>>,
        #[prost(bytes = "vec", tag = "3")]
        pub data: Vec<u8>,
    }

    /// Execution outcome
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum Code {
        Success = 0,
        Failed = 1,
    }
}

/// Resource accounting of a confirmed transaction
#[derive(Clone, PartialEq, Message)]
pub struct ResourceReceipt {
    #[prost(int64, tag = "1")]
    pub energy_usage: i64,
    #[prost(int64, tag = "2")]
    pub energy_fee: i64,
    #[prost(int64, tag = "3")]
    pub origin_energy_usage: i64,
    #[prost(int64, tag = "4")]
    pub energy_usage_total: i64,
    #[prost(int64, tag = "5")]
    pub net_usage: i64,
    #[prost(int64, tag = "6")]
    pub net_fee: i64,
    #[prost(enumeration = "crate::chain::transaction::result::ContractResult", tag = "7")]
    pub result: i32,
}

/// Energy estimate for a contract call
#[derive(Clone, PartialEq, Message)]
pub struct EstimateEnergyMessage {
    #[prost(message, optional, tag = "1")]
    pub result: Option<Return>,
    #[prost(int64, tag = "2")]
    pub energy_required: i64,
}

/// Deployed contract record plus runtime code
#[derive(Clone, PartialEq, Message)]
pub struct SmartContractDataWrapper {
    #[prost(message, optional, tag = "1")]
    pub smart_contract: Option<crate::chain::SmartContract>,
    #[prost(bytes = "vec", tag = "2")]
    pub runtimecode: Vec<u8>,
}

/// Bandwidth accounting of an account
#[derive(Clone, PartialEq, Message)]
pub struct AccountNetMessage {
    #[prost(int64, tag = "1")]
    pub free_net_used: i64,
    #[prost(int64, tag = "2")]
    pub free_net_limit: i64,
    #[prost(int64, tag = "3")]
    pub net_used: i64,
    #[prost(int64, tag = "4")]
    pub net_limit: i64,
    #[prost(int64, tag = "7")]
    pub total_net_limit: i64,
    #[prost(int64, tag = "8")]
    pub total_net_weight: i64,
}

/// Bandwidth and energy accounting of an account
#[derive(Clone, PartialEq, Message)]
pub struct AccountResourceMessage {
    #[prost(int64, tag = "1")]
    pub free_net_used: i64,
    #[prost(int64, tag = "2")]
    pub free_net_limit: i64,
    #[prost(int64, tag = "3")]
    pub net_used: i64,
    #[prost(int64, tag = "4")]
    pub net_limit: i64,
    #[prost(int64, tag = "7")]
    pub total_net_limit: i64,
    #[prost(int64, tag = "8")]
    pub total_net_weight: i64,
    #[prost(int64, tag = "13")]
    pub energy_used: i64,
    #[prost(int64, tag = "14")]
    pub energy_limit: i64,
    #[prost(int64, tag = "15")]
    pub total_energy_limit: i64,
    #[prost(int64, tag = "16")]
    pub total_energy_weight: i64,
}
