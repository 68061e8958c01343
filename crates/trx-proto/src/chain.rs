//! Chain-side messages: transactions, contract payloads, accounts, blocks.

use prost::Message;

/// Resource kinds grantable by staking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResourceCode {
    /// Bandwidth meters transaction bytes
    Bandwidth = 0,
    /// Energy meters contract execution
    Energy = 1,
    /// Tron power backs witness votes
    TronPower = 2,
}

/// A transaction envelope: raw body, signatures, execution results
#[derive(Clone, PartialEq, Message)]
pub struct Transaction {
    #[prost(message, optional, tag = "1")]
    pub raw_data: Option<transaction::Raw>,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub signature: Vec<Vec<u8>>,
    #[prost(message, repeated, tag = "5")]
    pub ret: Vec<transaction::Result>,
}

pub mod transaction {
    use prost::Message;

    /// Raw transaction body. The canonical transaction id is the sha256 of
    /// this message's serialization; the field set must stay complete so a
    /// re-encode reproduces the node's bytes.
    #[derive(Clone, PartialEq, Message)]
    pub struct Raw {
        #[prost(bytes = "vec", tag = "1")]
        pub ref_block_bytes: Vec<u8>,
        #[prost(int64, tag = "3")]
        pub ref_block_num: i64,
        #[prost(bytes = "vec", tag = "4")]
        pub ref_block_hash: Vec<u8>,
        #[prost(int64, tag = "8")]
        pub expiration: i64,
        #[prost(message, repeated, tag = "9")]
        pub auths: Vec<super::Authority>,
        #[prost(bytes = "vec", tag = "10")]
        pub data: Vec<u8>,
        #[prost(message, repeated, tag = "11")]
        pub contract: Vec<Contract>,
        #[prost(bytes = "vec", tag = "12")]
        pub scripts: Vec<u8>,
        #[prost(int64, tag = "14")]
        pub timestamp: i64,
        #[prost(int64, tag = "18")]
        pub fee_limit: i64,
    }

    /// One operation inside a transaction
    #[derive(Clone, PartialEq, Message)]
    pub struct Contract {
        #[prost(enumeration = "contract::ContractType", tag = "1")]
        pub r#type: i32,
        #[prost(message, optional, tag = "2")]
        pub parameter: Option<prost_types::Any>,
        #[prost(bytes = "vec", tag = "3")]
        pub provider: Vec<u8>,
        #[prost(bytes = "vec", tag = "4")]
        pub contract_name: Vec<u8>,
        #[prost(int32, tag = "5")]
        pub permission_id: i32,
    }

    pub mod contract {
        /// Contract type discriminants
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum ContractType {
            AccountCreateContract = 0,
            TransferContract = 1,
            TransferAssetContract = 2,
            VoteAssetContract = 3,
            VoteWitnessContract = 4,
            WitnessCreateContract = 5,
            AssetIssueContract = 6,
            WitnessUpdateContract = 8,
            ParticipateAssetIssueContract = 9,
            AccountUpdateContract = 10,
            FreezeBalanceContract = 11,
            UnfreezeBalanceContract = 12,
            WithdrawBalanceContract = 13,
            UnfreezeAssetContract = 14,
            UpdateAssetContract = 15,
            ProposalCreateContract = 16,
            ProposalApproveContract = 17,
            ProposalDeleteContract = 18,
            SetAccountIdContract = 19,
            CustomContract = 20,
            CreateSmartContract = 30,
            TriggerSmartContract = 31,
            GetContract = 32,
            UpdateSettingContract = 33,
            ExchangeCreateContract = 41,
            ExchangeInjectContract = 42,
            ExchangeWithdrawContract = 43,
            ExchangeTransactionContract = 44,
            UpdateEnergyLimitContract = 45,
            AccountPermissionUpdateContract = 46,
            ClearAbiContract = 48,
            UpdateBrokerageContract = 49,
            ShieldedTransferContract = 51,
            MarketSellAssetContract = 52,
            MarketCancelOrderContract = 53,
            FreezeBalanceV2Contract = 54,
            UnfreezeBalanceV2Contract = 55,
            WithdrawExpireUnfreezeContract = 56,
            DelegateResourceContract = 57,
            UnDelegateResourceContract = 58,
            CancelAllUnfreezeV2Contract = 59,
        }
    }

    /// Per-contract execution result
    #[derive(Clone, PartialEq, Message)]
    pub struct Result {
        #[prost(int64, tag = "1")]
        pub fee: i64,
        #[prost(enumeration = "result::Code", tag = "2")]
        pub ret: i32,
        #[prost(enumeration = "result::ContractResult", tag = "3")]
        pub contract_ret: i32,
        #[prost(string, tag = "14")]
        pub asset_issue_id: String,
        #[prost(int64, tag = "15")]
        pub withdraw_amount: i64,
        #[prost(int64, tag = "16")]
        pub unfreeze_amount: i64,
    }

    pub mod result {
        /// Result codes
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum Code {
            Success = 0,
            Failed = 1,
        }

        /// Contract execution result codes
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum ContractResult {
            Default = 0,
            Success = 1,
            Revert = 2,
            BadJumpDestination = 3,
            OutOfMemory = 4,
            PrecompiledContract = 5,
            StackTooSmall = 6,
            StackTooLarge = 7,
            IllegalOperation = 8,
            StackOverflow = 9,
            OutOfEnergy = 10,
            OutOfTime = 11,
            JvmStackOverFlow = 12,
            Unknown = 13,
            TransferFailed = 14,
            InvalidCode = 15,
        }
    }
}

/// Multi-sig authority (vestigial, carried for wire fidelity)
#[derive(Clone, PartialEq, Message)]
pub struct Authority {
    #[prost(bytes = "vec", tag = "1")]
    pub account: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub permission_name: Vec<u8>,
}

/// TRX value transfer
#[derive(Clone, PartialEq, Message)]
pub struct TransferContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub to_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub amount: i64,
}

/// Stake balance for a resource grant (freeze v2)
#[derive(Clone, PartialEq, Message)]
pub struct FreezeBalanceV2Contract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub frozen_balance: i64,
    #[prost(enumeration = "ResourceCode", tag = "3")]
    pub resource: i32,
}

/// Unstake a resource grant (unfreeze v2)
#[derive(Clone, PartialEq, Message)]
pub struct UnfreezeBalanceV2Contract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub unfreeze_balance: i64,
    #[prost(enumeration = "ResourceCode", tag = "3")]
    pub resource: i32,
}

/// Delegate a staked resource to another account
#[derive(Clone, PartialEq, Message)]
pub struct DelegateResourceContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(enumeration = "ResourceCode", tag = "2")]
    pub resource: i32,
    #[prost(int64, tag = "3")]
    pub balance: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub receiver_address: Vec<u8>,
    #[prost(bool, tag = "5")]
    pub lock: bool,
    #[prost(int64, tag = "6")]
    pub lock_period: i64,
}

/// Reclaim a delegated resource
#[derive(Clone, PartialEq, Message)]
pub struct UnDelegateResourceContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(enumeration = "ResourceCode", tag = "2")]
    pub resource: i32,
    #[prost(int64, tag = "3")]
    pub balance: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub receiver_address: Vec<u8>,
}

/// Withdraw matured unfreezes
#[derive(Clone, PartialEq, Message)]
pub struct WithdrawExpireUnfreezeContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
}

/// Withdraw validator rewards
#[derive(Clone, PartialEq, Message)]
pub struct WithdrawBalanceContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
}

/// Smart contract invocation
#[derive(Clone, PartialEq, Message)]
pub struct TriggerSmartContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub call_value: i64,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
    #[prost(int64, tag = "5")]
    pub call_token_value: i64,
    #[prost(int64, tag = "6")]
    pub token_id: i64,
}

/// Smart contract deployment
#[derive(Clone, PartialEq, Message)]
pub struct CreateSmartContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub new_contract: Option<SmartContract>,
    #[prost(int64, tag = "3")]
    pub call_token_value: i64,
    #[prost(int64, tag = "4")]
    pub token_id: i64,
}

/// On-chain contract record
#[derive(Clone, PartialEq, Message)]
pub struct SmartContract {
    #[prost(bytes = "vec", tag = "1")]
    pub origin_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub abi: Option<smart_contract::Abi>,
    #[prost(bytes = "vec", tag = "4")]
    pub bytecode: Vec<u8>,
    #[prost(int64, tag = "5")]
    pub call_value: i64,
    #[prost(int64, tag = "6")]
    pub consume_user_resource_percent: i64,
    #[prost(string, tag = "7")]
    pub name: String,
    #[prost(int64, tag = "8")]
    pub origin_energy_limit: i64,
    #[prost(bytes = "vec", tag = "9")]
    pub code_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub trx_hash: Vec<u8>,
}

pub mod smart_contract {
    use prost::Message;

    /// On-chain ABI of a contract
    #[derive(Clone, PartialEq, Message)]
    pub struct Abi {
        #[prost(message, repeated, tag = "1")]
        pub entrys: Vec<abi::Entry>,
    }

    pub mod abi {
        use prost::Message;

        /// One ABI entry
        #[derive(Clone, PartialEq, Message)]
        pub struct Entry {
            #[prost(bool, tag = "1")]
            pub anonymous: bool,
            #[prost(bool, tag = "2")]
            pub constant: bool,
            #[prost(string, tag = "3")]
            pub name: String,
            #[prost(message, repeated, tag = "4")]
            pub inputs: Vec<entry::Param>,
            #[prost(message, repeated, tag = "5")]
            pub outputs: Vec<entry::Param>,
            #[prost(enumeration = "entry::EntryType", tag = "6")]
            pub r#type: i32,
            #[prost(bool, tag = "7")]
            pub payable: bool,
            #[prost(enumeration = "entry::StateMutabilityType", tag = "8")]
            pub state_mutability: i32,
        }

        pub mod entry {
            use prost::Message;

            /// One parameter of an ABI entry
            #[derive(Clone, PartialEq, Message)]
            pub struct Param {
                #[prost(bool, tag = "1")]
                pub indexed: bool,
                #[prost(string, tag = "2")]
                pub name: String,
                #[prost(string, tag = "3")]
                pub r#type: String,
            }

            /// Entry kinds
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
                ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum EntryType {
                UnknownEntryType = 0,
                Constructor = 1,
                Function = 2,
                Event = 3,
                Fallback = 4,
                Receive = 5,
                Error = 6,
            }

            /// State mutability tags
            #[derive(
                Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
                ::prost::Enumeration,
            )]
            #[repr(i32)]
            pub enum StateMutabilityType {
                UnknownMutabilityType = 0,
                Pure = 1,
                View = 2,
                Nonpayable = 3,
                Payable = 4,
            }
        }
    }
}

/// Change a deployed contract's user resource consumption percentage
#[derive(Clone, PartialEq, Message)]
pub struct UpdateSettingContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub consume_user_resource_percent: i64,
}

/// Change a deployed contract's origin energy limit
#[derive(Clone, PartialEq, Message)]
pub struct UpdateEnergyLimitContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub origin_energy_limit: i64,
}

/// Remove a deployed contract's stored ABI
#[derive(Clone, PartialEq, Message)]
pub struct ClearAbiContract {
    #[prost(bytes = "vec", tag = "1")]
    pub owner_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub contract_address: Vec<u8>,
}

/// Account record (the fields this SDK reads)
#[derive(Clone, PartialEq, Message)]
pub struct Account {
    #[prost(bytes = "vec", tag = "1")]
    pub account_name: Vec<u8>,
    #[prost(enumeration = "AccountType", tag = "2")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub address: Vec<u8>,
    #[prost(int64, tag = "4")]
    pub balance: i64,
    #[prost(int64, tag = "9")]
    pub create_time: i64,
    #[prost(int64, tag = "11")]
    pub allowance: i64,
}

/// Account kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AccountType {
    /// Externally controlled account
    Normal = 0,
    /// Asset issuer account
    AssetIssue = 1,
    /// Contract account
    Contract = 2,
}

/// Block header
#[derive(Clone, PartialEq, Message)]
pub struct BlockHeader {
    #[prost(message, optional, tag = "1")]
    pub raw_data: Option<block_header::Raw>,
    #[prost(bytes = "vec", tag = "2")]
    pub witness_signature: Vec<u8>,
}

pub mod block_header {
    use prost::Message;

    /// Raw block header data
    #[derive(Clone, PartialEq, Message)]
    pub struct Raw {
        #[prost(int64, tag = "1")]
        pub timestamp: i64,
        #[prost(bytes = "vec", tag = "2")]
        pub tx_trie_root: Vec<u8>,
        #[prost(bytes = "vec", tag = "3")]
        pub parent_hash: Vec<u8>,
        #[prost(int64, tag = "7")]
        pub number: i64,
        #[prost(int64, tag = "8")]
        pub witness_id: i64,
        #[prost(bytes = "vec", tag = "9")]
        pub witness_address: Vec<u8>,
        #[prost(int32, tag = "10")]
        pub version: i32,
        #[prost(bytes = "vec", tag = "11")]
        pub account_state_root: Vec<u8>,
    }
}

/// Block
#[derive(Clone, PartialEq, Message)]
pub struct Block {
    #[prost(message, repeated, tag = "1")]
    pub transactions: Vec<Transaction>,
    #[prost(message, optional, tag = "2")]
    pub block_header: Option<BlockHeader>,
}
