//! gRPC method paths of the node's `protocol.Wallet` service.

/// `GetAccount` — account record by address
pub const GET_ACCOUNT: &str = "/protocol.Wallet/GetAccount";
/// `GetAccountNet` — bandwidth accounting by address
pub const GET_ACCOUNT_NET: &str = "/protocol.Wallet/GetAccountNet";
/// `GetAccountResource` — bandwidth + energy accounting by address
pub const GET_ACCOUNT_RESOURCE: &str = "/protocol.Wallet/GetAccountResource";

/// `GetNowBlock` — current head block
pub const GET_NOW_BLOCK: &str = "/protocol.Wallet/GetNowBlock";
/// `GetBlockByNum` — block by height
pub const GET_BLOCK_BY_NUM: &str = "/protocol.Wallet/GetBlockByNum";

/// `CreateTransaction2` — build a TRX transfer
pub const CREATE_TRANSACTION: &str = "/protocol.Wallet/CreateTransaction2";
/// `FreezeBalanceV2` — build a resource freeze
pub const FREEZE_BALANCE_V2: &str = "/protocol.Wallet/FreezeBalanceV2";
/// `UnfreezeBalanceV2` — build a resource unfreeze
pub const UNFREEZE_BALANCE_V2: &str = "/protocol.Wallet/UnfreezeBalanceV2";
/// `DelegateResource` — build a resource delegation
pub const DELEGATE_RESOURCE: &str = "/protocol.Wallet/DelegateResource";
/// `UnDelegateResource` — build a resource reclaim
pub const UNDELEGATE_RESOURCE: &str = "/protocol.Wallet/UnDelegateResource";
/// `WithdrawExpireUnfreeze` — build a matured-unfreeze withdrawal
pub const WITHDRAW_EXPIRE_UNFREEZE: &str = "/protocol.Wallet/WithdrawExpireUnfreeze";
/// `WithdrawBalance2` — build a reward withdrawal
pub const WITHDRAW_BALANCE: &str = "/protocol.Wallet/WithdrawBalance2";
/// `BroadcastTransaction` — submit a signed transaction
pub const BROADCAST_TRANSACTION: &str = "/protocol.Wallet/BroadcastTransaction";
/// `GetTransactionInfoById` — confirmed transaction record
pub const GET_TRANSACTION_INFO_BY_ID: &str = "/protocol.Wallet/GetTransactionInfoById";

/// `DeployContract` — build a contract deployment
pub const DEPLOY_CONTRACT: &str = "/protocol.Wallet/DeployContract";
/// `TriggerContract` — build a contract invocation
pub const TRIGGER_CONTRACT: &str = "/protocol.Wallet/TriggerContract";
/// `TriggerConstantContract` — run a read-only call / simulation
pub const TRIGGER_CONSTANT_CONTRACT: &str = "/protocol.Wallet/TriggerConstantContract";
/// `GetContract` — deployed contract record
pub const GET_CONTRACT: &str = "/protocol.Wallet/GetContract";
/// `GetContractInfo` — deployed contract record plus runtime code
pub const GET_CONTRACT_INFO: &str = "/protocol.Wallet/GetContractInfo";
/// `EstimateEnergy` — energy estimate for a call
pub const ESTIMATE_ENERGY: &str = "/protocol.Wallet/EstimateEnergy";
/// `UpdateSetting` — build a user-resource-percent update
pub const UPDATE_SETTING: &str = "/protocol.Wallet/UpdateSetting";
/// `UpdateEnergyLimit` — build an origin-energy-limit update
pub const UPDATE_ENERGY_LIMIT: &str = "/protocol.Wallet/UpdateEnergyLimit";
/// `ClearContractAbi` — build an ABI removal
pub const CLEAR_CONTRACT_ABI: &str = "/protocol.Wallet/ClearContractABI";
