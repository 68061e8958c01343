//! Typed RPC façade over the node's wallet service.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use prost::Message;
use tracing::{debug, warn};

use trx_primitives::Address;
use trx_proto::{
    api::r#return::ResponseCode, paths, Account, AccountNetMessage, AccountResourceMessage,
    Block, BytesMessage, ClearAbiContract, CreateSmartContract, DelegateResourceContract,
    EmptyMessage, EstimateEnergyMessage, FreezeBalanceV2Contract, NumberMessage, Return,
    SmartContract, SmartContractDataWrapper, Transaction, TransactionExtention,
    TransactionInfo, TransferContract, TriggerSmartContract, UnDelegateResourceContract,
    UnfreezeBalanceV2Contract, UpdateEnergyLimitContract, UpdateSettingContract,
    WithdrawBalanceContract, WithdrawExpireUnfreezeContract,
};

use crate::abi::{encode_constructor, Abi};
use crate::pool::{ChannelPool, PoolConfig};
use crate::transport::{GrpcTransport, MockTransport, Transport};
use crate::types::{DeployParams, ResourceKind};
use crate::SdkError;

/// Client for one node endpoint: owns the connection pool and offers one
/// validated, typed wrapper per RPC verb. Contract bindings and
/// transaction pipelines are created from it.
pub struct Client {
    transport: Arc<dyn Transport>,
    pool: Option<Arc<ChannelPool>>,
}

impl Client {
    /// Connect to a node URL with default pool settings
    pub fn connect(url: impl Into<String>) -> Result<Arc<Self>, SdkError> {
        Self::with_config(PoolConfig::new(url.into()))
    }

    /// Connect with explicit pool configuration
    pub fn with_config(config: PoolConfig) -> Result<Arc<Self>, SdkError> {
        let pool = ChannelPool::new(config)?;
        Ok(Arc::new(Client {
            transport: Arc::new(GrpcTransport::new(Arc::clone(&pool))),
            pool: Some(pool),
        }))
    }

    /// Client over a custom transport (tests, instrumentation)
    pub fn with_transport(transport: impl Transport + 'static) -> Arc<Self> {
        Arc::new(Client {
            transport: Arc::new(transport),
            pool: None,
        })
    }

    /// Client over a fresh [`MockTransport`]; returns both
    pub fn new_mock() -> (Arc<Self>, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let client = Arc::new(Client {
            transport: Arc::clone(&mock) as Arc<dyn Transport>,
            pool: None,
        });
        (client, mock)
    }

    /// Tear down the connection pool; outstanding calls abort
    pub fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
        }
    }

    /// One unary exchange: encode, call, decode
    async fn call<Req, Resp>(&self, path: &'static str, request: &Req) -> Result<Resp, SdkError>
    where
        Req: Message,
        Resp: Message + Default,
    {
        debug!(path, "rpc");
        let response = self
            .transport
            .unary(path, Bytes::from(request.encode_to_vec()))
            .await?;
        Resp::decode(response.as_ref()).map_err(Into::into)
    }

    // ==================== accounts ====================

    /// Account record by address
    pub async fn get_account(&self, address: &Address) -> Result<Account, SdkError> {
        let request = Account {
            address: address.as_bytes().to_vec(),
            ..Default::default()
        };
        self.call(paths::GET_ACCOUNT, &request).await
    }

    /// Bandwidth accounting of an account
    pub async fn get_account_net(&self, address: &Address) -> Result<AccountNetMessage, SdkError> {
        let request = Account {
            address: address.as_bytes().to_vec(),
            ..Default::default()
        };
        self.call(paths::GET_ACCOUNT_NET, &request).await
    }

    /// Bandwidth and energy accounting of an account
    pub async fn get_account_resource(
        &self,
        address: &Address,
    ) -> Result<AccountResourceMessage, SdkError> {
        let request = Account {
            address: address.as_bytes().to_vec(),
            ..Default::default()
        };
        self.call(paths::GET_ACCOUNT_RESOURCE, &request).await
    }

    // ==================== blocks ====================

    /// Current head block
    pub async fn get_now_block(&self) -> Result<Block, SdkError> {
        self.call(paths::GET_NOW_BLOCK, &EmptyMessage {}).await
    }

    /// Block by height
    pub async fn get_block_by_num(&self, num: i64) -> Result<Block, SdkError> {
        if num < 0 {
            return Err(SdkError::InvalidArgument(format!(
                "block number must be non-negative, got {}",
                num
            )));
        }
        self.call(paths::GET_BLOCK_BY_NUM, &NumberMessage { num }).await
    }

    // ==================== transaction builds ====================

    /// Build a TRX transfer of `amount` SUN
    pub async fn create_transfer(
        &self,
        owner: &Address,
        to: &Address,
        amount: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_amount("transfer amount", amount)?;
        if owner == to {
            return Err(SdkError::InvalidArgument(
                "cannot transfer to the owner address".to_string(),
            ));
        }
        let request = TransferContract {
            owner_address: owner.as_bytes().to_vec(),
            to_address: to.as_bytes().to_vec(),
            amount,
        };
        let ext = self.call(paths::CREATE_TRANSACTION, &request).await?;
        check_ext("CreateTransfer", ext)
    }

    /// Build a freeze of `amount` SUN for a resource grant
    pub async fn create_freeze_v2(
        &self,
        owner: &Address,
        amount: i64,
        resource: ResourceKind,
    ) -> Result<TransactionExtention, SdkError> {
        check_amount("freeze amount", amount)?;
        let request = FreezeBalanceV2Contract {
            owner_address: owner.as_bytes().to_vec(),
            frozen_balance: amount,
            resource: resource.code(),
        };
        let ext = self.call(paths::FREEZE_BALANCE_V2, &request).await?;
        check_ext("CreateFreezeV2", ext)
    }

    /// Build an unfreeze of `amount` SUN from a resource grant
    pub async fn create_unfreeze_v2(
        &self,
        owner: &Address,
        amount: i64,
        resource: ResourceKind,
    ) -> Result<TransactionExtention, SdkError> {
        check_amount("unfreeze amount", amount)?;
        let request = UnfreezeBalanceV2Contract {
            owner_address: owner.as_bytes().to_vec(),
            unfreeze_balance: amount,
            resource: resource.code(),
        };
        let ext = self.call(paths::UNFREEZE_BALANCE_V2, &request).await?;
        check_ext("CreateUnfreezeV2", ext)
    }

    /// Build a delegation of `balance` SUN of staked resource to
    /// `receiver`, optionally locked for `lock_period` blocks
    pub async fn create_delegate_resource(
        &self,
        owner: &Address,
        receiver: &Address,
        resource: ResourceKind,
        balance: i64,
        lock_period: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_amount("delegated balance", balance)?;
        if lock_period < 0 {
            return Err(SdkError::InvalidArgument(format!(
                "lock period must be non-negative, got {}",
                lock_period
            )));
        }
        let request = DelegateResourceContract {
            owner_address: owner.as_bytes().to_vec(),
            receiver_address: receiver.as_bytes().to_vec(),
            resource: resource.code(),
            balance,
            lock: lock_period > 0,
            lock_period,
        };
        let ext = self.call(paths::DELEGATE_RESOURCE, &request).await?;
        check_ext("CreateDelegateResource", ext)
    }

    /// Build a reclaim of `balance` SUN of delegated resource
    pub async fn create_undelegate_resource(
        &self,
        owner: &Address,
        receiver: &Address,
        resource: ResourceKind,
        balance: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_amount("undelegated balance", balance)?;
        let request = UnDelegateResourceContract {
            owner_address: owner.as_bytes().to_vec(),
            receiver_address: receiver.as_bytes().to_vec(),
            resource: resource.code(),
            balance,
        };
        let ext = self.call(paths::UNDELEGATE_RESOURCE, &request).await?;
        check_ext("CreateUndelegateResource", ext)
    }

    /// Build a withdrawal of matured unfreezes
    pub async fn create_withdraw_expire_unfreeze(
        &self,
        owner: &Address,
    ) -> Result<TransactionExtention, SdkError> {
        let request = WithdrawExpireUnfreezeContract {
            owner_address: owner.as_bytes().to_vec(),
        };
        let ext = self.call(paths::WITHDRAW_EXPIRE_UNFREEZE, &request).await?;
        check_ext("CreateWithdrawExpireUnfreeze", ext)
    }

    /// Build a withdrawal of validator rewards
    pub async fn create_withdraw_balance(
        &self,
        owner: &Address,
    ) -> Result<TransactionExtention, SdkError> {
        let request = WithdrawBalanceContract {
            owner_address: owner.as_bytes().to_vec(),
        };
        let ext = self.call(paths::WITHDRAW_BALANCE, &request).await?;
        check_ext("CreateWithdrawBalance", ext)
    }

    /// Submit a signed transaction
    pub async fn broadcast_transaction(&self, tx: &Transaction) -> Result<Return, SdkError> {
        if tx.signature.is_empty() {
            return Err(SdkError::InvalidArgument(
                "cannot broadcast an unsigned transaction".to_string(),
            ));
        }
        self.call(paths::BROADCAST_TRANSACTION, tx).await
    }

    /// Confirmed transaction record by id; the record is zeroed while the
    /// transaction is unconfirmed
    pub async fn get_transaction_info_by_id(
        &self,
        txid: &[u8],
    ) -> Result<TransactionInfo, SdkError> {
        let request = BytesMessage {
            value: txid.to_vec(),
        };
        self.call(paths::GET_TRANSACTION_INFO_BY_ID, &request).await
    }

    /// Poll for the confirmed transaction record up to `max_attempts`
    /// times with a capped exponential backoff (≤ 1 s between attempts).
    pub async fn wait_for_transaction_info(
        &self,
        txid: &[u8],
        max_attempts: u32,
    ) -> Result<TransactionInfo, SdkError> {
        let mut delay = Duration::from_millis(100);
        for attempt in 0..max_attempts {
            if attempt > 0 {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(1));
            }
            let info = self.get_transaction_info_by_id(txid).await?;
            if info.block_number > 0 {
                return Ok(info);
            }
        }
        warn!(
            txid = %hex::encode(txid),
            attempts = max_attempts,
            "confirmation poll exhausted"
        );
        Err(SdkError::ConfirmationTimeout(max_attempts))
    }

    // ==================== contracts ====================

    /// Build a contract deployment. Constructor arguments require an ABI
    /// and are appended to the bytecode after encoding.
    pub async fn deploy_contract(
        &self,
        owner: &Address,
        params: &DeployParams,
    ) -> Result<TransactionExtention, SdkError> {
        validate_deploy(params)?;

        let abi = match &params.abi_json {
            Some(json) => Some(Abi::from_json(json)?),
            None => None,
        };
        let mut bytecode = params.bytecode.clone();
        if !params.constructor_args.is_empty() {
            let abi = abi.as_ref().ok_or_else(|| {
                SdkError::InvalidArgument(
                    "constructor arguments require an abi".to_string(),
                )
            })?;
            bytecode.extend(encode_constructor(abi, &params.constructor_args)?);
        }

        let request = CreateSmartContract {
            owner_address: owner.as_bytes().to_vec(),
            new_contract: Some(SmartContract {
                origin_address: owner.as_bytes().to_vec(),
                abi: abi.as_ref().map(Into::into),
                bytecode,
                call_value: params.call_value,
                consume_user_resource_percent: params.consume_user_resource_percent,
                name: params.name.clone(),
                origin_energy_limit: params.origin_energy_limit,
                ..Default::default()
            }),
            ..Default::default()
        };
        let ext = self.call(paths::DEPLOY_CONTRACT, &request).await?;
        check_ext("DeployContract", ext)
    }

    /// Build a contract invocation carrying encoded call `data`
    pub async fn trigger_contract(
        &self,
        owner: &Address,
        contract: &Address,
        data: Vec<u8>,
        call_value: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_call_data(&data)?;
        if call_value < 0 {
            return Err(SdkError::InvalidArgument(format!(
                "call value must be non-negative, got {}",
                call_value
            )));
        }
        let request = TriggerSmartContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
            call_value,
            data,
            ..Default::default()
        };
        let ext = self.call(paths::TRIGGER_CONTRACT, &request).await?;
        check_ext("TriggerContract", ext)
    }

    /// Run a read-only call / simulation against current state
    pub async fn trigger_constant_contract(
        &self,
        owner: &Address,
        contract: &Address,
        data: Vec<u8>,
        call_value: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_call_data(&data)?;
        let request = TriggerSmartContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
            call_value,
            data,
            ..Default::default()
        };
        let ext = self.call(paths::TRIGGER_CONSTANT_CONTRACT, &request).await?;
        check_ext("TriggerConstantContract", ext)
    }

    /// Deployed contract record
    pub async fn get_contract(&self, address: &Address) -> Result<SmartContract, SdkError> {
        let request = BytesMessage {
            value: address.as_bytes().to_vec(),
        };
        self.call(paths::GET_CONTRACT, &request).await
    }

    /// Deployed contract record plus runtime code
    pub async fn get_contract_info(
        &self,
        address: &Address,
    ) -> Result<SmartContractDataWrapper, SdkError> {
        let request = BytesMessage {
            value: address.as_bytes().to_vec(),
        };
        self.call(paths::GET_CONTRACT_INFO, &request).await
    }

    /// Fetch and parse the ABI stored on-chain for a contract
    pub async fn get_contract_abi(&self, address: &Address) -> Result<Abi, SdkError> {
        let contract = self.get_contract(address).await?;
        match contract.abi {
            Some(proto) if !proto.entrys.is_empty() => Ok(Abi::from(&proto)),
            _ => Err(SdkError::AbiUnavailable),
        }
    }

    /// Ask the node for the energy a call would require
    pub async fn estimate_energy(
        &self,
        owner: &Address,
        contract: &Address,
        data: Vec<u8>,
        call_value: i64,
    ) -> Result<EstimateEnergyMessage, SdkError> {
        check_call_data(&data)?;
        let request = TriggerSmartContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
            call_value,
            data,
            ..Default::default()
        };
        self.call(paths::ESTIMATE_ENERGY, &request).await
    }

    /// Build an update of `consume_user_resource_percent` for a contract
    pub async fn update_setting(
        &self,
        owner: &Address,
        contract: &Address,
        consume_user_resource_percent: i64,
    ) -> Result<TransactionExtention, SdkError> {
        check_percent(consume_user_resource_percent)?;
        let request = UpdateSettingContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
            consume_user_resource_percent,
        };
        let ext = self.call(paths::UPDATE_SETTING, &request).await?;
        check_ext("UpdateSetting", ext)
    }

    /// Build an update of `origin_energy_limit` for a contract
    pub async fn update_energy_limit(
        &self,
        owner: &Address,
        contract: &Address,
        origin_energy_limit: i64,
    ) -> Result<TransactionExtention, SdkError> {
        if origin_energy_limit <= 0 {
            return Err(SdkError::InvalidArgument(format!(
                "origin energy limit must be positive, got {}",
                origin_energy_limit
            )));
        }
        let request = UpdateEnergyLimitContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
            origin_energy_limit,
        };
        let ext = self.call(paths::UPDATE_ENERGY_LIMIT, &request).await?;
        check_ext("UpdateEnergyLimit", ext)
    }

    /// Build a removal of a contract's stored ABI
    pub async fn clear_contract_abi(
        &self,
        owner: &Address,
        contract: &Address,
    ) -> Result<TransactionExtention, SdkError> {
        let request = ClearAbiContract {
            owner_address: owner.as_bytes().to_vec(),
            contract_address: contract.as_bytes().to_vec(),
        };
        let ext = self.call(paths::CLEAR_CONTRACT_ABI, &request).await?;
        check_ext("ClearContractAbi", ext)
    }
}

fn check_amount(what: &str, amount: i64) -> Result<(), SdkError> {
    if amount <= 0 {
        return Err(SdkError::InvalidArgument(format!(
            "{} must be positive, got {}",
            what, amount
        )));
    }
    Ok(())
}

fn check_call_data(data: &[u8]) -> Result<(), SdkError> {
    if data.is_empty() {
        return Err(SdkError::InvalidArgument(
            "contract call data must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn check_percent(percent: i64) -> Result<(), SdkError> {
    if !(0..=100).contains(&percent) {
        return Err(SdkError::InvalidArgument(format!(
            "consume_user_resource_percent must be in [0, 100], got {}",
            percent
        )));
    }
    Ok(())
}

fn validate_deploy(params: &DeployParams) -> Result<(), SdkError> {
    if params.bytecode.is_empty() {
        return Err(SdkError::InvalidArgument(
            "contract bytecode must not be empty".to_string(),
        ));
    }
    if params.name.chars().any(char::is_control) {
        return Err(SdkError::InvalidArgument(
            "contract name must not contain control characters".to_string(),
        ));
    }
    if params.origin_energy_limit <= 0 {
        return Err(SdkError::InvalidArgument(format!(
            "origin energy limit must be positive, got {}",
            params.origin_energy_limit
        )));
    }
    check_percent(params.consume_user_resource_percent)?;
    if params.call_value < 0 {
        return Err(SdkError::InvalidArgument(format!(
            "call value must be non-negative, got {}",
            params.call_value
        )));
    }
    Ok(())
}

/// Accept a build envelope only when the node's result record agrees.
fn check_ext(
    operation: &'static str,
    ext: TransactionExtention,
) -> Result<TransactionExtention, SdkError> {
    match &ext.result {
        Some(ret) if ret.result => Ok(ext),
        Some(ret) => {
            let code = ResponseCode::try_from(ret.code)
                .map(|c| format!("{:?}", c))
                .unwrap_or_else(|_| format!("code {}", ret.code));
            Err(SdkError::NodeRejected {
                operation,
                code,
                message: ret.message_str(),
            })
        }
        None if ext.transaction.is_some() => Ok(ext),
        None => Err(SdkError::NilResult(operation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::Token;

    fn owner() -> Address {
        Address::from_base58("TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb").unwrap()
    }

    fn other() -> Address {
        Address::from_evm_bytes([0x33; 20])
    }

    fn ok_ext() -> TransactionExtention {
        TransactionExtention {
            transaction: Some(Transaction {
                raw_data: Some(Default::default()),
                ..Default::default()
            }),
            result: Some(Return {
                result: true,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_account_sends_native_address() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::GET_ACCOUNT, &Account::default());

        client.get_account(&owner()).await.unwrap();
        let sent: Account = mock.last_request(paths::GET_ACCOUNT).unwrap();
        assert_eq!(sent.address, owner().as_bytes().to_vec());
        assert_eq!(sent.address[0], 0x41);
    }

    #[tokio::test]
    async fn test_create_transfer_validations_precede_rpc() {
        let (client, mock) = Client::new_mock();

        assert!(client.create_transfer(&owner(), &other(), 0).await.is_err());
        assert!(client.create_transfer(&owner(), &other(), -5).await.is_err());
        assert!(client.create_transfer(&owner(), &owner(), 10).await.is_err());
        // nothing reached the transport
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_transfer_decodes_extention() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::CREATE_TRANSACTION, &ok_ext());

        let ext = client.create_transfer(&owner(), &other(), 10).await.unwrap();
        assert!(ext.transaction.is_some());

        let sent: TransferContract = mock.last_request(paths::CREATE_TRANSACTION).unwrap();
        assert_eq!(sent.amount, 10);
        assert_eq!(sent.owner_address, owner().as_bytes().to_vec());
        assert_eq!(sent.to_address, other().as_bytes().to_vec());
    }

    #[tokio::test]
    async fn test_node_rejection_is_wrapped() {
        let (client, mock) = Client::new_mock();
        mock.push_response(
            paths::CREATE_TRANSACTION,
            &TransactionExtention {
                result: Some(Return {
                    result: false,
                    code: ResponseCode::ContractValidateError as i32,
                    message: b"account not found".to_vec(),
                }),
                ..Default::default()
            },
        );

        let err = client
            .create_transfer(&owner(), &other(), 10)
            .await
            .unwrap_err();
        match err {
            SdkError::NodeRejected { operation, code, message } => {
                assert_eq!(operation, "CreateTransfer");
                assert!(code.contains("ContractValidateError"));
                assert_eq!(message, "account not found");
            }
            other => panic!("expected NodeRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delegate_lock_flag_follows_period() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::DELEGATE_RESOURCE, &ok_ext());
        mock.push_response(paths::DELEGATE_RESOURCE, &ok_ext());

        client
            .create_delegate_resource(&owner(), &other(), ResourceKind::Energy, 1_000_000, 0)
            .await
            .unwrap();
        let unlocked: DelegateResourceContract =
            mock.last_request(paths::DELEGATE_RESOURCE).unwrap();
        assert!(!unlocked.lock);
        assert_eq!(unlocked.resource, 1);

        client
            .create_delegate_resource(&owner(), &other(), ResourceKind::Energy, 1_000_000, 600)
            .await
            .unwrap();
        let locked: DelegateResourceContract =
            mock.last_request(paths::DELEGATE_RESOURCE).unwrap();
        assert!(locked.lock);
        assert_eq!(locked.lock_period, 600);
    }

    #[tokio::test]
    async fn test_broadcast_requires_signature() {
        let (client, mock) = Client::new_mock();
        let unsigned = Transaction::default();
        assert!(client.broadcast_transaction(&unsigned).await.is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_wait_for_transaction_info_polls() {
        let (client, mock) = Client::new_mock();
        // two unconfirmed replies, then a confirmed one
        mock.push_response(paths::GET_TRANSACTION_INFO_BY_ID, &TransactionInfo::default());
        mock.push_response(paths::GET_TRANSACTION_INFO_BY_ID, &TransactionInfo::default());
        mock.push_response(
            paths::GET_TRANSACTION_INFO_BY_ID,
            &TransactionInfo {
                id: vec![0xaa; 32],
                block_number: 1234,
                ..Default::default()
            },
        );

        let info = client
            .wait_for_transaction_info(&[0xaa; 32], 5)
            .await
            .unwrap();
        assert_eq!(info.block_number, 1234);
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_transaction_info_times_out() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::GET_TRANSACTION_INFO_BY_ID, &TransactionInfo::default());
        mock.push_response(paths::GET_TRANSACTION_INFO_BY_ID, &TransactionInfo::default());

        let err = client
            .wait_for_transaction_info(&[0xaa; 32], 2)
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::ConfirmationTimeout(2)));
    }

    #[tokio::test]
    async fn test_deploy_validations() {
        let (client, mock) = Client::new_mock();

        let no_code = DeployParams::default();
        assert!(client.deploy_contract(&owner(), &no_code).await.is_err());

        let bad_name = DeployParams {
            name: "bad\u{0007}name".to_string(),
            bytecode: vec![0x60],
            ..Default::default()
        };
        assert!(client.deploy_contract(&owner(), &bad_name).await.is_err());

        let bad_percent = DeployParams {
            name: "ok".to_string(),
            bytecode: vec![0x60],
            consume_user_resource_percent: 101,
            ..Default::default()
        };
        assert!(client.deploy_contract(&owner(), &bad_percent).await.is_err());

        let args_without_abi = DeployParams {
            name: "ok".to_string(),
            bytecode: vec![0x60],
            constructor_args: vec![Token::uint(1u64)],
            ..Default::default()
        };
        assert!(client
            .deploy_contract(&owner(), &args_without_abi)
            .await
            .is_err());

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_appends_constructor_args() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::DEPLOY_CONTRACT, &ok_ext());

        let params = DeployParams {
            name: "Token".to_string(),
            bytecode: vec![0x60, 0x80],
            abi_json: Some(
                r#"[{"type":"constructor","inputs":[{"name":"supply","type":"uint256"}]}]"#
                    .to_string(),
            ),
            constructor_args: vec![Token::uint(1000u64)],
            ..Default::default()
        };
        client.deploy_contract(&owner(), &params).await.unwrap();

        let sent: CreateSmartContract = mock.last_request(paths::DEPLOY_CONTRACT).unwrap();
        let contract = sent.new_contract.unwrap();
        // bytecode followed by the 32-byte encoded supply
        assert_eq!(contract.bytecode.len(), 2 + 32);
        assert_eq!(&contract.bytecode[..2], &[0x60, 0x80]);
        assert_eq!(contract.bytecode[2 + 31], 0xe8);
        assert_eq!(contract.name, "Token");
    }

    #[tokio::test]
    async fn test_trigger_requires_data() {
        let (client, mock) = Client::new_mock();
        assert!(client
            .trigger_contract(&owner(), &other(), vec![], 0)
            .await
            .is_err());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_contract_abi_unavailable() {
        let (client, mock) = Client::new_mock();
        mock.push_response(paths::GET_CONTRACT, &SmartContract::default());
        assert!(matches!(
            client.get_contract_abi(&other()).await,
            Err(SdkError::AbiUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_update_setting_percent_range() {
        let (client, mock) = Client::new_mock();
        assert!(client.update_setting(&owner(), &other(), -1).await.is_err());
        assert!(client.update_setting(&owner(), &other(), 101).await.is_err());
        assert!(mock.requests().is_empty());
    }
}
