//! Staged transaction pipeline: build → sign → broadcast → confirm, with
//! every failure absorbed into the receipt instead of returned per stage.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use trx_primitives::Address;
use trx_proto::{Transaction, TransactionExtention, TransactionInfo};

use crate::client::Client;
use crate::signer::Signer;
use crate::types::{DeployParams, ResourceKind};
use crate::SdkError;

/// Default fee limit in SUN applied when none is set
pub const DEFAULT_FEE_LIMIT: i64 = 100_000_000;
/// Default expiration window in seconds
pub const DEFAULT_EXPIRATION_SECS: i64 = 60;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Nothing built yet
    #[default]
    Empty,
    /// A raw body is attached
    Built,
    /// The body carries at least one signature
    Signed,
    /// The node acknowledged the broadcast
    Broadcast,
    /// A confirmed transaction record was fetched
    Confirmed,
    /// A stage failed; all further stages are no-ops
    Errored,
}

/// Receipt accumulated across the pipeline stages
#[derive(Debug, Clone, Default)]
pub struct TxReceipt {
    /// Canonical transaction id (hex), set once a raw body exists
    pub txid: String,
    /// Whether the node accepted the broadcast; meaningful only after it
    pub accepted: bool,
    /// The node's broadcast message
    pub message: String,
    /// Accumulated errors, `; `-joined; non-empty means the pipeline failed
    pub error: String,
}

impl TxReceipt {
    /// Whether any stage has failed
    pub fn is_err(&self) -> bool {
        !self.error.is_empty()
    }
}

/// A transaction moving through build → sign → broadcast → confirm.
///
/// Stages return `&mut Self` for chaining and never return errors: the
/// first failure moves the pipeline to [`Stage::Errored`] and every
/// subsequent stage leaves it untouched. A single handle is a linear
/// builder and is not meant for concurrent mutation; immutable
/// collaborators (client, signer, addresses) are freely shared.
pub struct TransactionHandle {
    client: Arc<Client>,
    owner: Option<Address>,
    tx: Option<Transaction>,
    info: Option<TransactionInfo>,
    receipt: TxReceipt,
    stage: Stage,
}

impl TransactionHandle {
    /// Fresh pipeline bound to a client. The owner must be set explicitly
    /// before any build stage.
    pub fn new(client: Arc<Client>) -> Self {
        TransactionHandle {
            client,
            owner: None,
            tx: None,
            info: None,
            receipt: TxReceipt::default(),
            stage: Stage::Empty,
        }
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The receipt accumulated so far
    pub fn receipt(&self) -> &TxReceipt {
        &self.receipt
    }

    /// The in-flight transaction envelope, if built
    pub fn transaction(&self) -> Option<&Transaction> {
        self.tx.as_ref()
    }

    /// The confirmed record, if the confirm stage succeeded
    pub fn info(&self) -> Option<&TransactionInfo> {
        self.info.as_ref()
    }

    /// Whether the pipeline is in the error state
    pub fn errored(&self) -> bool {
        self.stage == Stage::Errored
    }

    /// Record the owner for subsequent build stages
    pub fn set_owner(&mut self, owner: Address) -> &mut Self {
        if self.errored() {
            return self;
        }
        self.owner = Some(owner);
        self
    }

    /// Append an error to the receipt and halt the pipeline. Setting an
    /// empty message changes nothing; an error can never be cleared.
    pub fn set_error(&mut self, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        if message.is_empty() {
            return self;
        }
        if !self.receipt.error.is_empty() {
            self.receipt.error.push_str("; ");
        }
        self.receipt.error.push_str(&message);
        self.stage = Stage::Errored;
        self
    }

    fn fail(&mut self, error: SdkError) -> &mut Self {
        warn!(stage = ?self.stage, %error, "transaction pipeline error");
        self.set_error(error.to_string())
    }

    fn owner_or_fail(&mut self) -> Option<Address> {
        if self.owner.is_none() {
            self.fail(SdkError::InvalidAddress(
                "owner address must be set before building".to_string(),
            ));
        }
        self.owner.clone()
    }

    // ==================== build stages ====================

    /// Build a TRX transfer of `amount` SUN to `to`
    pub async fn transfer(&mut self, to: &Address, amount: i64) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.create_transfer(&owner, to, amount).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a freeze of `amount` SUN for a resource grant
    pub async fn freeze(&mut self, amount: i64, resource: ResourceKind) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.create_freeze_v2(&owner, amount, resource).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build an unfreeze of `amount` SUN from a resource grant
    pub async fn unfreeze(&mut self, amount: i64, resource: ResourceKind) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.create_unfreeze_v2(&owner, amount, resource).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a delegation of staked resource, optionally locked for
    /// `lock_period` blocks
    pub async fn delegate(
        &mut self,
        receiver: &Address,
        resource: ResourceKind,
        balance: i64,
        lock_period: i64,
    ) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self
            .client
            .create_delegate_resource(&owner, receiver, resource, balance, lock_period)
            .await
        {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a reclaim of delegated resource
    pub async fn undelegate(
        &mut self,
        receiver: &Address,
        resource: ResourceKind,
        balance: i64,
    ) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self
            .client
            .create_undelegate_resource(&owner, receiver, resource, balance)
            .await
        {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a withdrawal of matured unfreezes
    pub async fn withdraw_expired(&mut self) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.create_withdraw_expire_unfreeze(&owner).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a withdrawal of validator rewards
    pub async fn withdraw_rewards(&mut self) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.create_withdraw_balance(&owner).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a contract deployment
    pub async fn deploy(&mut self, params: &DeployParams) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self.client.deploy_contract(&owner, params).await {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    /// Build a contract invocation with already-encoded call data
    pub async fn trigger(
        &mut self,
        contract: &Address,
        data: Vec<u8>,
        call_value: i64,
    ) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(owner) = self.owner_or_fail() else {
            return self;
        };
        match self
            .client
            .trigger_contract(&owner, contract, data, call_value)
            .await
        {
            Ok(ext) => self.attach(ext),
            Err(e) => self.fail(e),
        }
    }

    fn attach(&mut self, ext: TransactionExtention) -> &mut Self {
        let Some(tx) = ext.transaction else {
            return self.fail(SdkError::NilResult("transaction build"));
        };
        if tx.raw_data.is_none() {
            return self.fail(SdkError::NilResult("transaction raw body"));
        }
        self.tx = Some(tx);
        self.stage = Stage::Built;
        self.set_default_options()
    }

    // ==================== options ====================

    /// Set the fee limit in SUN; non-positive values fall back to the
    /// default of 100,000,000
    pub fn set_fee_limit(&mut self, fee_limit: i64) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(raw) = self.tx.as_mut().and_then(|tx| tx.raw_data.as_mut()) else {
            return self.fail(SdkError::InvalidArgument(
                "no transaction built to set a fee limit on".to_string(),
            ));
        };
        raw.fee_limit = if fee_limit <= 0 {
            DEFAULT_FEE_LIMIT
        } else {
            fee_limit
        };
        self.refresh_txid();
        self
    }

    /// Set the expiration to now + `seconds`; non-positive values fall
    /// back to the default of 60 s
    pub fn set_expiration(&mut self, seconds: i64) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(raw) = self.tx.as_mut().and_then(|tx| tx.raw_data.as_mut()) else {
            return self.fail(SdkError::InvalidArgument(
                "no transaction built to set an expiration on".to_string(),
            ));
        };
        let seconds = if seconds <= 0 {
            DEFAULT_EXPIRATION_SECS
        } else {
            seconds
        };
        raw.expiration = now_millis() + seconds * 1000;
        self.refresh_txid();
        self
    }

    /// Idempotently apply both defaults: fee limit and expiration are
    /// filled in only where the raw body carries none.
    pub fn set_default_options(&mut self) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(raw) = self.tx.as_mut().and_then(|tx| tx.raw_data.as_mut()) else {
            return self.fail(SdkError::InvalidArgument(
                "no transaction built to apply defaults to".to_string(),
            ));
        };
        if raw.fee_limit <= 0 {
            raw.fee_limit = DEFAULT_FEE_LIMIT;
        }
        if raw.expiration <= 0 {
            raw.expiration = now_millis() + DEFAULT_EXPIRATION_SECS * 1000;
        }
        // the active permission is the signing default; stamping it here
        // keeps the id stable across the default sign stage
        if let Some(contract) = raw.contract.first_mut() {
            if contract.permission_id == 0 {
                contract.permission_id = crate::signer::PERMISSION_ACTIVE;
            }
        }
        self.refresh_txid();
        self
    }

    fn refresh_txid(&mut self) {
        if let Some(tx) = &self.tx {
            self.receipt.txid = hex::encode(Signer::tx_hash(tx).as_bytes());
        }
    }

    // ==================== sign / broadcast / confirm ====================

    /// Sign the built body at the active permission (id 2), replacing any
    /// existing signatures
    pub fn sign(&mut self, signer: &Signer) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(tx) = self.tx.take() else {
            return self.fail(SdkError::Signing(
                "no transaction built to sign".to_string(),
            ));
        };
        match signer.sign_tx(tx) {
            Ok(signed) => {
                self.tx = Some(signed);
                self.stage = Stage::Signed;
                self.refresh_txid();
                self
            }
            Err(e) => self.fail(e),
        }
    }

    /// Sign at an explicit permission id, appending to the signature list
    pub fn multi_sign(&mut self, signer: &Signer, permission_id: i32) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(tx) = self.tx.take() else {
            return self.fail(SdkError::Signing(
                "no transaction built to sign".to_string(),
            ));
        };
        match signer.multi_sign_tx(tx, permission_id) {
            Ok(signed) => {
                self.tx = Some(signed);
                self.stage = Stage::Signed;
                self.refresh_txid();
                self
            }
            Err(e) => self.fail(e),
        }
    }

    /// Broadcast the signed transaction and record the node's verdict on
    /// the receipt. A node rejection appends to the error, it does not
    /// overwrite earlier context.
    pub async fn broadcast(&mut self) -> &mut Self {
        if self.errored() {
            return self;
        }
        let Some(tx) = self.tx.clone() else {
            return self.fail(SdkError::InvalidArgument(
                "no transaction built to broadcast".to_string(),
            ));
        };
        if self.receipt.txid.is_empty() {
            self.refresh_txid();
        }
        match self.client.broadcast_transaction(&tx).await {
            Ok(ret) => {
                self.receipt.accepted = ret.result;
                self.receipt.message = ret.message_str();
                if ret.result {
                    self.stage = Stage::Broadcast;
                    self
                } else {
                    warn!(txid = %self.receipt.txid, code = ret.code, "broadcast rejected");
                    self.set_error(format!(
                        "broadcast rejected: code {} {}",
                        ret.code,
                        ret.message_str()
                    ))
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Poll for the confirmed transaction record, up to `max_attempts`
    /// times
    pub async fn confirm(&mut self, max_attempts: u32) -> &mut Self {
        if self.errored() {
            return self;
        }
        let txid = match hex::decode(&self.receipt.txid) {
            Ok(bytes) if !bytes.is_empty() => bytes,
            _ => {
                return self.fail(SdkError::InvalidArgument(
                    "no transaction id to confirm".to_string(),
                ));
            }
        };
        match self
            .client
            .wait_for_transaction_info(&txid, max_attempts)
            .await
        {
            Ok(info) => {
                self.info = Some(info);
                self.stage = Stage::Confirmed;
                self
            }
            Err(e) => self.fail(e),
        }
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
