//! Contract binding: an ABI bound to an address and a client, with
//! build-once selector caches and invoke/query/simulate operations.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use primitive_types::U256;

use trx_primitives::{parse_units, Address};

use crate::abi::{
    decode_event_log, decode_input, decode_result, encode_call, topic_hash, Abi, Entry,
    EntryKind, Token,
};
use crate::client::Client;
use crate::tx::TransactionHandle;
use crate::types::{DecodedCall, DecodedEvent, Simulation};
use crate::SdkError;

const TRC20_ABI: &str = r#"[
    {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
    {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"balanceOf","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"approve","inputs":[{"name":"spender","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"allowance","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transferFrom","inputs":[{"name":"from","type":"address"},{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256"}]},
    {"type":"event","name":"Approval","inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256"}]}
]"#;

/// An ABI bound to a contract address and a client.
///
/// The binding owns two lazy caches keyed off the event signature hash:
/// full 32-byte topic → entry and first-4-bytes → entry. Both are built on
/// first access under a once-guard and never invalidated; the ABI is
/// immutable for the binding's lifetime.
pub struct Contract {
    client: Arc<Client>,
    address: Address,
    abi: Abi,
    topic_cache: OnceLock<HashMap<[u8; 32], usize>>,
    prefix_cache: OnceLock<HashMap<[u8; 4], usize>>,
}

impl Contract {
    /// Bind a parsed ABI to an address
    pub fn from_abi(client: Arc<Client>, address: Address, abi: Abi) -> Self {
        Contract {
            client,
            address,
            abi,
            topic_cache: OnceLock::new(),
            prefix_cache: OnceLock::new(),
        }
    }

    /// Bind an ABI given as a JSON string
    pub fn from_json(
        client: Arc<Client>,
        address: Address,
        abi_json: &str,
    ) -> Result<Self, SdkError> {
        let abi = Abi::from_json(abi_json)?;
        Ok(Self::from_abi(client, address, abi))
    }

    /// Bind by fetching the ABI stored on-chain. Fails with
    /// [`SdkError::AbiUnavailable`] when the node has none for the address.
    pub async fn fetch(client: Arc<Client>, address: Address) -> Result<Self, SdkError> {
        let abi = client.get_contract_abi(&address).await?;
        Ok(Self::from_abi(client, address, abi))
    }

    /// Binding with the standard TRC-20 interface
    pub fn trc20(client: Arc<Client>, address: Address) -> Self {
        let abi = Abi::from_json(TRC20_ABI).expect("static TRC-20 abi parses");
        Self::from_abi(client, address, abi)
    }

    /// The bound address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The bound ABI
    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    fn topic_cache(&self) -> &HashMap<[u8; 32], usize> {
        self.topic_cache.get_or_init(|| {
            let mut map = HashMap::new();
            for (i, entry) in self.abi.entries.iter().enumerate() {
                if entry.kind != EntryKind::Event {
                    continue;
                }
                let mut key = [0u8; 32];
                key.copy_from_slice(topic_hash(&entry.signature()).as_bytes());
                // on a collision the first entry in declaration order wins
                map.entry(key).or_insert(i);
            }
            map
        })
    }

    fn prefix_cache(&self) -> &HashMap<[u8; 4], usize> {
        self.prefix_cache.get_or_init(|| {
            let mut map = HashMap::new();
            for (i, entry) in self.abi.entries.iter().enumerate() {
                if entry.kind != EntryKind::Event {
                    continue;
                }
                let hash = topic_hash(&entry.signature());
                let mut key = [0u8; 4];
                key.copy_from_slice(&hash.as_bytes()[..4]);
                map.entry(key).or_insert(i);
            }
            map
        })
    }

    fn event_for_topic(&self, topic: &[u8]) -> Option<&Entry> {
        if topic.len() != 32 {
            return None;
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(topic);
        self.topic_cache().get(&key).map(|&i| &self.abi.entries[i])
    }

    // ==================== codec delegation ====================

    /// Encode a call; the empty string means the constructor
    pub fn encode_call(&self, method: &str, args: &[Token]) -> Result<Vec<u8>, SdkError> {
        encode_call(&self.abi, method, args)
    }

    /// Decode the return data of `method`
    pub fn decode_result(&self, method: &str, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        let entry = self
            .abi
            .function(method)
            .ok_or_else(|| SdkError::MethodNotFound(method.to_string()))?;
        decode_result(entry, data)
    }

    /// Decode selector-prefixed input data; an unknown selector yields the
    /// `unknown(<hex>)` placeholder
    pub fn decode_input(&self, data: &[u8]) -> Result<DecodedCall, SdkError> {
        decode_input(&self.abi, data)
    }

    /// Decode an emitted log. An unknown signature topic is not an error:
    /// the result names the event `unknown(0x<first 4 bytes>)` with no
    /// parameters.
    pub fn decode_event_log(
        &self,
        topics: &[Vec<u8>],
        data: &[u8],
    ) -> Result<DecodedEvent, SdkError> {
        let signature_topic = topics
            .first()
            .ok_or_else(|| SdkError::AbiDecode("log carries no topics".to_string()))?;
        match self.event_for_topic(signature_topic) {
            Some(entry) => decode_event_log(entry, topics, data),
            None => Ok(DecodedEvent {
                name: format!(
                    "unknown(0x{})",
                    hex::encode(&signature_topic[..signature_topic.len().min(4)])
                ),
                params: Vec::new(),
            }),
        }
    }

    /// Resolve an event name from the first 4 bytes of its signature hash
    pub fn decode_event_signature(&self, prefix: &[u8]) -> String {
        if prefix.len() >= 4 {
            let mut key = [0u8; 4];
            key.copy_from_slice(&prefix[..4]);
            if let Some(&i) = self.prefix_cache().get(&key) {
                return self.abi.entries[i].name.clone();
            }
        }
        format!(
            "unknown(0x{})",
            hex::encode(&prefix[..prefix.len().min(4)])
        )
    }

    // ==================== node operations ====================

    /// Build a state-changing invocation, returning a pipeline staged at
    /// Built (or Errored, with the cause on its receipt).
    pub async fn invoke(
        &self,
        owner: &Address,
        call_value: i64,
        method: &str,
        args: &[Token],
    ) -> TransactionHandle {
        let mut handle = TransactionHandle::new(Arc::clone(&self.client));
        handle.set_owner(owner.clone());
        match self.encode_call(method, args) {
            Ok(data) => {
                handle.trigger(&self.address, data, call_value).await;
            }
            Err(e) => {
                handle.set_error(e.to_string());
            }
        }
        handle
    }

    /// Run a read-only call and decode its return
    pub async fn query(
        &self,
        owner: &Address,
        method: &str,
        args: &[Token],
    ) -> Result<Vec<Token>, SdkError> {
        let data = self.encode_call(method, args)?;
        let ext = self
            .client
            .trigger_constant_contract(owner, &self.address, data, 0)
            .await?;
        let bytes: Vec<u8> = ext.constant_result.into_iter().flatten().collect();
        if bytes.is_empty() {
            return Err(SdkError::NilResult("constant call"));
        }
        self.decode_result(method, &bytes)
    }

    /// Run a simulation: decoded return values plus the node-reported
    /// energy use, result record and would-be event logs
    pub async fn simulate(
        &self,
        owner: &Address,
        call_value: i64,
        method: &str,
        args: &[Token],
    ) -> Result<Simulation, SdkError> {
        let data = self.encode_call(method, args)?;
        let ext = self
            .client
            .trigger_constant_contract(owner, &self.address, data, call_value)
            .await?;
        let bytes: Vec<u8> = ext.constant_result.iter().flatten().copied().collect();
        let values = if bytes.is_empty() {
            Vec::new()
        } else {
            self.decode_result(method, &bytes)?
        };
        Ok(Simulation {
            values,
            energy_used: ext.energy_used,
            result: ext.result,
            logs: ext.logs,
        })
    }

    /// Decode every log a confirmed execution emitted from this contract.
    /// Logs of other contracts are skipped; logs with signatures outside
    /// the ABI surface as `unknown(...)` placeholders.
    pub fn decode_logs(
        &self,
        logs: &[trx_proto::api::transaction_info::Log],
    ) -> Result<Vec<DecodedEvent>, SdkError> {
        logs.iter()
            .filter(|log| log.address == self.address.as_bytes() || log.address == self.address.evm_bytes())
            .map(|log| self.decode_event_log(&log.topics, &log.data))
            .collect()
    }

    // ==================== TRC-20 helpers ====================

    /// `name()` of a TRC-20 token
    pub async fn trc20_name(&self, owner: &Address) -> Result<String, SdkError> {
        self.query_string(owner, "name").await
    }

    /// `symbol()` of a TRC-20 token
    pub async fn trc20_symbol(&self, owner: &Address) -> Result<String, SdkError> {
        self.query_string(owner, "symbol").await
    }

    /// `decimals()` of a TRC-20 token
    pub async fn trc20_decimals(&self, owner: &Address) -> Result<u32, SdkError> {
        let value = self.query_uint(owner, "decimals", &[]).await?;
        u32::try_from(value.as_u64())
            .map_err(|_| SdkError::AbiDecode("decimals out of range".to_string()))
    }

    /// `balanceOf(holder)` of a TRC-20 token
    pub async fn trc20_balance_of(
        &self,
        owner: &Address,
        holder: &Address,
    ) -> Result<U256, SdkError> {
        self.query_uint(owner, "balanceOf", &[Token::Address(holder.clone())])
            .await
    }

    /// `allowance(holder, spender)` of a TRC-20 token
    pub async fn trc20_allowance(
        &self,
        owner: &Address,
        holder: &Address,
        spender: &Address,
    ) -> Result<U256, SdkError> {
        self.query_uint(
            owner,
            "allowance",
            &[Token::Address(holder.clone()), Token::Address(spender.clone())],
        )
        .await
    }

    /// Build a `transfer(to, amount)` invocation of a TRC-20 token
    pub async fn trc20_transfer(
        &self,
        owner: &Address,
        to: &Address,
        amount: U256,
    ) -> TransactionHandle {
        self.invoke(
            owner,
            0,
            "transfer",
            &[Token::Address(to.clone()), Token::Uint(amount)],
        )
        .await
    }

    /// Build a `transfer` of a decimal token amount (e.g. `"1.5"`), scaled
    /// by the token's `decimals()` with integer arithmetic only
    pub async fn trc20_transfer_decimal(
        &self,
        owner: &Address,
        to: &Address,
        amount: &str,
    ) -> Result<TransactionHandle, SdkError> {
        let decimals = self.trc20_decimals(owner).await?;
        let scaled = parse_units(amount, decimals)
            .map_err(|e| SdkError::InvalidArgument(e.to_string()))?;
        Ok(self.trc20_transfer(owner, to, U256::from(scaled)).await)
    }

    /// Build an `approve(spender, amount)` invocation of a TRC-20 token
    pub async fn trc20_approve(
        &self,
        owner: &Address,
        spender: &Address,
        amount: U256,
    ) -> TransactionHandle {
        self.invoke(
            owner,
            0,
            "approve",
            &[Token::Address(spender.clone()), Token::Uint(amount)],
        )
        .await
    }

    async fn query_string(&self, owner: &Address, method: &str) -> Result<String, SdkError> {
        match single(self.query(owner, method, &[]).await?)? {
            Token::String(s) => Ok(s),
            other => Err(SdkError::AbiDecode(format!(
                "expected a string from {}, got {:?}",
                method, other
            ))),
        }
    }

    async fn query_uint(
        &self,
        owner: &Address,
        method: &str,
        args: &[Token],
    ) -> Result<U256, SdkError> {
        match single(self.query(owner, method, args).await?)? {
            Token::Uint(u) => Ok(u),
            other => Err(SdkError::AbiDecode(format!(
                "expected an integer from {}, got {:?}",
                method, other
            ))),
        }
    }
}

fn single(mut tokens: Vec<Token>) -> Result<Token, SdkError> {
    if tokens.len() != 1 {
        return Err(SdkError::AbiDecode(format!(
            "expected a single return value, got {}",
            tokens.len()
        )));
    }
    Ok(tokens.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode_params;
    use crate::abi::ParamType;

    fn binding() -> Contract {
        let (client, _mock) = Client::new_mock();
        Contract::trc20(client, Address::from_evm_bytes([0x11; 20]))
    }

    #[test]
    fn test_event_caches_build_once() {
        let contract = binding();
        let first = contract.topic_cache() as *const _;
        let second = contract.topic_cache() as *const _;
        assert_eq!(first, second);
        assert_eq!(contract.topic_cache().len(), 2);
        assert_eq!(contract.prefix_cache().len(), 2);
    }

    #[test]
    fn test_topic_cache_resolves_transfer() {
        let contract = binding();
        let topic = topic_hash("Transfer(address,address,uint256)");
        let entry = contract.event_for_topic(topic.as_bytes()).unwrap();
        assert_eq!(entry.name, "Transfer");
    }

    #[test]
    fn test_decode_event_signature_prefix() {
        let contract = binding();
        let topic = topic_hash("Approval(address,address,uint256)");
        assert_eq!(
            contract.decode_event_signature(&topic.as_bytes()[..4]),
            "Approval"
        );
        assert_eq!(
            contract.decode_event_signature(&[0xde, 0xad, 0xbe, 0xef]),
            "unknown(0xdeadbeef)"
        );
    }

    #[test]
    fn test_decode_unknown_event_is_placeholder() {
        let contract = binding();
        let decoded = contract
            .decode_event_log(&[vec![0xab; 32]], &[])
            .unwrap();
        assert!(decoded.name.starts_with("unknown(0xabababab"));
        assert!(decoded.params.is_empty());
    }

    #[test]
    fn test_decode_event_log_via_cache() {
        let contract = binding();
        let from = Address::from_evm_bytes([0x01; 20]);
        let to = Address::from_evm_bytes([0x02; 20]);

        let mut from_topic = vec![0u8; 12];
        from_topic.extend_from_slice(from.evm_bytes());
        let mut to_topic = vec![0u8; 12];
        to_topic.extend_from_slice(to.evm_bytes());
        let topics = vec![
            topic_hash("Transfer(address,address,uint256)").as_bytes().to_vec(),
            from_topic,
            to_topic,
        ];
        let data = encode_params(&[ParamType::Uint(256)], &[Token::uint(7u64)]).unwrap();

        let event = contract.decode_event_log(&topics, &data).unwrap();
        assert_eq!(event.name, "Transfer");
        assert_eq!(event.params[2].value, Token::uint(7u64));
    }

    #[test]
    fn test_encode_call_delegates() {
        let contract = binding();
        let to = Address::from_evm_bytes([0x02; 20]);
        let data = contract
            .encode_call("transfer", &[Token::Address(to), Token::uint(5u64)])
            .unwrap();
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_decode_logs_filters_by_address() {
        use trx_proto::api::transaction_info::Log;

        let contract = binding();
        let topic = topic_hash("Transfer(address,address,uint256)").as_bytes().to_vec();
        let mut from_topic = vec![0u8; 12];
        from_topic.extend_from_slice(&[0x01; 20]);
        let mut to_topic = vec![0u8; 12];
        to_topic.extend_from_slice(&[0x02; 20]);
        let data = encode_params(&[ParamType::Uint(256)], &[Token::uint(3u64)]).unwrap();

        let matching = Log {
            address: contract.address().as_bytes().to_vec(),
            topics: vec![topic.clone(), from_topic.clone(), to_topic.clone()],
            data: data.clone(),
        };
        let foreign = Log {
            address: vec![0x41; 21],
            topics: vec![topic, from_topic, to_topic],
            data,
        };

        let events = contract.decode_logs(&[matching, foreign]).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Transfer");
    }

    #[test]
    fn test_decode_result_unknown_method() {
        let contract = binding();
        assert!(matches!(
            contract.decode_result("nope", &[]),
            Err(SdkError::MethodNotFound(_))
        ));
    }
}
