//! RPC façade tests over the mock transport: account, block and contract
//! admin verbs, request shapes and validation.

use trx_primitives::Address;
use trx_proto::chain::block_header;
use trx_proto::{
    paths, Account, AccountNetMessage, AccountResourceMessage, Block, BlockHeader,
    BytesMessage, ClearAbiContract, EstimateEnergyMessage, NumberMessage, Return,
    SmartContract, SmartContractDataWrapper, Transaction, TransactionExtention,
    TriggerSmartContract, UpdateEnergyLimitContract, UpdateSettingContract,
};
use trx_sdk::{Client, PoolConfig, SdkError};

fn owner() -> Address {
    Address::from_base58("TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb").unwrap()
}

fn contract() -> Address {
    Address::from_evm_bytes([0x55; 20])
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
async fn test_get_account_decodes_record() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::GET_ACCOUNT,
        &Account {
            address: owner().as_bytes().to_vec(),
            balance: 123_000_000,
            ..Default::default()
        },
    );

    let account = client.get_account(&owner()).await.unwrap();
    assert_eq!(account.balance, 123_000_000);
    assert_eq!(account.address, owner().as_bytes().to_vec());
}

#[tokio::test]
async fn test_get_account_net_and_resource() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::GET_ACCOUNT_NET,
        &AccountNetMessage {
            free_net_used: 120,
            free_net_limit: 600,
            ..Default::default()
        },
    );
    mock.push_response(
        paths::GET_ACCOUNT_RESOURCE,
        &AccountResourceMessage {
            energy_limit: 50_000,
            energy_used: 1_500,
            ..Default::default()
        },
    );

    let net = client.get_account_net(&owner()).await.unwrap();
    assert_eq!(net.free_net_limit, 600);

    let resource = client.get_account_resource(&owner()).await.unwrap();
    assert_eq!(resource.energy_limit, 50_000);

    // both verbs address the account by its native form
    let sent: Account = mock.last_request(paths::GET_ACCOUNT_RESOURCE).unwrap();
    assert_eq!(sent.address[0], 0x41);
}

#[tokio::test]
async fn test_get_now_block() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::GET_NOW_BLOCK,
        &Block {
            block_header: Some(BlockHeader {
                raw_data: Some(block_header::Raw {
                    number: 68_000_123,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
    );

    let block = client.get_now_block().await.unwrap();
    let number = block
        .block_header
        .and_then(|h| h.raw_data)
        .map(|r| r.number)
        .unwrap();
    assert_eq!(number, 68_000_123);
}

#[tokio::test]
async fn test_get_block_by_num_validates_and_encodes() {
    let (client, mock) = Client::new_mock();

    assert!(client.get_block_by_num(-1).await.is_err());
    assert!(mock.requests().is_empty());

    mock.push_response(paths::GET_BLOCK_BY_NUM, &Block::default());
    client.get_block_by_num(42).await.unwrap();
    let sent: NumberMessage = mock.last_request(paths::GET_BLOCK_BY_NUM).unwrap();
    assert_eq!(sent.num, 42);
}

#[tokio::test]
async fn test_estimate_energy() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::ESTIMATE_ENERGY,
        &EstimateEnergyMessage {
            result: Some(Return {
                result: true,
                ..Default::default()
            }),
            energy_required: 29_340,
        },
    );

    let estimate = client
        .estimate_energy(&owner(), &contract(), vec![0xa9, 0x05, 0x9c, 0xbb], 0)
        .await
        .unwrap();
    assert_eq!(estimate.energy_required, 29_340);

    // empty call data is rejected before the wire
    assert!(client
        .estimate_energy(&owner(), &contract(), vec![], 0)
        .await
        .is_err());
}

#[tokio::test]
async fn test_get_contract_info() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::GET_CONTRACT_INFO,
        &SmartContractDataWrapper {
            smart_contract: Some(SmartContract {
                name: "Token".to_string(),
                ..Default::default()
            }),
            runtimecode: vec![0x60, 0x80],
        },
    );

    let info = client.get_contract_info(&contract()).await.unwrap();
    assert_eq!(info.smart_contract.unwrap().name, "Token");
    assert_eq!(info.runtimecode, vec![0x60, 0x80]);

    let sent: BytesMessage = mock.last_request(paths::GET_CONTRACT_INFO).unwrap();
    assert_eq!(sent.value, contract().as_bytes().to_vec());
}

#[tokio::test]
async fn test_update_setting_request_shape() {
    let (client, mock) = Client::new_mock();
    mock.push_response(paths::UPDATE_SETTING, &ok_ext());

    client.update_setting(&owner(), &contract(), 40).await.unwrap();
    let sent: UpdateSettingContract = mock.last_request(paths::UPDATE_SETTING).unwrap();
    assert_eq!(sent.consume_user_resource_percent, 40);
    assert_eq!(sent.owner_address, owner().as_bytes().to_vec());
    assert_eq!(sent.contract_address, contract().as_bytes().to_vec());
}

#[tokio::test]
async fn test_update_energy_limit_request_shape() {
    let (client, mock) = Client::new_mock();

    assert!(client
        .update_energy_limit(&owner(), &contract(), 0)
        .await
        .is_err());

    mock.push_response(paths::UPDATE_ENERGY_LIMIT, &ok_ext());
    client
        .update_energy_limit(&owner(), &contract(), 20_000_000)
        .await
        .unwrap();
    let sent: UpdateEnergyLimitContract =
        mock.last_request(paths::UPDATE_ENERGY_LIMIT).unwrap();
    assert_eq!(sent.origin_energy_limit, 20_000_000);
}

#[tokio::test]
async fn test_clear_contract_abi_request_shape() {
    let (client, mock) = Client::new_mock();
    mock.push_response(paths::CLEAR_CONTRACT_ABI, &ok_ext());

    client.clear_contract_abi(&owner(), &contract()).await.unwrap();
    let sent: ClearAbiContract = mock.last_request(paths::CLEAR_CONTRACT_ABI).unwrap();
    assert_eq!(sent.contract_address, contract().as_bytes().to_vec());
}

#[tokio::test]
async fn test_trigger_constant_carries_call_value() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::TRIGGER_CONSTANT_CONTRACT,
        &TransactionExtention {
            result: Some(Return {
                result: true,
                ..Default::default()
            }),
            constant_result: vec![vec![0u8; 32]],
            ..Default::default()
        },
    );

    client
        .trigger_constant_contract(&owner(), &contract(), vec![1, 2, 3, 4], 777)
        .await
        .unwrap();
    let sent: TriggerSmartContract =
        mock.last_request(paths::TRIGGER_CONSTANT_CONTRACT).unwrap();
    assert_eq!(sent.call_value, 777);
}

#[test]
fn test_connect_rejects_malformed_url() {
    assert!(matches!(
        Client::connect("no scheme at all"),
        Err(SdkError::Transport(_))
    ));
}

#[tokio::test]
async fn test_with_config_and_close() {
    let client = Client::with_config(PoolConfig {
        initial_connections: 1,
        ..PoolConfig::new("http://127.0.0.1:50051")
    })
    .unwrap();
    // closing is idempotent and safe without traffic
    client.close();
    client.close();
}
