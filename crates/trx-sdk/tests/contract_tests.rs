//! Contract binding tests over the mock transport: constant calls,
//! simulation, invocation and on-chain ABI fetch.

use primitive_types::U256;

use trx_primitives::Address;
use trx_proto::api::transaction_info::Log;
use trx_proto::chain::smart_contract::{abi as proto_abi, Abi as ProtoAbi};
use trx_proto::chain::smart_contract::abi::entry::{EntryType, StateMutabilityType};
use trx_proto::chain::transaction;
use trx_proto::{
    paths, ContractPayload, Return, SmartContract, Transaction, TransactionExtention,
    TriggerSmartContract,
};
use trx_sdk::abi::{encode_params, topic_hash, ParamType, Token};
use trx_sdk::{Client, Contract, SdkError, Stage};

fn contract_address() -> Address {
    Address::from_evm_bytes([0x44; 20])
}

fn caller() -> Address {
    Address::from_base58("TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb").unwrap()
}

fn ok_result() -> Option<Return> {
    Some(Return {
        result: true,
        ..Default::default()
    })
}

fn constant_reply(segments: Vec<Vec<u8>>) -> TransactionExtention {
    TransactionExtention {
        constant_result: segments,
        result: ok_result(),
        energy_used: 345,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_query_decodes_string_result() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let encoded = encode_params(&[ParamType::String], &[Token::string("MyToken")]).unwrap();
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &constant_reply(vec![encoded]));

    let values = contract.query(&caller(), "name", &[]).await.unwrap();
    assert_eq!(values, vec![Token::string("MyToken")]);

    // the call data carried the name() selector
    let sent: TriggerSmartContract =
        mock.last_request(paths::TRIGGER_CONSTANT_CONTRACT).unwrap();
    assert_eq!(sent.data.len(), 4);
    assert_eq!(sent.contract_address, contract_address().as_bytes().to_vec());
    assert_eq!(sent.owner_address, caller().as_bytes().to_vec());
}

#[tokio::test]
async fn test_query_concatenates_segments() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    // a uint256 split across two byte segments
    let encoded = encode_params(&[ParamType::Uint(256)], &[Token::uint(98765u64)]).unwrap();
    let (first, second) = encoded.split_at(16);
    mock.push_response(
        paths::TRIGGER_CONSTANT_CONTRACT,
        &constant_reply(vec![first.to_vec(), second.to_vec()]),
    );

    let values = contract
        .query(&caller(), "balanceOf", &[Token::Address(caller())])
        .await
        .unwrap();
    assert_eq!(values, vec![Token::uint(98765u64)]);
}

#[tokio::test]
async fn test_query_empty_result_is_nil() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &constant_reply(vec![]));

    assert!(matches!(
        contract.query(&caller(), "name", &[]).await,
        Err(SdkError::NilResult(_))
    ));
}

#[tokio::test]
async fn test_query_unknown_method() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let result = contract.query(&caller(), "mint", &[]).await;
    assert!(matches!(result, Err(SdkError::MethodNotFound(_))));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_simulate_exposes_energy_and_logs() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let encoded = encode_params(&[ParamType::Bool], &[Token::Bool(true)]).unwrap();
    let log = Log {
        address: contract_address().as_bytes().to_vec(),
        topics: vec![topic_hash("Transfer(address,address,uint256)")
            .as_bytes()
            .to_vec()],
        data: vec![],
    };
    let mut reply = constant_reply(vec![encoded]);
    reply.energy_used = 13_450;
    reply.logs = vec![log];
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &reply);

    let simulation = contract
        .simulate(
            &caller(),
            0,
            "transfer",
            &[Token::Address(contract_address()), Token::uint(1u64)],
        )
        .await
        .unwrap();

    assert_eq!(simulation.values, vec![Token::Bool(true)]);
    assert_eq!(simulation.energy_used, 13_450);
    assert!(simulation.result.as_ref().unwrap().result);
    assert_eq!(simulation.logs.len(), 1);

    // the simulated log decodes through the binding's cache
    let decoded = contract
        .decode_event_signature(&simulation.logs[0].topics[0][..4]);
    assert_eq!(decoded, "Transfer");
}

#[tokio::test]
async fn test_invoke_returns_built_pipeline() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let trigger = TriggerSmartContract {
        owner_address: caller().as_bytes().to_vec(),
        contract_address: contract_address().as_bytes().to_vec(),
        data: vec![0xa9, 0x05, 0x9c, 0xbb],
        ..Default::default()
    };
    mock.push_response(
        paths::TRIGGER_CONTRACT,
        &TransactionExtention {
            transaction: Some(Transaction {
                raw_data: Some(transaction::Raw {
                    ref_block_bytes: vec![0x01, 0x02],
                    contract: vec![transaction::Contract {
                        r#type: TriggerSmartContract::CONTRACT_TYPE as i32,
                        parameter: Some(trigger.to_any()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            result: ok_result(),
            ..Default::default()
        },
    );

    let handle = contract
        .invoke(
            &caller(),
            0,
            "transfer",
            &[Token::Address(contract_address()), Token::uint(5u64)],
        )
        .await;

    assert_eq!(handle.stage(), Stage::Built);
    assert!(!handle.receipt().txid.is_empty());

    let sent: TriggerSmartContract = mock.last_request(paths::TRIGGER_CONTRACT).unwrap();
    assert_eq!(&sent.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
}

#[tokio::test]
async fn test_invoke_encode_failure_absorbed() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    // wrong arity never reaches the node
    let handle = contract.invoke(&caller(), 0, "transfer", &[]).await;
    assert_eq!(handle.stage(), Stage::Errored);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_builds_binding_from_chain_abi() {
    let (client, mock) = Client::new_mock();
    mock.push_response(
        paths::GET_CONTRACT,
        &SmartContract {
            contract_address: contract_address().as_bytes().to_vec(),
            abi: Some(ProtoAbi {
                entrys: vec![proto_abi::Entry {
                    name: "ping".to_string(),
                    r#type: EntryType::Function as i32,
                    state_mutability: StateMutabilityType::View as i32,
                    outputs: vec![proto_abi::entry::Param {
                        indexed: false,
                        name: String::new(),
                        r#type: "uint256".to_string(),
                    }],
                    ..Default::default()
                }],
            }),
            ..Default::default()
        },
    );

    let contract = Contract::fetch(client, contract_address()).await.unwrap();
    assert!(contract.abi().function("ping").is_some());
}

#[tokio::test]
async fn test_fetch_without_abi_fails() {
    let (client, mock) = Client::new_mock();
    mock.push_response(paths::GET_CONTRACT, &SmartContract::default());

    assert!(matches!(
        Contract::fetch(client, contract_address()).await,
        Err(SdkError::AbiUnavailable)
    ));
}

#[tokio::test]
async fn test_trc20_balance_of_helper() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let encoded = encode_params(
        &[ParamType::Uint(256)],
        &[Token::Uint(U256::from(1_500_000u64))],
    )
    .unwrap();
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &constant_reply(vec![encoded]));

    let balance = contract
        .trc20_balance_of(&caller(), &caller())
        .await
        .unwrap();
    assert_eq!(balance, U256::from(1_500_000u64));
}

#[tokio::test]
async fn test_trc20_transfer_decimal_scales_by_decimals() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    // decimals() reply: 6
    let decimals = encode_params(&[ParamType::Uint(8)], &[Token::uint(6u64)]).unwrap();
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &constant_reply(vec![decimals]));
    // the transfer build reply
    let trigger = TriggerSmartContract::default();
    mock.push_response(
        paths::TRIGGER_CONTRACT,
        &TransactionExtention {
            transaction: Some(Transaction {
                raw_data: Some(transaction::Raw {
                    contract: vec![transaction::Contract {
                        r#type: TriggerSmartContract::CONTRACT_TYPE as i32,
                        parameter: Some(trigger.to_any()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            result: ok_result(),
            ..Default::default()
        },
    );

    let handle = contract
        .trc20_transfer_decimal(&caller(), &contract_address(), "2.5")
        .await
        .unwrap();
    assert_eq!(handle.stage(), Stage::Built);

    let sent: TriggerSmartContract = mock.last_request(paths::TRIGGER_CONTRACT).unwrap();
    // selector + to + amount, with amount = 2.5 * 10^6
    let amount = U256::from_big_endian(&sent.data[36..68]);
    assert_eq!(amount, U256::from(2_500_000u64));
}

#[tokio::test]
async fn test_trc20_transfer_decimal_rejects_excess_digits() {
    let (client, mock) = Client::new_mock();
    let contract = Contract::trc20(client, contract_address());

    let decimals = encode_params(&[ParamType::Uint(8)], &[Token::uint(2u64)]).unwrap();
    mock.push_response(paths::TRIGGER_CONSTANT_CONTRACT, &constant_reply(vec![decimals]));

    assert!(contract
        .trc20_transfer_decimal(&caller(), &contract_address(), "1.123")
        .await
        .is_err());
}

#[tokio::test]
async fn test_binding_from_json_bad_json() {
    let (client, _mock) = Client::new_mock();
    assert!(Contract::from_json(client, contract_address(), "nope").is_err());
}
