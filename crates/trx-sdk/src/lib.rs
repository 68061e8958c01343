//! # trx-sdk
//!
//! Client SDK for TRON-family networks.
//!
//! - **Client**: pooled gRPC façade over a node's wallet service
//! - **Signer**: key custody, transaction and TIP-191 message signing,
//!   BIP-39/44 HD construction
//! - **Contract**: an ABI bound to an address, offering
//!   invoke/query/simulate and event decoding
//! - **TransactionHandle**: the build → sign → broadcast → confirm
//!   pipeline with a receipt that absorbs errors
//! - **abi**: EVM-ABI parsing, encoding and decoding
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use trx_sdk::{Client, Signer, TransactionHandle};
//! use trx_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("http://127.0.0.1:50051")?;
//!     let signer = Signer::from_private_key_hex(
//!         "f8c6f45b2aa8b68ab5f3910bdeb5239428b731618113e2881f46e374bf796b02",
//!     )?;
//!     let to: Address = "TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb".parse()?;
//!
//!     let mut tx = TransactionHandle::new(client.clone());
//!     tx.set_owner(signer.address().clone());
//!     tx.transfer(&to, 1_000_000).await.sign(&signer).broadcast().await;
//!
//!     let receipt = tx.receipt();
//!     println!("txid {} accepted {}", receipt.txid, receipt.accepted);
//!     Ok(())
//! }
//! ```
//!
//! ## Contract interaction
//!
//! ```rust,no_run
//! use trx_sdk::{abi::Token, Client, Contract};
//! use trx_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("http://127.0.0.1:50051")?;
//!     let token: Address = "TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb".parse()?;
//!     let caller: Address = "TWd4WrZ9wn84f5x1hZhL4DHvk738ns5jwb".parse()?;
//!
//!     let contract = Contract::trc20(client, token);
//!     let name = contract.query(&caller, "name", &[]).await?;
//!     println!("token name: {:?}", name);
//!
//!     let holder = Token::Address(caller.clone());
//!     let balance = contract.query(&caller, "balanceOf", &[holder]).await?;
//!     println!("balance: {:?}", balance);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
mod contract;
mod error;
mod pool;
mod signer;
mod transport;
mod tx;
pub mod types;

pub use client::Client;
pub use contract::Contract;
pub use error::SdkError;
pub use pool::{ChannelPool, Lease, PoolConfig, DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEOUT};
pub use signer::{
    verify_message_v2, Signer, DEFAULT_DERIVATION_PATH, PERMISSION_ACTIVE, PERMISSION_OWNER,
};
pub use transport::{GrpcTransport, MockTransport, Transport};
pub use tx::{Stage, TransactionHandle, TxReceipt, DEFAULT_EXPIRATION_SECS, DEFAULT_FEE_LIMIT};
pub use types::{DecodedCall, DecodedEvent, DecodedParam, DeployParams, ResourceKind, Simulation};

// Re-export the value types for convenience
pub use trx_primitives::{Address, H256};
