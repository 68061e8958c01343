//! Key custody and signing: transactions at a permission id, TIP-191
//! messages, BIP-39/44 HD construction.

use k256::ecdsa::SigningKey;
use prost::Message;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use trx_crypto::{keccak256, public_key_to_address, recover_public_key, sha256, sign, PublicKey, Signature};
use trx_primitives::{Address, H256};
use trx_proto::Transaction;

use crate::SdkError;

/// Default BIP-44 derivation path (coin type 195)
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/195'/0'/0/0";

/// Permission id of the owner permission
pub const PERMISSION_OWNER: i32 = 0;
/// Permission id of the active permission, the signing default
pub const PERMISSION_ACTIVE: i32 = 2;

/// TIP-191 message prefix tag
const MESSAGE_PREFIX: &str = "\x19TRON Signed Message:\n";

/// Holds a secp256k1 private key with its derived public key and address.
///
/// Clone is intentionally not implemented to prevent accidental key
/// duplication; reconstruct from the key material instead.
pub struct Signer {
    key: SigningKey,
    address: Address,
}

impl Signer {
    /// Generate a signer with a fresh random key
    pub fn random() -> Self {
        let key = SigningKey::random(&mut OsRng);
        let address = public_key_to_address(key.verifying_key());
        Signer { key, address }
    }

    /// Construct from a 32-byte private key
    pub fn from_private_key(bytes: &[u8; 32]) -> Result<Self, SdkError> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|e| SdkError::Signing(format!("invalid private key: {}", e)))?;
        let address = public_key_to_address(key.verifying_key());
        Ok(Signer { key, address })
    }

    /// Construct from a hex private key, `0x` prefix optional
    pub fn from_private_key_hex(s: &str) -> Result<Self, SdkError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s)
            .map_err(|e| SdkError::Signing(format!("invalid private key hex: {}", e)))?;
        if bytes.len() != 32 {
            bytes.zeroize();
            return Err(SdkError::Signing(format!(
                "private key must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let result = Self::from_private_key(&key);
        key.zeroize();
        result
    }

    /// Construct from a BIP-39 mnemonic. An empty passphrase and the
    /// default path `m/44'/195'/0'/0/0` match common wallet behavior.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: &str,
        path: Option<&str>,
    ) -> Result<Self, SdkError> {
        let mnemonic = bip39::Mnemonic::parse(phrase)
            .map_err(|e| SdkError::Signing(format!("invalid mnemonic: {}", e)))?;
        let mut seed = mnemonic.to_seed(passphrase);

        let path: bip32::DerivationPath = path
            .unwrap_or(DEFAULT_DERIVATION_PATH)
            .parse()
            .map_err(|e| SdkError::Signing(format!("invalid derivation path: {}", e)))?;
        let xprv = bip32::XPrv::derive_from_path(&seed, &path)
            .map_err(|e| SdkError::Signing(format!("derivation failed: {}", e)))?;
        seed.zeroize();

        let key: SigningKey = xprv.private_key().clone();
        let address = public_key_to_address(key.verifying_key());
        Ok(Signer { key, address })
    }

    /// The signer's address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The signer's public key
    pub fn public_key(&self) -> &PublicKey {
        self.key.verifying_key()
    }

    /// Sign a raw transaction body at the active permission (id 2),
    /// replacing any existing signatures. Owner-permission signing must ask
    /// for it explicitly through [`Signer::multi_sign_tx`].
    pub fn sign_tx(&self, mut tx: Transaction) -> Result<Transaction, SdkError> {
        tx.signature.clear();
        self.sign_tx_at(tx, PERMISSION_ACTIVE)
    }

    /// Sign at an explicit permission id, appending to the signature list.
    /// Cooperating owners each call this with the same permission id.
    pub fn multi_sign_tx(
        &self,
        tx: Transaction,
        permission_id: i32,
    ) -> Result<Transaction, SdkError> {
        self.sign_tx_at(tx, permission_id)
    }

    fn sign_tx_at(&self, mut tx: Transaction, permission_id: i32) -> Result<Transaction, SdkError> {
        let raw = tx
            .raw_data
            .as_mut()
            .ok_or_else(|| SdkError::Signing("cannot sign an empty transaction".to_string()))?;
        let contract = raw
            .contract
            .first_mut()
            .ok_or_else(|| SdkError::Signing("transaction has no contract entry".to_string()))?;
        contract.permission_id = permission_id;

        let hash = Self::tx_hash(&tx);
        let signature = sign(&hash, &self.key)?;
        tx.signature.push(signature.to_wire_bytes().to_vec());
        Ok(tx)
    }

    /// Canonical transaction id: sha256 of the serialized raw body
    pub fn tx_hash(tx: &Transaction) -> H256 {
        let raw_bytes = tx
            .raw_data
            .as_ref()
            .map(|raw| raw.encode_to_vec())
            .unwrap_or_default();
        sha256(&raw_bytes)
    }

    /// Sign a message in TIP-191 v2 form.
    ///
    /// A `0x`-prefixed message is decoded as hex to raw bytes, anything
    /// else is signed as UTF-8. The digest is
    /// `keccak256("\x19TRON Signed Message:\n" ‖ decimal-len ‖ bytes)` and
    /// the returned 65-byte hex signature carries v in {27, 28}.
    pub fn sign_message_v2(&self, message: &str) -> Result<String, SdkError> {
        let bytes = message_bytes(message)?;
        let hash = message_digest(&bytes);
        let signature = sign(&hash, &self.key)?;
        Ok(format!("0x{}", hex::encode(signature.to_bytes())))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn message_bytes(message: &str) -> Result<Vec<u8>, SdkError> {
    if let Some(hexpart) = message.strip_prefix("0x") {
        hex::decode(hexpart)
            .map_err(|e| SdkError::InvalidArgument(format!("invalid hex message: {}", e)))
    } else {
        Ok(message.as_bytes().to_vec())
    }
}

fn message_digest(bytes: &[u8]) -> H256 {
    let mut data = format!("{}{}", MESSAGE_PREFIX, bytes.len()).into_bytes();
    data.extend_from_slice(bytes);
    keccak256(&data)
}

/// Recover the signing address of a TIP-191 v2 signature.
pub fn verify_message_v2(message: &str, signature: &str) -> Result<Address, SdkError> {
    let sig_hex = signature.strip_prefix("0x").unwrap_or(signature);
    let sig_bytes = hex::decode(sig_hex)
        .map_err(|e| SdkError::InvalidArgument(format!("invalid signature hex: {}", e)))?;
    let sig_bytes: [u8; 65] = sig_bytes.as_slice().try_into().map_err(|_| {
        SdkError::InvalidArgument(format!(
            "signature must be 65 bytes, got {}",
            sig_bytes.len()
        ))
    })?;
    let signature = Signature::from_bytes(&sig_bytes);

    let digest = message_digest(&message_bytes(message)?);
    let public_key = recover_public_key(&digest, &signature)?;
    Ok(public_key_to_address(&public_key))
}
