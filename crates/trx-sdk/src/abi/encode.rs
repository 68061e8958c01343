//! ABI encoding: selectors, topic hashes, head/tail parameter layout.

use std::str::FromStr;

use primitive_types::U256;
use trx_crypto::keccak256;
use trx_primitives::{Address, H256};

use super::types::{Abi, I256, ParamType, Token};
use crate::SdkError;

/// First 4 bytes of `keccak256(signature)` — the function selector
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

/// Full 32-byte `keccak256(signature)` — the event topic hash
pub fn topic_hash(signature: &str) -> H256 {
    keccak256(signature.as_bytes())
}

/// Encode a call to `method` with `args`, selector-prefixed.
///
/// The empty string selects the constructor, whose encoding carries no
/// selector. Arguments are coerced per the declared parameter types (see
/// [`coerce`]); a count mismatch or failed coercion is an error.
pub fn encode_call(abi: &Abi, method: &str, args: &[Token]) -> Result<Vec<u8>, SdkError> {
    if method.is_empty() {
        return encode_constructor(abi, args);
    }
    let entry = abi
        .function(method)
        .ok_or_else(|| SdkError::MethodNotFound(method.to_string()))?;
    check_arity(method, entry.inputs.len(), args.len())?;
    let types: Vec<ParamType> = entry.inputs.iter().map(|p| p.kind.clone()).collect();

    let mut out = selector(&entry.signature()).to_vec();
    out.extend(encode_params(&types, args)?);
    Ok(out)
}

/// Encode constructor arguments (no selector). A missing constructor with
/// no arguments encodes to nothing.
pub fn encode_constructor(abi: &Abi, args: &[Token]) -> Result<Vec<u8>, SdkError> {
    match abi.constructor() {
        Some(entry) => {
            check_arity("constructor", entry.inputs.len(), args.len())?;
            let types: Vec<ParamType> = entry.inputs.iter().map(|p| p.kind.clone()).collect();
            encode_params(&types, args)
        }
        None if args.is_empty() => Ok(Vec::new()),
        None => Err(SdkError::AbiEncode(
            "constructor arguments supplied but the abi declares no constructor".to_string(),
        )),
    }
}

fn check_arity(what: &str, expected: usize, got: usize) -> Result<(), SdkError> {
    if expected != got {
        return Err(SdkError::InvalidArgument(format!(
            "{} expects {} arguments, got {}",
            what, expected, got
        )));
    }
    Ok(())
}

/// Encode a parameter list in the standard head/tail layout, coercing each
/// argument to its declared type first.
pub fn encode_params(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    if types.len() != tokens.len() {
        return Err(SdkError::InvalidArgument(format!(
            "expected {} values, got {}",
            types.len(),
            tokens.len()
        )));
    }
    let coerced: Vec<Token> = types
        .iter()
        .zip(tokens.iter())
        .map(|(ty, tok)| coerce(ty, tok))
        .collect::<Result<_, _>>()?;

    let head_size = types.len() * 32;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(coerced.iter()) {
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token)?);
        } else {
            head.extend(encode_token(param_type, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Reduce an argument to the exact shape its declared type encodes.
///
/// Accepted shapes per type:
/// - `address`: address value, base58check or hex string, 20/21-byte buffer
/// - `uintN`/`intN`: integer token, decimal or 0x-hex string; range-checked
/// - `bytesN`: fixed buffer of length N, or a hex string
/// - `bytes`: buffer, or a string (0x-hex decoded, otherwise UTF-8 bytes)
/// - `string`: string, or a UTF-8 buffer
/// - `T[]`: a token sequence, or a JSON array string
pub fn coerce(kind: &ParamType, token: &Token) -> Result<Token, SdkError> {
    match kind {
        ParamType::Address => coerce_address(token).map(Token::Address),
        ParamType::Uint(bits) => {
            let value = coerce_uint(token)?;
            check_uint_range(&value, *bits)?;
            Ok(Token::Uint(value))
        }
        ParamType::Int(bits) => {
            let value = coerce_int(token)?;
            check_int_range(&value, *bits)?;
            Ok(Token::Int(value))
        }
        ParamType::Bool => match token {
            Token::Bool(b) => Ok(Token::Bool(*b)),
            other => Err(mismatch("bool", other)),
        },
        ParamType::FixedBytes(size) => {
            let bytes = match token {
                Token::FixedBytes(b) | Token::Bytes(b) => b.clone(),
                Token::String(s) => decode_hex_arg(s)?,
                other => return Err(mismatch("fixed bytes", other)),
            };
            if bytes.len() != *size {
                return Err(SdkError::AbiEncode(format!(
                    "bytes{} value has {} bytes",
                    size,
                    bytes.len()
                )));
            }
            Ok(Token::FixedBytes(bytes))
        }
        ParamType::Bytes => match token {
            Token::Bytes(b) | Token::FixedBytes(b) => Ok(Token::Bytes(b.clone())),
            Token::String(s) => {
                if s.starts_with("0x") {
                    Ok(Token::Bytes(decode_hex_arg(s)?))
                } else {
                    Ok(Token::Bytes(s.as_bytes().to_vec()))
                }
            }
            other => Err(mismatch("bytes", other)),
        },
        ParamType::String => match token {
            Token::String(s) => Ok(Token::String(s.clone())),
            Token::Bytes(b) => String::from_utf8(b.clone())
                .map(Token::String)
                .map_err(|e| SdkError::AbiEncode(format!("invalid utf-8 string: {}", e))),
            other => Err(mismatch("string", other)),
        },
        ParamType::Array(inner) => {
            let items = match token {
                Token::Array(items) => items.clone(),
                // arrays arriving from user input may be a JSON-encoded string
                Token::String(s) => parse_json_array(s)?,
                other => return Err(mismatch("array", other)),
            };
            let coerced: Vec<Token> = items
                .iter()
                .map(|item| coerce(inner, item))
                .collect::<Result<_, _>>()?;
            Ok(Token::Array(coerced))
        }
        ParamType::Unknown(text) => Err(SdkError::AbiEncode(format!(
            "cannot encode unknown ABI type '{}'",
            text
        ))),
    }
}

fn mismatch(expected: &str, got: &Token) -> SdkError {
    SdkError::AbiEncode(format!("expected {} argument, got {:?}", expected, got))
}

fn coerce_address(token: &Token) -> Result<Address, SdkError> {
    match token {
        Token::Address(addr) => Ok(addr.clone()),
        Token::String(s) => Address::from_str(s).map_err(Into::into),
        Token::Bytes(b) | Token::FixedBytes(b) => Address::from_bytes(b).map_err(Into::into),
        other => Err(mismatch("address", other)),
    }
}

fn coerce_uint(token: &Token) -> Result<U256, SdkError> {
    match token {
        Token::Uint(u) => Ok(*u),
        Token::Int(i) if !i.negative => Ok(i.abs),
        Token::Int(_) => Err(SdkError::AbiEncode(
            "negative value for unsigned type".to_string(),
        )),
        Token::String(s) => parse_u256(s),
        other => Err(mismatch("unsigned integer", other)),
    }
}

fn coerce_int(token: &Token) -> Result<I256, SdkError> {
    match token {
        Token::Int(i) => Ok(*i),
        Token::Uint(u) => Ok(I256::new(*u, false)),
        Token::String(s) => {
            if let Some(rest) = s.strip_prefix('-') {
                Ok(I256::new(parse_u256(rest)?, true))
            } else {
                Ok(I256::new(parse_u256(s)?, false))
            }
        }
        other => Err(mismatch("signed integer", other)),
    }
}

fn parse_u256(s: &str) -> Result<U256, SdkError> {
    let s = s.trim();
    let parsed = if let Some(hexpart) = s.strip_prefix("0x") {
        U256::from_str_radix(hexpart, 16).ok()
    } else {
        U256::from_dec_str(s).ok()
    };
    parsed.ok_or_else(|| SdkError::AbiEncode(format!("invalid integer literal '{}'", s)))
}

fn decode_hex_arg(s: &str) -> Result<Vec<u8>, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| SdkError::AbiEncode(format!("invalid hex argument: {}", e)))
}

fn parse_json_array(s: &str) -> Result<Vec<Token>, SdkError> {
    let value: serde_json::Value = serde_json::from_str(s)
        .map_err(|e| SdkError::AbiEncode(format!("invalid JSON array argument: {}", e)))?;
    match value {
        serde_json::Value::Array(items) => items.iter().map(json_to_token).collect(),
        _ => Err(SdkError::AbiEncode(
            "expected a JSON array argument".to_string(),
        )),
    }
}

fn json_to_token(value: &serde_json::Value) -> Result<Token, SdkError> {
    match value {
        serde_json::Value::String(s) => Ok(Token::String(s.clone())),
        serde_json::Value::Bool(b) => Ok(Token::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(Token::Uint(U256::from(u)))
            } else if let Some(i) = n.as_i64() {
                Ok(Token::Int(I256::from_i128(i as i128)))
            } else {
                Err(SdkError::AbiEncode(format!(
                    "non-integer JSON number argument: {}",
                    n
                )))
            }
        }
        serde_json::Value::Array(items) => {
            Ok(Token::Array(items.iter().map(json_to_token).collect::<Result<_, _>>()?))
        }
        other => Err(SdkError::AbiEncode(format!(
            "unsupported JSON argument: {}",
            other
        ))),
    }
}

fn check_uint_range(value: &U256, bits: usize) -> Result<(), SdkError> {
    if bits < 256 && *value >> bits != U256::zero() {
        return Err(SdkError::AbiEncode(format!(
            "value {} out of range for uint{}",
            value, bits
        )));
    }
    Ok(())
}

fn check_int_range(value: &I256, bits: usize) -> Result<(), SdkError> {
    // magnitude limit: 2^(bits-1) for negatives, 2^(bits-1) - 1 otherwise
    let half = U256::one() << (bits - 1);
    let max = if value.negative { half } else { half - U256::one() };
    if value.abs > max {
        return Err(SdkError::AbiEncode(format!(
            "value {}{} out of range for int{}",
            if value.negative { "-" } else { "" },
            value.abs,
            bits
        )));
    }
    Ok(())
}

/// Encode one already-coerced token as its 32-byte-aligned form
fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, SdkError> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.evm_bytes());
            Ok(buf.to_vec())
        }
        (ParamType::Uint(_), Token::Uint(value)) => Ok(encode_u256(value)),
        (ParamType::Int(_), Token::Int(value)) => {
            if value.negative {
                // two's complement: flip bits of the magnitude and add one
                let abs_bytes = u256_to_bytes(&value.abs);
                let mut bytes = [0u8; 32];
                for i in 0..32 {
                    bytes[i] = !abs_bytes[i];
                }
                let mut carry = 1u16;
                for i in (0..32).rev() {
                    let sum = (bytes[i] as u16) + carry;
                    bytes[i] = sum as u8;
                    carry = sum >> 8;
                }
                Ok(bytes.to_vec())
            } else {
                Ok(encode_u256(&value.abs))
            }
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            Ok(buf.to_vec())
        }
        (ParamType::FixedBytes(_), Token::FixedBytes(data)) => {
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_bytes(s.as_bytes())),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut out = encode_u256(&U256::from(tokens.len()));
            let inner_types: Vec<ParamType> =
                tokens.iter().map(|_| (**inner).clone()).collect();
            out.extend(encode_params(&inner_types, tokens)?);
            Ok(out)
        }
        (ty, tok) => Err(SdkError::AbiEncode(format!(
            "cannot encode {:?} as {}",
            tok, ty
        ))),
    }
}

fn u256_to_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

fn encode_u256(value: &U256) -> Vec<u8> {
    u256_to_bytes(value).to_vec()
}

/// Length-prefixed, 32-byte-padded dynamic bytes
fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = encode_u256(&U256::from(data.len()));
    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    out.extend(padded);
    out
}
