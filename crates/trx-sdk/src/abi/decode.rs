//! ABI decoding: results, call input, event logs.

use primitive_types::U256;
use trx_primitives::Address;

use super::encode::{selector, topic_hash};
use super::types::{Abi, Entry, EntryKind, I256, ParamType, Token};
use crate::types::{DecodedCall, DecodedEvent, DecodedParam};
use crate::SdkError;

/// Decode a parameter list laid out head/tail in `data`.
pub fn decode_params(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let mut tokens = Vec::with_capacity(types.len());
    let mut offset = 0;

    for param_type in types {
        let (token, consumed) = decode_token(param_type, data, offset)?;
        tokens.push(token);
        offset += consumed;
    }

    Ok(tokens)
}

/// Decode the return data of `entry`. One token per declared output.
pub fn decode_result(entry: &Entry, data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let types: Vec<ParamType> = entry.outputs.iter().map(|p| p.kind.clone()).collect();
    decode_params(&types, data)
}

/// Decode selector-prefixed call data against the ABI's functions.
///
/// The first entry in declaration order whose selector matches wins. An
/// unmatched selector is not an error: the result names the method
/// `unknown(<hex of 4 bytes>)` with no parameters.
pub fn decode_input(abi: &Abi, data: &[u8]) -> Result<DecodedCall, SdkError> {
    if data.len() < 4 {
        return Err(SdkError::AbiDecode(format!(
            "call data too short: {} bytes",
            data.len()
        )));
    }
    let mut wanted = [0u8; 4];
    wanted.copy_from_slice(&data[..4]);

    for entry in abi.functions() {
        if selector(&entry.signature()) != wanted {
            continue;
        }
        let types: Vec<ParamType> = entry.inputs.iter().map(|p| p.kind.clone()).collect();
        let tokens = decode_params(&types, &data[4..])?;
        let params = entry
            .inputs
            .iter()
            .zip(tokens)
            .map(|(param, value)| DecodedParam {
                name: param.name.clone(),
                value,
                indexed: false,
            })
            .collect();
        return Ok(DecodedCall {
            method: entry.name.clone(),
            params,
        });
    }

    Ok(DecodedCall {
        method: format!("unknown(0x{})", hex::encode(wanted)),
        params: Vec::new(),
    })
}

/// Find the event entry whose 32-byte signature hash matches `topic`.
pub fn event_by_topic<'a>(abi: &'a Abi, topic: &[u8]) -> Option<&'a Entry> {
    abi.events()
        .find(|e| topic_hash(&e.signature()).as_bytes() == topic)
}

/// Decode an emitted log against an event entry.
///
/// The first topic is the signature hash; the remaining topics carry the
/// indexed parameters one per slot, and `data` carries the non-indexed
/// parameters as a head/tail tuple. Output parameters keep the original
/// declaration order, each tagged indexed or not. Indexed dynamic values
/// (string/bytes/arrays) exist on-chain only as their keccak hash and
/// decode to the raw 32-byte word.
pub fn decode_event_log(
    entry: &Entry,
    topics: &[Vec<u8>],
    data: &[u8],
) -> Result<DecodedEvent, SdkError> {
    if entry.kind != EntryKind::Event {
        return Err(SdkError::AbiDecode(format!(
            "'{}' is not an event",
            entry.name
        )));
    }

    let indexed: Vec<&super::types::Param> =
        entry.inputs.iter().filter(|p| p.indexed).collect();
    let value_topics = topics.len().saturating_sub(1);
    if indexed.len() != value_topics {
        return Err(SdkError::AbiDecode(format!(
            "event {} declares {} indexed parameters but the log carries {} topics",
            entry.name,
            indexed.len(),
            value_topics
        )));
    }

    let plain_types: Vec<ParamType> = entry
        .inputs
        .iter()
        .filter(|p| !p.indexed)
        .map(|p| p.kind.clone())
        .collect();
    let mut plain_values = decode_params(&plain_types, data)?.into_iter();
    let mut topic_values = topics.iter().skip(1);

    let mut params = Vec::with_capacity(entry.inputs.len());
    for param in &entry.inputs {
        let value = if param.indexed {
            let topic = topic_values.next().expect("counted above");
            decode_topic(&param.kind, topic)?
        } else {
            plain_values.next().expect("decoded above")
        };
        params.push(DecodedParam {
            name: param.name.clone(),
            value,
            indexed: param.indexed,
        });
    }

    Ok(DecodedEvent {
        name: entry.name.clone(),
        params,
    })
}

/// Decode one 32-byte topic slot per the declared type.
fn decode_topic(kind: &ParamType, topic: &[u8]) -> Result<Token, SdkError> {
    if topic.len() != 32 {
        return Err(SdkError::AbiDecode(format!(
            "topic has {} bytes, expected 32",
            topic.len()
        )));
    }
    if kind.is_dynamic() {
        // only the hash of the value is on-chain
        return Ok(Token::FixedBytes(topic.to_vec()));
    }
    let (token, _) = decode_token(kind, topic, 0)?;
    Ok(token)
}

/// Decode one token. `frame` is the enclosing tuple's data region; dynamic
/// head slots hold offsets relative to the frame start. Returns the token
/// and the head bytes consumed.
fn decode_token(
    kind: &ParamType,
    frame: &[u8],
    offset: usize,
) -> Result<(Token, usize), SdkError> {
    match kind {
        ParamType::Address => {
            let word = read_word(frame, offset)?;
            let mut evm = [0u8; 20];
            evm.copy_from_slice(&word[12..32]);
            Ok((Token::Address(Address::from_evm_bytes(evm)), 32))
        }
        ParamType::Uint(_) => {
            let word = read_word(frame, offset)?;
            Ok((Token::Uint(U256::from_big_endian(word)), 32))
        }
        ParamType::Int(_) => {
            let word = read_word(frame, offset)?;
            let negative = word[0] & 0x80 != 0;
            let abs = if negative {
                // two's complement back to magnitude
                let mut flipped = [0u8; 32];
                for i in 0..32 {
                    flipped[i] = !word[i];
                }
                let mut carry = 1u16;
                for i in (0..32).rev() {
                    let sum = (flipped[i] as u16) + carry;
                    flipped[i] = sum as u8;
                    carry = sum >> 8;
                }
                U256::from_big_endian(&flipped)
            } else {
                U256::from_big_endian(word)
            };
            Ok((Token::Int(I256::new(abs, negative)), 32))
        }
        ParamType::Bool => {
            let word = read_word(frame, offset)?;
            Ok((Token::Bool(word[31] != 0), 32))
        }
        ParamType::FixedBytes(size) => {
            let word = read_word(frame, offset)?;
            Ok((Token::FixedBytes(word[..*size].to_vec()), 32))
        }
        ParamType::Bytes => {
            let data_offset = read_offset(frame, offset)?;
            let (bytes, _) = read_length_prefixed(frame, data_offset)?;
            Ok((Token::Bytes(bytes), 32))
        }
        ParamType::String => {
            let data_offset = read_offset(frame, offset)?;
            let (bytes, _) = read_length_prefixed(frame, data_offset)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::AbiDecode(format!("invalid utf-8 string: {}", e)))?;
            Ok((Token::String(s), 32))
        }
        ParamType::Array(inner) => {
            let data_offset = read_offset(frame, offset)?;
            let len = read_offset(frame, data_offset)?;
            let subframe = frame.get(data_offset + 32..).ok_or_else(|| {
                SdkError::AbiDecode("array data past end of buffer".to_string())
            })?;

            let mut tokens = Vec::with_capacity(len.min(subframe.len() / 32 + 1));
            let mut head = 0usize;
            for _ in 0..len {
                let (token, consumed) = decode_token(inner, subframe, head)?;
                tokens.push(token);
                head += consumed;
            }
            Ok((Token::Array(tokens), 32))
        }
        ParamType::Unknown(text) => Err(SdkError::AbiDecode(format!(
            "cannot decode unknown ABI type '{}'",
            text
        ))),
    }
}

fn read_word<'a>(frame: &'a [u8], offset: usize) -> Result<&'a [u8], SdkError> {
    frame
        .get(offset..offset + 32)
        .ok_or_else(|| {
            SdkError::AbiDecode(format!(
                "insufficient data: need {} bytes, have {}",
                offset + 32,
                frame.len()
            ))
        })
}

/// Read a head slot holding an offset or length; bounded by the frame size
/// so hostile values cannot force oversized allocation.
fn read_offset(frame: &[u8], offset: usize) -> Result<usize, SdkError> {
    let word = U256::from_big_endian(read_word(frame, offset)?);
    if word > U256::from(frame.len()) {
        return Err(SdkError::AbiDecode(format!(
            "offset {} past end of {}-byte buffer",
            word,
            frame.len()
        )));
    }
    Ok(word.as_usize())
}

fn read_length_prefixed(frame: &[u8], offset: usize) -> Result<(Vec<u8>, usize), SdkError> {
    let len = read_offset(frame, offset)?;
    let bytes = frame
        .get(offset + 32..offset + 32 + len)
        .ok_or_else(|| {
            SdkError::AbiDecode(format!(
                "insufficient data: need {} bytes, have {}",
                offset + 32 + len,
                frame.len()
            ))
        })?
        .to_vec();
    let padded = len.div_ceil(32) * 32;
    Ok((bytes, 32 + padded))
}
