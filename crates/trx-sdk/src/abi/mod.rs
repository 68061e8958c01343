//! ABI encoding and decoding for TVM contracts.
//!
//! Parses standard EVM-ABI JSON (tolerant of legacy `constant` booleans and
//! missing `stateMutability`), computes 4-byte selectors and 32-byte event
//! topic hashes, encodes heterogeneous argument lists into the head/tail
//! binary layout, and decodes results, call input and event logs back into
//! [`Token`] values.

mod decode;
mod encode;
mod types;

pub use decode::{
    decode_event_log, decode_input, decode_params, decode_result, event_by_topic,
};
pub use encode::{
    coerce, encode_call, encode_constructor, encode_params, selector, topic_hash,
};
pub use types::{Abi, Entry, EntryKind, I256, Param, ParamType, StateMutability, Token};
