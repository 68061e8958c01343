//! ABI type model: entries, parameter types, argument values.

use std::fmt;

use primitive_types::U256;
use serde::Deserialize;
use trx_primitives::Address;

use crate::SdkError;

/// ABI parameter type. Arrays are one-dimensional (`T[]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Account address
    Address,
    /// Unsigned integer with bit width (8, 16, …, 256)
    Uint(usize),
    /// Signed integer with bit width
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic byte string
    Bytes,
    /// Fixed-size bytes (1–32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Unrecognized type text; parses fine, refuses to encode
    Unknown(String),
}

impl ParamType {
    /// Parse a canonical type string (`uint256`, `address`, `bytes32[]`, …).
    ///
    /// Unrecognized text is not an error: it parses as [`ParamType::Unknown`]
    /// and only fails when a value of that type must be encoded.
    pub fn parse(s: &str) -> ParamType {
        let s = s.trim();
        if let Some(inner) = s.strip_suffix("[]") {
            return ParamType::Array(Box::new(ParamType::parse(inner)));
        }
        match s {
            "address" => return ParamType::Address,
            "bool" => return ParamType::Bool,
            "string" => return ParamType::String,
            "bytes" => return ParamType::Bytes,
            "uint" => return ParamType::Uint(256),
            "int" => return ParamType::Int(256),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("uint") {
            if let Ok(bits) = rest.parse::<usize>() {
                if bits % 8 == 0 && (8..=256).contains(&bits) {
                    return ParamType::Uint(bits);
                }
            }
        } else if let Some(rest) = s.strip_prefix("int") {
            if let Ok(bits) = rest.parse::<usize>() {
                if bits % 8 == 0 && (8..=256).contains(&bits) {
                    return ParamType::Int(bits);
                }
            }
        } else if let Some(rest) = s.strip_prefix("bytes") {
            if let Ok(size) = rest.parse::<usize>() {
                if (1..=32).contains(&size) {
                    return ParamType::FixedBytes(size);
                }
            }
        }
        ParamType::Unknown(s.to_string())
    }

    /// Whether the type has a variable-length encoding
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            ParamType::Bytes | ParamType::String | ParamType::Array(_)
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// Signed 256-bit integer in sign/magnitude form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256
    pub fn new(abs: U256, negative: bool) -> Self {
        // normalize the zero sign so equality behaves
        let negative = negative && !abs.is_zero();
        Self { abs, negative }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        if value < 0 {
            Self {
                abs: U256::from(value.unsigned_abs()),
                negative: true,
            }
        } else {
            Self {
                abs: U256::from(value as u128),
                negative: false,
            }
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

/// An ABI argument or decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Account address
    Address(Address),
    /// Unsigned integer
    Uint(U256),
    /// Signed integer
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Dynamic byte string
    Bytes(Vec<u8>),
    /// Fixed-size bytes
    FixedBytes(Vec<u8>),
    /// UTF-8 string. Also accepted where an address, integer or array is
    /// declared — the encoder coerces text arguments per the declared type.
    String(String),
    /// Array of tokens
    Array(Vec<Token>),
}

impl Token {
    /// Uint shorthand
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Int shorthand
    pub fn int(value: i128) -> Self {
        Token::Int(I256::from_i128(value))
    }

    /// Address shorthand
    pub fn address(addr: Address) -> Self {
        Token::Address(addr)
    }

    /// String shorthand
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }
}

/// State mutability of a function entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateMutability {
    /// Reads nothing, writes nothing
    Pure,
    /// Reads state
    View,
    /// Writes state, refuses value
    #[default]
    Nonpayable,
    /// Writes state, accepts value
    Payable,
    /// Unrecognized tag
    Unknown,
}

/// Entry kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Contract constructor
    Constructor,
    /// Callable function
    Function,
    /// Event definition
    Event,
    /// Fallback function
    Fallback,
    /// Unrecognized entry type
    Unknown,
}

/// One parameter of an ABI entry
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name (may be empty)
    pub name: String,
    /// Parameter type
    pub kind: ParamType,
    /// Whether an event parameter is indexed
    pub indexed: bool,
}

/// One ABI entry
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Entry kind
    pub kind: EntryKind,
    /// Name (empty for constructor/fallback)
    pub name: String,
    /// Input parameters
    pub inputs: Vec<Param>,
    /// Output parameters (functions only)
    pub outputs: Vec<Param>,
    /// Whether the entry accepts value
    pub payable: bool,
    /// State mutability tag
    pub state_mutability: StateMutability,
    /// Whether an event is anonymous
    pub anonymous: bool,
}

impl Entry {
    /// Canonical textual signature over input types: `name(t1,t2,…)`
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.kind.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// A parsed contract ABI: an ordered sequence of entries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Abi {
    /// Entries in declaration order
    pub entries: Vec<Entry>,
}

#[derive(Deserialize)]
struct JsonParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    indexed: bool,
}

#[derive(Deserialize)]
struct JsonEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Option<Vec<JsonParam>>,
    #[serde(default)]
    outputs: Option<Vec<JsonParam>>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
    #[serde(default)]
    constant: Option<bool>,
    #[serde(default)]
    payable: Option<bool>,
    #[serde(default)]
    anonymous: Option<bool>,
}

fn convert_params(params: Option<Vec<JsonParam>>) -> Vec<Param> {
    params
        .unwrap_or_default()
        .into_iter()
        .map(|p| Param {
            name: p.name,
            kind: ParamType::parse(&p.kind),
            indexed: p.indexed,
        })
        .collect()
}

impl Abi {
    /// Parse a standard EVM-ABI JSON array.
    ///
    /// Tolerant of legacy shapes: `constant: true` maps to view, a missing
    /// `stateMutability` defaults to nonpayable (payable when `payable` is
    /// set), unknown entry or parameter types are tagged unknown.
    pub fn from_json(json: &str) -> Result<Abi, SdkError> {
        let raw: Vec<JsonEntry> =
            serde_json::from_str(json).map_err(|e| SdkError::AbiParse(e.to_string()))?;
        let entries = raw.into_iter().map(Self::convert_entry).collect();
        Ok(Abi { entries })
    }

    fn convert_entry(e: JsonEntry) -> Entry {
        let kind = match e.kind.as_deref() {
            Some("constructor") => EntryKind::Constructor,
            // a missing type tag means function per the ABI spec
            Some("function") | None => EntryKind::Function,
            Some("event") => EntryKind::Event,
            Some("fallback") | Some("receive") => EntryKind::Fallback,
            Some(_) => EntryKind::Unknown,
        };
        let payable = e.payable.unwrap_or(false)
            || e.state_mutability.as_deref() == Some("payable");
        let state_mutability = match e.state_mutability.as_deref() {
            Some("pure") => StateMutability::Pure,
            Some("view") => StateMutability::View,
            Some("nonpayable") => StateMutability::Nonpayable,
            Some("payable") => StateMutability::Payable,
            Some(_) => StateMutability::Unknown,
            None => {
                if e.constant == Some(true) {
                    StateMutability::View
                } else if payable {
                    StateMutability::Payable
                } else {
                    StateMutability::Nonpayable
                }
            }
        };
        Entry {
            kind,
            name: e.name,
            inputs: convert_params(e.inputs),
            outputs: convert_params(e.outputs),
            payable,
            state_mutability,
            anonymous: e.anonymous.unwrap_or(false),
        }
    }

    /// First function entry with the given name, in declaration order
    pub fn function(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|e| e.kind == EntryKind::Function && e.name == name)
    }

    /// The constructor entry, if declared
    pub fn constructor(&self) -> Option<&Entry> {
        self.entries.iter().find(|e| e.kind == EntryKind::Constructor)
    }

    /// Event entries in declaration order
    pub fn events(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Event)
    }

    /// Function entries in declaration order
    pub fn functions(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Function)
    }
}

impl From<&trx_proto::chain::smart_contract::Abi> for Abi {
    /// Convert the on-chain protobuf ABI into the parsed model.
    fn from(proto: &trx_proto::chain::smart_contract::Abi) -> Self {
        use trx_proto::chain::smart_contract::abi::entry::{EntryType, StateMutabilityType};

        let entries = proto
            .entrys
            .iter()
            .map(|e| {
                let kind = match EntryType::try_from(e.r#type) {
                    Ok(EntryType::Constructor) => EntryKind::Constructor,
                    Ok(EntryType::Function) => EntryKind::Function,
                    Ok(EntryType::Event) => EntryKind::Event,
                    Ok(EntryType::Fallback) | Ok(EntryType::Receive) => EntryKind::Fallback,
                    _ => EntryKind::Unknown,
                };
                let state_mutability = match StateMutabilityType::try_from(e.state_mutability) {
                    Ok(StateMutabilityType::Pure) => StateMutability::Pure,
                    Ok(StateMutabilityType::View) => StateMutability::View,
                    Ok(StateMutabilityType::Nonpayable) => StateMutability::Nonpayable,
                    Ok(StateMutabilityType::Payable) => StateMutability::Payable,
                    _ => {
                        if e.constant {
                            StateMutability::View
                        } else {
                            StateMutability::Unknown
                        }
                    }
                };
                let convert = |params: &[trx_proto::chain::smart_contract::abi::entry::Param]| {
                    params
                        .iter()
                        .map(|p| Param {
                            name: p.name.clone(),
                            kind: ParamType::parse(&p.r#type),
                            indexed: p.indexed,
                        })
                        .collect()
                };
                Entry {
                    kind,
                    name: e.name.clone(),
                    inputs: convert(&e.inputs),
                    outputs: convert(&e.outputs),
                    payable: e.payable,
                    state_mutability,
                    anonymous: e.anonymous,
                }
            })
            .collect();
        Abi { entries }
    }
}

impl From<&Abi> for trx_proto::chain::smart_contract::Abi {
    /// Convert the parsed model into the on-chain protobuf ABI (used when
    /// deploying with an ABI attached).
    fn from(abi: &Abi) -> Self {
        use trx_proto::chain::smart_contract::abi as proto;
        use trx_proto::chain::smart_contract::abi::entry::{EntryType, StateMutabilityType};

        let entrys = abi
            .entries
            .iter()
            .map(|e| {
                let kind = match e.kind {
                    EntryKind::Constructor => EntryType::Constructor,
                    EntryKind::Function => EntryType::Function,
                    EntryKind::Event => EntryType::Event,
                    EntryKind::Fallback => EntryType::Fallback,
                    EntryKind::Unknown => EntryType::UnknownEntryType,
                };
                let state_mutability = match e.state_mutability {
                    StateMutability::Pure => StateMutabilityType::Pure,
                    StateMutability::View => StateMutabilityType::View,
                    StateMutability::Nonpayable => StateMutabilityType::Nonpayable,
                    StateMutability::Payable => StateMutabilityType::Payable,
                    StateMutability::Unknown => StateMutabilityType::UnknownMutabilityType,
                };
                let convert = |params: &[Param]| {
                    params
                        .iter()
                        .map(|p| proto::entry::Param {
                            indexed: p.indexed,
                            name: p.name.clone(),
                            r#type: p.kind.to_string(),
                        })
                        .collect()
                };
                proto::Entry {
                    anonymous: e.anonymous,
                    constant: e.state_mutability == StateMutability::View
                        || e.state_mutability == StateMutability::Pure,
                    name: e.name.clone(),
                    inputs: convert(&e.inputs),
                    outputs: convert(&e.outputs),
                    r#type: kind as i32,
                    payable: e.payable,
                    state_mutability: state_mutability as i32,
                }
            })
            .collect();
        trx_proto::chain::smart_contract::Abi { entrys }
    }
}
