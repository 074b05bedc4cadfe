//! JSON ABI definitions and JSON token values

use abikit_primitives::{strip_hex_prefix, Address, U256};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{AbiError, Result};
use crate::log::Event;
use crate::types::{ParamType, Token, I256};

impl Event {
    /// Parse a single JSON ABI event entry
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Every event entry of a full JSON ABI array; functions and other entries are skipped
    pub fn all_from_abi_json(json: &str) -> Result<Vec<Self>> {
        let entries: Vec<Value> = serde_json::from_str(json)?;
        entries
            .into_iter()
            .filter(|entry| entry.get("type").and_then(Value::as_str) == Some("event"))
            .map(Self::from_value)
            .collect()
    }

    fn from_value(value: Value) -> Result<Self> {
        if let Some(other) = value.get("type").and_then(Value::as_str).filter(|t| *t != "event") {
            return Err(AbiError::Json(format!("expected an event entry, got {}", other)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn mismatch(kind: &ParamType, value: &Value) -> AbiError {
    AbiError::InvalidData(format!("cannot read {} as {}", value, kind))
}

/// Hex text (optional `0x`, odd length allowed) as a 256-bit word
fn word_from_hex(text: &str) -> Result<U256> {
    let digits = strip_hex_prefix(text);
    let bytes = if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))?
    } else {
        hex::decode(digits)?
    };
    if bytes.len() > 32 {
        return Err(AbiError::InvalidData(format!("{} does not fit in 256 bits", text)));
    }
    Ok(U256::from_big_endian(&bytes))
}

fn is_hex(text: &str) -> bool {
    text.starts_with("0x") || text.starts_with("0X")
}

fn uint_from_json(kind: &ParamType, value: &Value) -> Result<U256> {
    match value {
        Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(|| mismatch(kind, value)),
        Value::String(s) if is_hex(s) => word_from_hex(s),
        Value::String(s) => U256::from_dec_str(s).map_err(|_| mismatch(kind, value)),
        _ => Err(mismatch(kind, value)),
    }
}

fn int_from_json(kind: &ParamType, value: &Value) -> Result<I256> {
    match value {
        Value::Number(n) => n.as_i64().map(I256::from).ok_or_else(|| mismatch(kind, value)),
        // hex is the raw two's-complement word
        Value::String(s) if is_hex(s) => word_from_hex(s).map(I256::from_twos_complement),
        Value::String(s) => I256::from_dec_str(s),
        _ => Err(mismatch(kind, value)),
    }
}

fn bytes_from_json(kind: &ParamType, value: &Value) -> Result<Vec<u8>> {
    let text = value.as_str().ok_or_else(|| mismatch(kind, value))?;
    Ok(hex::decode(strip_hex_prefix(text))?)
}

fn tokens_from_json(inner: &ParamType, kind: &ParamType, value: &Value) -> Result<Vec<Token>> {
    value
        .as_array()
        .ok_or_else(|| mismatch(kind, value))?
        .iter()
        .map(|item| Token::from_json(inner, item))
        .collect()
}

impl Token {
    /// Read a JSON value as a token of type `kind`.
    ///
    /// Integers accept JSON numbers, decimal strings and `0x` hex; addresses
    /// and bytes take hex strings. An empty address string is the zero address.
    pub fn from_json(kind: &ParamType, value: &Value) -> Result<Self> {
        match kind {
            ParamType::Address => {
                let text = value.as_str().ok_or_else(|| mismatch(kind, value))?;
                Ok(Token::Address(Address::from_hex_or_zero(text)?))
            }
            ParamType::Bool => match value {
                Value::Bool(b) => Ok(Token::Bool(*b)),
                Value::String(s) if s == "true" => Ok(Token::Bool(true)),
                Value::String(s) if s == "false" => Ok(Token::Bool(false)),
                _ => Err(mismatch(kind, value)),
            },
            ParamType::Int(_) => Ok(Token::Int(int_from_json(kind, value)?)),
            ParamType::Uint(_) => Ok(Token::Uint(uint_from_json(kind, value)?)),
            ParamType::FixedBytes(len) => {
                let bytes = bytes_from_json(kind, value)?;
                if bytes.len() != *len {
                    return Err(mismatch(kind, value));
                }
                Ok(Token::FixedBytes(bytes))
            }
            ParamType::Bytes => Ok(Token::Bytes(bytes_from_json(kind, value)?)),
            ParamType::String => value
                .as_str()
                .map(Token::string)
                .ok_or_else(|| mismatch(kind, value)),
            ParamType::Array(inner) => Ok(Token::Array(tokens_from_json(inner, kind, value)?)),
            ParamType::FixedArray(inner, len) => {
                let tokens = tokens_from_json(inner, kind, value)?;
                if tokens.len() != *len {
                    return Err(mismatch(kind, value));
                }
                Ok(Token::FixedArray(tokens))
            }
        }
    }

    /// JSON form: hex for addresses and bytes, decimal strings for integers
    pub fn to_json(&self) -> Value {
        match self {
            Token::Address(address) => Value::String(address.to_hex()),
            Token::Bool(b) => Value::Bool(*b),
            Token::Int(value) => Value::String(value.to_string()),
            Token::Uint(value) => Value::String(value.to_string()),
            Token::FixedBytes(bytes) | Token::Bytes(bytes) => {
                Value::String(format!("0x{}", hex::encode(bytes)))
            }
            Token::String(s) => Value::String(s.clone()),
            Token::Array(tokens) | Token::FixedArray(tokens) => {
                Value::Array(tokens.iter().map(Token::to_json).collect())
            }
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
