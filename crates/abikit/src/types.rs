//! ABI type definitions

use std::fmt;
use std::str::FromStr;

use abikit_primitives::{Address, U256};

use crate::error::{AbiError, Result};

/// The closed set of ABI tags understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `intN`
    Int,
    /// `uintN`
    Uint,
    /// `bytesN`
    FixedBytes,
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `T[]`
    Array,
    /// `T[N]`
    FixedArray,
}

impl Tag {
    /// All tags, in declaration order
    pub const ALL: [Tag; 9] = [
        Tag::Address,
        Tag::Bool,
        Tag::Int,
        Tag::Uint,
        Tag::FixedBytes,
        Tag::Bytes,
        Tag::String,
        Tag::Array,
        Tag::FixedArray,
    ];

    /// Tag name as used by tag-based construction
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Address => "address",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Uint => "uint",
            Tag::FixedBytes => "fixedBytes",
            Tag::Bytes => "bytes",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::FixedArray => "fixedArray",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| {
                if s == "tuple" {
                    AbiError::UnsupportedType(s.to_string())
                } else {
                    AbiError::InvalidType(s.to_string())
                }
            })
    }
}

/// Signed 256-bit integer kept as sign and magnitude
///
/// Zero is never negative, so two values compare equal iff they denote the
/// same integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I256 {
    abs: U256,
    negative: bool,
}

impl I256 {
    /// Zero
    pub const ZERO: I256 = I256 { abs: U256([0; 4]), negative: false };

    /// Create from magnitude and sign
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Interpret a 256-bit word as two's complement
    pub fn from_twos_complement(word: U256) -> Self {
        if word.bit(255) {
            // value - 2^256, i.e. -(!word + 1)
            let (abs, _) = (!word).overflowing_add(U256::one());
            Self::new(abs, true)
        } else {
            Self::new(word, false)
        }
    }

    /// Encode as a 256-bit two's-complement word (`2^256 + value` for negatives)
    pub fn to_twos_complement(&self) -> U256 {
        if self.negative {
            (!self.abs).overflowing_add(U256::one()).0
        } else {
            self.abs
        }
    }

    /// Absolute value
    pub fn abs(&self) -> U256 {
        self.abs
    }

    /// True for values below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Parse a decimal integer with an optional leading `-`
    pub fn from_dec_str(s: &str) -> Result<Self> {
        let (digits, negative) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let abs = U256::from_dec_str(digits)
            .map_err(|_| AbiError::InvalidData(format!("invalid integer: {}", s)))?;
        Ok(Self::new(abs, negative))
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        Self::from_i128(value as i128)
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        Self::from_i128(value)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Boolean
    Bool,
    /// Signed integer with bit size
    Int(usize),
    /// Unsigned integer with bit size
    Uint(usize),
    /// Fixed-size bytes, size in bytes
    FixedBytes(usize),
    /// Dynamic bytes
    Bytes,
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
}

impl ParamType {
    /// Default bit width of `int` / `uint`
    pub const DEFAULT_INT_BITS: usize = 256;

    /// Build a type from a tag name, an element subtype and a length.
    ///
    /// `length` is the bit width for `int`/`uint` (256 when absent), the byte
    /// count for `fixedBytes` and the element count for `fixedArray`. A subtype
    /// is accepted only for `array`/`fixedArray`, where it is required.
    pub fn new(tag: &str, subtype: Option<ParamType>, length: Option<usize>) -> Result<Self> {
        let tag: Tag = tag.parse()?;
        let invalid = || {
            AbiError::InvalidType(format!(
                "{} (subtype: {:?}, length: {:?})",
                tag,
                subtype.as_ref().map(ToString::to_string),
                length
            ))
        };

        match (tag, subtype.clone(), length) {
            (Tag::Array, Some(sub), _) => Ok(ParamType::Array(Box::new(sub))),
            (Tag::FixedArray, Some(sub), Some(len)) => Ok(ParamType::FixedArray(Box::new(sub), len)),
            (Tag::Array | Tag::FixedArray, _, _) | (_, Some(_), _) => Err(invalid()),
            (Tag::FixedBytes, None, Some(len)) => Ok(ParamType::FixedBytes(len)),
            (Tag::FixedBytes, None, None) => Err(invalid()),
            (Tag::Int, None, bits) => Ok(ParamType::Int(bits.unwrap_or(Self::DEFAULT_INT_BITS))),
            (Tag::Uint, None, bits) => Ok(ParamType::Uint(bits.unwrap_or(Self::DEFAULT_INT_BITS))),
            (Tag::Address, None, _) => Ok(ParamType::Address),
            (Tag::Bool, None, _) => Ok(ParamType::Bool),
            (Tag::Bytes, None, _) => Ok(ParamType::Bytes),
            (Tag::String, None, _) => Ok(ParamType::String),
        }
    }

    /// Tag of this type
    pub fn tag(&self) -> Tag {
        match self {
            ParamType::Address => Tag::Address,
            ParamType::Bool => Tag::Bool,
            ParamType::Int(_) => Tag::Int,
            ParamType::Uint(_) => Tag::Uint,
            ParamType::FixedBytes(_) => Tag::FixedBytes,
            ParamType::Bytes => Tag::Bytes,
            ParamType::String => Tag::String,
            ParamType::Array(_) => Tag::Array,
            ParamType::FixedArray(_, _) => Tag::FixedArray,
        }
    }

    /// Element type of `array` / `fixedArray`
    pub fn subtype(&self) -> Option<&ParamType> {
        match self {
            ParamType::Array(inner) | ParamType::FixedArray(inner, _) => Some(inner),
            _ => None,
        }
    }

    /// Bit width, byte length or element count, depending on the tag
    pub fn length(&self) -> Option<usize> {
        match self {
            ParamType::Int(n) | ParamType::Uint(n) | ParamType::FixedBytes(n) => Some(*n),
            ParamType::FixedArray(_, n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    /// Whether an indexed event field of this type arrives as a 32-byte
    /// digest rather than its value
    pub fn is_hashed_when_indexed(&self) -> bool {
        matches!(
            self,
            ParamType::Bytes | ParamType::String | ParamType::Array(_) | ParamType::FixedArray(_, _)
        )
    }
}

/// Solidity ABI value paired with its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(I256),
    /// Unsigned integer
    Uint(U256),
    /// Fixed-size bytes
    FixedBytes(Vec<u8>),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
}

impl Token {
    /// Create a uint token
    pub fn uint(value: impl Into<U256>) -> Self {
        Token::Uint(value.into())
    }

    /// Create an int token
    pub fn int(value: impl Into<I256>) -> Self {
        Token::Int(value.into())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Tag of this token
    pub fn tag(&self) -> Tag {
        match self {
            Token::Address(_) => Tag::Address,
            Token::Bool(_) => Tag::Bool,
            Token::Int(_) => Tag::Int,
            Token::Uint(_) => Tag::Uint,
            Token::FixedBytes(_) => Tag::FixedBytes,
            Token::Bytes(_) => Tag::Bytes,
            Token::String(_) => Tag::String,
            Token::Array(_) => Tag::Array,
            Token::FixedArray(_) => Tag::FixedArray,
        }
    }

    /// Check that the token has the shape `kind` describes
    pub fn type_check(&self, kind: &ParamType) -> bool {
        match (self, kind) {
            (Token::Address(_), ParamType::Address)
            | (Token::Bool(_), ParamType::Bool)
            | (Token::Int(_), ParamType::Int(_))
            | (Token::Uint(_), ParamType::Uint(_))
            | (Token::Bytes(_), ParamType::Bytes)
            | (Token::String(_), ParamType::String) => true,
            (Token::FixedBytes(bytes), ParamType::FixedBytes(len)) => bytes.len() == *len,
            (Token::Array(tokens), ParamType::Array(inner)) => {
                tokens.iter().all(|t| t.type_check(inner))
            }
            (Token::FixedArray(tokens), ParamType::FixedArray(inner, len)) => {
                tokens.len() == *len && tokens.iter().all(|t| t.type_check(inner))
            }
            _ => false,
        }
    }

    /// Address payload, if this is an address token
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Token::Address(addr) => Some(addr),
            _ => None,
        }
    }

    /// Unsigned payload, if this is a uint token
    pub fn as_uint(&self) -> Option<&U256> {
        match self {
            Token::Uint(value) => Some(value),
            _ => None,
        }
    }

    /// Signed payload, if this is an int token
    pub fn as_int(&self) -> Option<&I256> {
        match self {
            Token::Int(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Address(addr) => write!(f, "{:x}", addr),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Int(value) => write!(f, "{}", value),
            Token::Uint(value) => write!(f, "{}", value),
            Token::FixedBytes(bytes) | Token::Bytes(bytes) => f.write_str(&hex::encode(bytes)),
            Token::String(s) => f.write_str(s),
            Token::Array(tokens) | Token::FixedArray(tokens) => {
                f.write_str("[")?;
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", token)?;
                }
                f.write_str("]")
            }
        }
    }
}
