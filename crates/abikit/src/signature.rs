//! Canonical type text and Keccak-256 selectors
//!
//! Canonical text is the form hashed into selectors: `uint256`, `bytes32`,
//! `address[]`, `string[2][]`. Bare `int` / `uint` parse as 256 bits and
//! always format with the explicit width.

use std::fmt;
use std::str::FromStr;

use abikit_crypto::keccak256;
use abikit_primitives::H256;

use crate::error::{AbiError, Result};
use crate::types::ParamType;

/// Parse canonical type text such as `uint8[2][]`
pub fn parse_canonical(text: &str) -> Result<ParamType> {
    let text = text.trim();

    if let Some(head) = text.strip_suffix(']') {
        let open = head
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidType(text.to_string()))?;
        let inner = parse_canonical(&head[..open])?;
        let len = &head[open + 1..];
        if len.is_empty() {
            return Ok(ParamType::Array(Box::new(inner)));
        }
        let len = len
            .parse::<usize>()
            .map_err(|_| AbiError::InvalidType(text.to_string()))?;
        return Ok(ParamType::FixedArray(Box::new(inner), len));
    }

    match text {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "bytes" => return Ok(ParamType::Bytes),
        "string" => return Ok(ParamType::String),
        "int" => return Ok(ParamType::Int(ParamType::DEFAULT_INT_BITS)),
        "uint" => return Ok(ParamType::Uint(ParamType::DEFAULT_INT_BITS)),
        _ => {}
    }

    // uint must be tried before int
    if let Some(bits) = text.strip_prefix("uint") {
        return Ok(ParamType::Uint(parse_size(bits, text)?));
    }
    if let Some(bits) = text.strip_prefix("int") {
        return Ok(ParamType::Int(parse_size(bits, text)?));
    }
    if let Some(len) = text.strip_prefix("bytes") {
        return Ok(ParamType::FixedBytes(parse_size(len, text)?));
    }

    if is_unsupported(text) {
        return Err(AbiError::UnsupportedType(text.to_string()));
    }
    Err(AbiError::InvalidType(text.to_string()))
}

fn parse_size(digits: &str, text: &str) -> Result<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidType(text.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AbiError::InvalidType(text.to_string()))
}

/// Real Solidity types outside the closed tag set
fn is_unsupported(text: &str) -> bool {
    text == "tuple"
        || text == "function"
        || text.starts_with('(')
        || text.starts_with("fixed")
        || text.starts_with("ufixed")
}

/// Canonical text of `kind`
pub fn format_canonical(kind: &ParamType) -> String {
    kind.to_string()
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::FixedBytes(len) => write!(f, "bytes{}", len),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, len) => write!(f, "{}[{}]", inner, len),
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        parse_canonical(s)
    }
}

mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for ParamType {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for ParamType {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            parse_canonical(&s).map_err(de::Error::custom)
        }
    }
}

/// `name(type1,type2,...)`
pub fn signature_text(name: &str, params: &[ParamType]) -> String {
    let types: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("{}({})", name, types.join(","))
}

/// Signature text with its Keccak-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    text: String,
    event_signature: H256,
}

impl Signature {
    /// Hash `text` as-is
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let event_signature = keccak256(text.as_bytes());
        Self { text, event_signature }
    }

    /// The hashed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Full 32-byte digest, used as topic 0 of non-anonymous events
    pub fn event_signature(&self) -> H256 {
        self.event_signature
    }

    /// First 4 bytes of the digest
    pub fn method_signature(&self) -> [u8; 4] {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&self.event_signature.as_bytes()[..4]);
        selector
    }

    /// Lowercase hex of the full digest, no `0x`
    pub fn event_signature_hex(&self) -> String {
        format!("{:x}", self.event_signature)
    }

    /// Lowercase hex of the 4-byte selector, no `0x`
    pub fn method_signature_hex(&self) -> String {
        hex::encode(self.method_signature())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the signature of `name(params...)`.
///
/// A missing name hashes as the empty string and missing params as `()`.
pub fn compute_selector(name: Option<&str>, params: Option<&[ParamType]>) -> Signature {
    let text = signature_text(name.unwrap_or(""), params.unwrap_or(&[]));
    Signature::new(text)
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    Signature::new(signature).method_signature()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array(inner: ParamType) -> ParamType {
        ParamType::Array(Box::new(inner))
    }

    fn fixed_array(inner: ParamType, len: usize) -> ParamType {
        ParamType::FixedArray(Box::new(inner), len)
    }

    // ==================== Parsing ====================

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_canonical("address").unwrap(), ParamType::Address);
        assert_eq!(parse_canonical("bool").unwrap(), ParamType::Bool);
        assert_eq!(parse_canonical("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(parse_canonical("string").unwrap(), ParamType::String);
        assert_eq!(parse_canonical("bytes32").unwrap(), ParamType::FixedBytes(32));
        assert_eq!(parse_canonical("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(parse_canonical("int64").unwrap(), ParamType::Int(64));
    }

    #[test]
    fn test_parse_bare_int_defaults_to_256() {
        assert_eq!(parse_canonical("int").unwrap(), ParamType::Int(256));
        assert_eq!(parse_canonical("uint").unwrap(), ParamType::Uint(256));
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(parse_canonical("address[]").unwrap(), array(ParamType::Address));
        assert_eq!(parse_canonical("bool[3]").unwrap(), fixed_array(ParamType::Bool, 3));
        assert_eq!(
            parse_canonical("string[2][]").unwrap(),
            array(fixed_array(ParamType::String, 2))
        );
        assert_eq!(
            parse_canonical("uint[][4]").unwrap(),
            fixed_array(array(ParamType::Uint(256)), 4)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "noMatch", "uintx", "bytes-1", "address]", "bool[x]", "int 8"] {
            assert!(
                matches!(parse_canonical(text), Err(AbiError::InvalidType(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_unsupported() {
        for text in ["tuple", "(uint256,bool)", "function", "fixed128x18", "ufixed"] {
            assert!(matches!(parse_canonical(text), Err(AbiError::UnsupportedType(_))));
        }
    }

    // ==================== Formatting ====================

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_canonical(&ParamType::Uint(256)), "uint256");
        assert_eq!(format_canonical(&ParamType::FixedBytes(4)), "bytes4");
        assert_eq!(format_canonical(&array(fixed_array(ParamType::Address, 2))), "address[2][]");
    }

    #[test]
    fn test_param_type_serde() {
        let kind = fixed_array(array(ParamType::Int(8)), 2);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"int8[][2]\"");
        let parsed: ParamType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }

    // ==================== Selectors ====================

    #[test]
    fn test_signature_text() {
        let params = [ParamType::Uint(32), ParamType::Bool];
        assert_eq!(signature_text("baz", &params), "baz(uint32,bool)");
        assert_eq!(signature_text("baz", &[]), "baz()");
    }

    #[test]
    fn test_compute_selector_no_params() {
        let sig = compute_selector(Some("baz"), None);
        assert_eq!(sig.text(), "baz()");
        assert_eq!(
            sig.event_signature_hex(),
            "a7916fac4f538170f7cd12c148552e2cba9fcd72329a2dd5b07a6fa906488ddf"
        );
        assert_eq!(sig.method_signature_hex(), "a7916fac");
    }

    #[test]
    fn test_compute_selector_missing_name() {
        let sig = compute_selector(None, None);
        assert_eq!(sig.text(), "()");
    }

    #[test]
    fn test_function_selector() {
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(function_selector("baz(uint32,bool)"), [0xcd, 0xcd, 0x77, 0xc0]);
    }
}
