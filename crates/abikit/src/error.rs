//! Codec error types

use abikit_primitives::PrimitiveError;
use thiserror::Error;

/// Result alias used throughout the codec
pub type Result<T> = std::result::Result<T, AbiError>;

/// ABI codec error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Unknown tag, bad tag/subtype/length combination or unparseable type text
    #[error("invalid type: cannot convert {0} to ParamType")]
    InvalidType(String),

    /// Payload is not a whole number of 32-byte words.
    ///
    /// Both figures use the payload's own unit: hex characters for textual
    /// payloads, bytes for raw ones.
    #[error("invalid payload length {length}: {remainder} left over after the last full word")]
    InvalidPayloadLength {
        /// Payload length
        length: usize,
        /// Length past the last complete word
        remainder: usize,
    },

    /// Decoded indexed-field count differs from the supplied topic count
    #[error("invalid topic count: decoded {expected} indexed fields, got {actual} topics")]
    InvalidTopicCount {
        /// Number of indexed fields decoded
        expected: usize,
        /// Number of topics supplied after the signature topic
        actual: usize,
    },

    /// A tag reached encoder or decoder dispatch without a handler
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Invalid hex string
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Well-formed input whose content cannot be used
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Malformed JSON ABI definition
    #[error("json error: {0}")]
    Json(String),
}

impl From<hex::FromHexError> for AbiError {
    fn from(e: hex::FromHexError) -> Self {
        AbiError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::Json(e.to_string())
    }
}

impl From<PrimitiveError> for AbiError {
    fn from(e: PrimitiveError) -> Self {
        match e {
            PrimitiveError::InvalidHex(msg) => AbiError::InvalidHex(msg),
            other => AbiError::InvalidData(other.to_string()),
        }
    }
}
