//! Parsing errors for fixed-width values

use thiserror::Error;

/// Error raised when text or a slice cannot become a fixed-width value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Input was not valid hexadecimal
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Input had the wrong number of bytes
    #[error("invalid {kind} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Name of the value being built
        kind: &'static str,
        /// Required byte count
        expected: usize,
        /// Supplied byte count
        got: usize,
    },
}

impl From<hex::FromHexError> for PrimitiveError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitiveError::InvalidHex(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_error_display() {
        let err = PrimitiveError::InvalidLength { kind: "address", expected: 20, got: 3 };
        assert_eq!(err.to_string(), "invalid address length: expected 20 bytes, got 3");
    }

    #[test]
    fn test_from_hex_error() {
        let err: PrimitiveError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, PrimitiveError::InvalidHex(_)));
    }
}
