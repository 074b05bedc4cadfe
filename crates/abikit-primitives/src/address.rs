//! Ethereum-compatible address type (20 bytes)

use std::fmt;
use std::str::FromStr;

use crate::{strip_hex_prefix, PrimitiveError};

/// 20-byte account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let bytes: [u8; 20] = slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
            kind: "address",
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        let bytes = hex::decode(strip_hex_prefix(s))?;
        Self::from_slice(&bytes)
    }

    /// Parse address from hex, treating empty input as the zero address
    pub fn from_hex_or_zero(s: &str) -> Result<Self, PrimitiveError> {
        if strip_hex_prefix(s.trim()).is_empty() {
            return Ok(Self::ZERO);
        }
        Self::from_hex(s.trim())
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase hex with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::from_hex(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Basic functionality tests ====================

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert!(!addr.is_zero());

        let addr2 = Address::from_hex("742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::ZERO.to_hex(), "0x0000000000000000000000000000000000000000");
    }

    #[test]
    fn test_address_display_is_lowercase() {
        let addr = Address::from_hex("0x742D35CC6634C0532925A3B844BC9E7595F0AB3D").unwrap();
        assert_eq!(format!("{}", addr), "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d");
        assert_eq!(format!("{:x}", addr), "742d35cc6634c0532925a3b844bc9e7595f0ab3d");
        assert_eq!(format!("{:#x}", addr), "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d");
    }

    // ==================== Error cases ====================

    #[test]
    fn test_address_from_hex_invalid_chars() {
        let result = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aGGG");
        assert!(matches!(result, Err(PrimitiveError::InvalidHex(_))));
    }

    #[test]
    fn test_address_from_hex_wrong_length() {
        match Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB") {
            Err(PrimitiveError::InvalidLength { expected: 20, got: 19, .. }) => {}
            other => panic!("Expected InvalidLength error, got {:?}", other),
        }
        assert!(Address::from_hex("0x").is_err());
    }

    // ==================== Lenient parsing ====================

    #[test]
    fn test_address_from_hex_or_zero() {
        assert_eq!(Address::from_hex_or_zero("").unwrap(), Address::ZERO);
        assert_eq!(Address::from_hex_or_zero("0x").unwrap(), Address::ZERO);
        assert_eq!(
            Address::from_hex_or_zero("1111111111111111111111111111111111111111").unwrap(),
            Address::from_bytes([0x11; 20])
        );
        assert!(Address::from_hex_or_zero("0x12").is_err());
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "0x2222222222222222222222222222222222222222".parse().unwrap();
        assert_eq!(addr, Address::from_bytes([0x22; 20]));
    }
}
