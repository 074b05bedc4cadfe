//! # abikit-primitives
//!
//! Fixed-width value types used by the abikit ABI codec.
//!
//! This crate provides the 20-byte [`Address`], the 32-byte [`H256`] and a
//! re-export of the 256-bit unsigned integer [`U256`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::Address;
pub use error::PrimitiveError;
pub use hash::H256;

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Size of one ABI word in bytes
pub const WORD_LEN: usize = 32;

/// One 32-byte ABI word
pub type Word = [u8; WORD_LEN];

/// Strip an optional `0x` / `0X` prefix from hex text
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
