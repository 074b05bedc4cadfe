//! # abikit-crypto
//!
//! Keccak-256, the hash behind ABI method selectors and event signatures.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::keccak256;
