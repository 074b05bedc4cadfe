//! # abikit
//!
//! Ethereum contract-call and event-log ABI codec.
//!
//! ## Features
//!
//! - **Encoder**: head/tail encoding of [`Token`] lists with offset resolution
//! - **Decoder**: pointer-following decoding against [`ParamType`] lists
//! - **Signatures**: canonical type text and Keccak-256 selectors
//! - **Events**: log decoding with indexed / non-indexed field merging
//! - **JSON**: JSON ABI event entries and JSON token values
//!
//! ## Quick Start
//!
//! ```rust
//! use abikit::{compute_selector, decode_hex, encode_hex, ParamType, Token};
//!
//! let tokens = vec![Token::uint(69u64), Token::Bool(true)];
//! let encoded = encode_hex(&tokens);
//! assert_eq!(encoded.len(), 128);
//!
//! let types = [ParamType::Uint(32), ParamType::Bool];
//! assert_eq!(decode_hex(&types, &encoded).unwrap(), tokens);
//!
//! let signature = compute_selector(Some("baz"), Some(&types[..]));
//! assert_eq!(signature.text(), "baz(uint32,bool)");
//! assert_eq!(signature.method_signature_hex(), "cdcd77c0");
//! ```
//!
//! ## Event Logs
//!
//! ```rust
//! use abikit::{Event, Token, H256};
//!
//! let event = Event::from_json(r#"{
//!     "type": "event",
//!     "name": "Drained",
//!     "inputs": [{"name": "amount", "type": "uint256", "indexed": false}]
//! }"#).unwrap();
//!
//! let topics = [event.signature().event_signature()];
//! let data = abikit::encode(&[Token::uint(7u64)]);
//! let log = event.decode_log(&topics, &data, None).unwrap();
//! assert_eq!(log.get("amount"), Some(&Token::uint(7u64)));
//! # let _: H256 = topics[0];
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decoder;
mod encoder;
mod error;
mod json;
mod log;
mod mediate;
mod signature;
mod types;
pub mod word;

pub use decoder::{decode, decode_hex, Decoder, DecoderConfig};
pub use encoder::{encode, encode_function_call, encode_hex};
pub use error::{AbiError, Result};
pub use log::{DecodedLog, DecodedLogParam, Event, EventParam};
pub use signature::{
    compute_selector, format_canonical, function_selector, parse_canonical, signature_text,
    Signature,
};
pub use types::{ParamType, Tag, Token, I256};

// Re-export primitives for convenience
pub use abikit_primitives::{Address, H256, U256};
