//! 32-byte word primitives and the word-stream slicer
//!
//! Every value on the wire is built from 32-byte big-endian words. The
//! `pad_*` helpers turn scalars into words, the `*_from_word` / `unpad_*`
//! helpers turn words back into scalars. None of them fail on fixed-width
//! input; rejecting malformed payloads is the slicer's job.

use abikit_primitives::{strip_hex_prefix, Address, U256};
pub use abikit_primitives::{Word, WORD_LEN};

use crate::error::{AbiError, Result};
use crate::types::I256;

/// Number of hex characters in one word
pub const WORD_HEX_LEN: usize = WORD_LEN * 2;

/// Left-pad an address into a word
pub fn pad_address(address: &Address) -> Word {
    let mut word = [0u8; WORD_LEN];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode a bool as `0` / `1` in the last byte
pub fn pad_bool(value: bool) -> Word {
    let mut word = [0u8; WORD_LEN];
    word[31] = value as u8;
    word
}

/// Big-endian unsigned word
pub fn pad_u256(value: &U256) -> Word {
    let mut word = [0u8; WORD_LEN];
    value.to_big_endian(&mut word);
    word
}

/// Big-endian two's-complement word
pub fn pad_i256(value: &I256) -> Word {
    pad_u256(&value.to_twos_complement())
}

/// Offsets, lengths and counts
pub fn pad_usize(value: usize) -> Word {
    pad_u256(&U256::from(value))
}

/// Split bytes into right-padded words; empty input yields no words
fn chunk_padded(bytes: &[u8]) -> Vec<Word> {
    bytes
        .chunks(WORD_LEN)
        .map(|chunk| {
            let mut word = [0u8; WORD_LEN];
            word[..chunk.len()].copy_from_slice(chunk);
            word
        })
        .collect()
}

/// Left-align bytes and zero-pad to the next word boundary.
///
/// Always yields at least one word, so an empty value still occupies a head slot.
pub fn pad_fixed_bytes(bytes: &[u8]) -> Vec<Word> {
    if bytes.is_empty() {
        return vec![[0u8; WORD_LEN]];
    }
    chunk_padded(bytes)
}

/// Length word followed by the right-padded data
pub fn pad_dynamic_bytes(bytes: &[u8]) -> Vec<Word> {
    let mut words = Vec::with_capacity(1 + bytes.len().div_ceil(WORD_LEN));
    words.push(pad_usize(bytes.len()));
    words.extend(chunk_padded(bytes));
    words
}

/// UTF-8 bytes of `text` laid out as dynamic bytes
pub fn pad_string(text: &str) -> Vec<Word> {
    pad_dynamic_bytes(text.as_bytes())
}

/// Read a word as an unsigned integer
pub fn unpad_uint(word: &Word) -> U256 {
    U256::from_big_endian(word)
}

/// Read a word as a two's-complement signed integer
pub fn unpad_int(word: &Word) -> I256 {
    I256::from_twos_complement(unpad_uint(word))
}

/// Last 20 bytes of the word
pub fn address_from_word(word: &Word) -> Address {
    let mut bytes = [0u8; Address::LEN];
    bytes.copy_from_slice(&word[12..]);
    Address::from_bytes(bytes)
}

/// True iff the last byte is 1
pub fn bool_from_word(word: &Word) -> bool {
    word[31] == 1
}

/// Split raw bytes into words.
///
/// Empty input gives no words. Lengths that are not a multiple of 32 fail
/// with [`AbiError::InvalidPayloadLength`], measured in bytes.
pub fn slice_words(data: &[u8]) -> Result<Vec<Word>> {
    let remainder = data.len() % WORD_LEN;
    if remainder != 0 {
        return Err(AbiError::InvalidPayloadLength { length: data.len(), remainder });
    }

    Ok(data
        .chunks_exact(WORD_LEN)
        .map(|chunk| {
            let mut word = [0u8; WORD_LEN];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

/// Split a hex payload (optional `0x`) into words.
///
/// Lengths that are not a multiple of 64 hex characters fail with
/// [`AbiError::InvalidPayloadLength`], measured in hex characters.
pub fn slice_hex(payload: &str) -> Result<Vec<Word>> {
    let payload = strip_hex_prefix(payload);
    let remainder = payload.len() % WORD_HEX_LEN;
    if remainder != 0 {
        return Err(AbiError::InvalidPayloadLength { length: payload.len(), remainder });
    }

    let bytes = hex::decode(payload)?;
    slice_words(&bytes)
}

/// Concatenate words into bytes
pub fn words_to_bytes(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|word| word.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(word: &Word) -> String {
        hex::encode(word)
    }

    // ==================== Padding ====================

    #[test]
    fn test_pad_address() {
        let address = Address::from_bytes([0x11; 20]);
        assert_eq!(
            word_hex(&pad_address(&address)),
            "0000000000000000000000001111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_pad_bool() {
        assert_eq!(pad_bool(true)[31], 1);
        assert_eq!(pad_bool(false), [0u8; 32]);
    }

    #[test]
    fn test_pad_usize_endianness() {
        assert_eq!(pad_usize(0x1)[31], 1);
        assert_eq!(pad_usize(0x100)[30], 1);
    }

    #[test]
    fn test_pad_i256_negative() {
        assert_eq!(
            word_hex(&pad_i256(&I256::from_i128(-123))),
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff85"
        );
        assert_eq!(pad_i256(&I256::from_i128(-1)), [0xff; 32]);
        assert_eq!(pad_i256(&I256::from_i128(4)), pad_usize(4));
    }

    #[test]
    fn test_pad_fixed_bytes() {
        let words = pad_fixed_bytes(&[0x12, 0x34]);
        assert_eq!(words.len(), 1);
        assert_eq!(
            word_hex(&words[0]),
            "1234000000000000000000000000000000000000000000000000000000000000"
        );

        assert_eq!(pad_fixed_bytes(&[]), vec![[0u8; 32]]);
        assert_eq!(pad_fixed_bytes(&[0xaa; 33]).len(), 2);
        assert_eq!(pad_fixed_bytes(&[0xaa; 64]).len(), 2);
    }

    #[test]
    fn test_pad_dynamic_bytes() {
        let words = pad_dynamic_bytes(&[0x12, 0x34]);
        assert_eq!(words, vec![pad_usize(2), pad_fixed_bytes(&[0x12, 0x34])[0]]);

        // empty data is just the length word
        assert_eq!(pad_dynamic_bytes(&[]), vec![pad_usize(0)]);
    }

    #[test]
    fn test_pad_string_is_utf8() {
        let words = pad_string("Fernández");
        assert_eq!(words[0], pad_usize(10));
        assert_eq!(&words[1][..10], "Fernández".as_bytes());
    }

    // ==================== Unpadding ====================

    #[test]
    fn test_unpad_all_ones() {
        let word = [0xff; 32];
        assert_eq!(unpad_int(&word), I256::from_i128(-1));
        assert_eq!(unpad_uint(&word), U256::max_value());
    }

    #[test]
    fn test_unpad_positive() {
        let word = pad_usize(123);
        assert_eq!(unpad_int(&word), I256::from_i128(123));
        assert_eq!(unpad_uint(&word), U256::from(123));
    }

    #[test]
    fn test_address_and_bool_from_word() {
        let address = Address::from_bytes([0x22; 20]);
        assert_eq!(address_from_word(&pad_address(&address)), address);
        assert!(bool_from_word(&pad_bool(true)));
        assert!(!bool_from_word(&pad_bool(false)));
        assert!(!bool_from_word(&pad_usize(2)));
    }

    // ==================== Slicing ====================

    #[test]
    fn test_slice_hex_empty() {
        assert!(slice_hex("").unwrap().is_empty());
        assert!(slice_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_slice_hex_bad_length() {
        assert_eq!(
            slice_hex("0x1234").unwrap_err(),
            AbiError::InvalidPayloadLength { length: 4, remainder: 4 }
        );
    }

    #[test]
    fn test_slice_hex_bad_chars() {
        let payload = "zz".repeat(32);
        assert!(matches!(slice_hex(&payload), Err(AbiError::InvalidHex(_))));
    }

    #[test]
    fn test_slice_hex_preserves_order() {
        let payload = format!("0x{}{}", "11".repeat(32), "22".repeat(32));
        let words = slice_hex(&payload).unwrap();
        assert_eq!(words, vec![[0x11; 32], [0x22; 32]]);
    }

    #[test]
    fn test_slice_words_bad_length() {
        assert_eq!(
            slice_words(&[0u8; 33]).unwrap_err(),
            AbiError::InvalidPayloadLength { length: 33, remainder: 1 }
        );
    }

    #[test]
    fn test_words_to_bytes() {
        let bytes = words_to_bytes(&[[1u8; 32], [2u8; 32]]);
        assert_eq!(bytes.len(), 64);
        assert_eq!(slice_words(&bytes).unwrap(), vec![[1u8; 32], [2u8; 32]]);
    }
}
