//! ABI encoding

use crate::mediate::encode_words;
use crate::types::Token;
use crate::word::words_to_bytes;

/// Encode tokens into ABI head/tail bytes
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let encoded = words_to_bytes(&encode_words(tokens));
    tracing::trace!(tokens = tokens.len(), bytes = encoded.len(), "encoded tokens");
    encoded
}

/// Encode tokens as lowercase hex without `0x`
pub fn encode_hex(tokens: &[Token]) -> String {
    hex::encode(encode(tokens))
}

/// Encode function call (selector + params)
pub fn encode_function_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut result = selector.to_vec();
    result.extend(encode(tokens));
    result
}
