//! ABI decoding
//!
//! The decoder walks the payload one word at a time. Dynamic values leave a
//! pointer in the head; the pointed-to tail is read out of band and never
//! moves the cursor.

use crate::error::{AbiError, Result};
use crate::types::{ParamType, Token};
use crate::word::{
    address_from_word, bool_from_word, slice_hex, slice_words, unpad_int, unpad_uint, Word,
    WORD_LEN,
};

/// Words a lenient decoder may read past the end of the payload for one in-place value
const MAX_ZERO_FILL_WORDS: usize = 256;

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Read words past the end of the payload as zero instead of failing.
    ///
    /// Some nodes trim trailing zero words from log data; this keeps such
    /// payloads decodable.
    pub zero_fill_past_end: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { zero_fill_past_end: true }
    }
}

/// ABI decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    config: DecoderConfig,
}

struct DecodeResult {
    token: Token,
    new_offset: usize,
}

struct BytesTaken {
    bytes: Vec<u8>,
    new_offset: usize,
}

impl Decoder {
    /// Create a decoder with the given settings
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Decoder that rejects reads past the end of the payload
    pub fn strict() -> Self {
        Self::new(DecoderConfig { zero_fill_past_end: false })
    }

    /// Active settings
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode raw bytes against `types`
    pub fn decode(&self, types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
        let words = slice_words(data)?;
        self.decode_words(types, &words, false)
    }

    /// Decode a hex payload (optional `0x`) against `types`
    pub fn decode_hex(&self, types: &[ParamType], payload: &str) -> Result<Vec<Token>> {
        let words = slice_hex(payload)?;
        self.decode_words(types, &words, false)
    }

    /// Decode event topics.
    ///
    /// Indexed `bytes`, `string` and array values are only present as their
    /// 32-byte digest, so they come back as `FixedBytes` of that word.
    pub fn decode_topics(&self, types: &[ParamType], topics: &[Word]) -> Result<Vec<Token>> {
        self.decode_words(types, topics, true)
    }

    pub(crate) fn decode_words(
        &self,
        types: &[ParamType],
        words: &[Word],
        indexed: bool,
    ) -> Result<Vec<Token>> {
        let mut tokens = Vec::with_capacity(types.len());
        let mut offset = 0;

        for kind in types {
            let res = if indexed && kind.is_hashed_when_indexed() {
                DecodeResult {
                    token: Token::FixedBytes(self.peek(words, offset)?.to_vec()),
                    new_offset: offset + 1,
                }
            } else {
                self.decode_param(kind, words, offset)?
            };
            tracing::trace!(kind = %kind, offset, new_offset = res.new_offset, "decoded param");
            offset = res.new_offset;
            tokens.push(res.token);
        }

        Ok(tokens)
    }

    fn peek(&self, words: &[Word], position: usize) -> Result<Word> {
        match words.get(position) {
            Some(word) => Ok(*word),
            None if self.config.zero_fill_past_end => {
                tracing::debug!(
                    position,
                    words = words.len(),
                    "zero-filling read past end of payload"
                );
                Ok([0u8; WORD_LEN])
            }
            None => Err(AbiError::InvalidData(format!(
                "read of word {} past end of {}-word payload",
                position,
                words.len()
            ))),
        }
    }

    fn take_bytes(&self, words: &[Word], position: usize, len: usize) -> Result<BytesTaken> {
        let word_count = len.div_ceil(WORD_LEN);
        let mut bytes = Vec::with_capacity(word_count * WORD_LEN);
        for i in 0..word_count {
            bytes.extend_from_slice(&self.peek(words, position + i)?);
        }
        bytes.truncate(len);

        Ok(BytesTaken { bytes, new_offset: position + word_count })
    }

    /// Follow the pointer at `offset` to a length-prefixed tail: (length, first word after it)
    fn follow_pointer(&self, words: &[Word], offset: usize) -> Result<(usize, usize)> {
        let len_offset = as_usize(&self.peek(words, offset)?)? / WORD_LEN;
        let len = as_usize(&self.peek(words, len_offset)?)?;
        check_span(words, len)?;
        Ok((len, len_offset + 1))
    }

    /// An in-place value must fit in the payload plus the zero-fill allowance
    fn check_head(&self, kind: &ParamType, words: &[Word], offset: usize) -> Result<()> {
        let allowance = if self.config.zero_fill_past_end { MAX_ZERO_FILL_WORDS } else { 0 };
        let available = words.len().saturating_sub(offset).saturating_add(allowance);
        let needed = head_words(kind);
        if needed > available {
            return Err(AbiError::InvalidData(format!(
                "{} needs {} words at word {}, only {} available",
                kind, needed, offset, available
            )));
        }
        Ok(())
    }

    fn decode_param(&self, kind: &ParamType, words: &[Word], offset: usize) -> Result<DecodeResult> {
        match kind {
            ParamType::Address => Ok(DecodeResult {
                token: Token::Address(address_from_word(&self.peek(words, offset)?)),
                new_offset: offset + 1,
            }),
            ParamType::Bool => Ok(DecodeResult {
                token: Token::Bool(bool_from_word(&self.peek(words, offset)?)),
                new_offset: offset + 1,
            }),
            ParamType::Int(_) => Ok(DecodeResult {
                token: Token::Int(unpad_int(&self.peek(words, offset)?)),
                new_offset: offset + 1,
            }),
            ParamType::Uint(_) => Ok(DecodeResult {
                token: Token::Uint(unpad_uint(&self.peek(words, offset)?)),
                new_offset: offset + 1,
            }),
            ParamType::FixedBytes(len) => {
                self.check_head(kind, words, offset)?;
                let taken = self.take_bytes(words, offset, *len)?;
                // bytes0 still occupies a head word
                Ok(DecodeResult {
                    token: Token::FixedBytes(taken.bytes),
                    new_offset: taken.new_offset.max(offset + 1),
                })
            }
            ParamType::Bytes => {
                let (len, start) = self.follow_pointer(words, offset)?;
                let taken = self.take_bytes(words, start, len)?;
                Ok(DecodeResult {
                    token: Token::Bytes(taken.bytes),
                    new_offset: offset + 1,
                })
            }
            ParamType::String => {
                let (len, start) = self.follow_pointer(words, offset)?;
                let taken = self.take_bytes(words, start, len)?;
                Ok(DecodeResult {
                    token: Token::String(string_from_bytes(taken.bytes)),
                    new_offset: offset + 1,
                })
            }
            ParamType::Array(inner) => {
                let (count, start) = self.follow_pointer(words, offset)?;
                let mut tokens = Vec::new();
                let mut new_offset = start;
                for _ in 0..count {
                    let res = self.decode_param(inner, words, new_offset)?;
                    new_offset = res.new_offset;
                    tokens.push(res.token);
                }
                Ok(DecodeResult {
                    token: Token::Array(tokens),
                    new_offset: offset + 1,
                })
            }
            ParamType::FixedArray(inner, len) => {
                self.check_head(kind, words, offset)?;
                let mut tokens = Vec::with_capacity((*len).min(words.len()));
                let mut new_offset = offset;
                for _ in 0..*len {
                    let res = self.decode_param(inner, words, new_offset)?;
                    new_offset = res.new_offset;
                    tokens.push(res.token);
                }
                Ok(DecodeResult {
                    token: Token::FixedArray(tokens),
                    new_offset,
                })
            }
        }
    }
}

/// Words a value of `kind` occupies in place; zero-length elements count as one so the
/// element loop stays bounded too
fn head_words(kind: &ParamType) -> usize {
    match kind {
        ParamType::FixedBytes(len) => len.div_ceil(WORD_LEN).max(1),
        ParamType::FixedArray(inner, len) => head_words(inner).max(1).saturating_mul(*len),
        _ => 1,
    }
}

/// Pointer and length words must fit in 32 bits
fn as_usize(word: &Word) -> Result<usize> {
    if word[..28].iter().any(|b| *b != 0) {
        return Err(AbiError::InvalidData(format!(
            "pointer or length 0x{} exceeds u32",
            hex::encode(word)
        )));
    }
    let mut be = [0u8; 4];
    be.copy_from_slice(&word[28..]);
    Ok(u32::from_be_bytes(be) as usize)
}

/// A dynamic length can never exceed the payload it lives in
fn check_span(words: &[Word], len: usize) -> Result<()> {
    let available = words.len() * WORD_LEN;
    if len > available {
        return Err(AbiError::InvalidData(format!(
            "length {} exceeds {}-byte payload",
            len, available
        )));
    }
    Ok(())
}

/// UTF-8 when valid, otherwise one char per byte
fn string_from_bytes(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| char::from(b)).collect())
}

/// Decode raw bytes with the default decoder
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
    Decoder::default().decode(types, data)
}

/// Decode a hex payload with the default decoder
pub fn decode_hex(types: &[ParamType], payload: &str) -> Result<Vec<Token>> {
    Decoder::default().decode_hex(types, payload)
}
