//! Intermediate encoding tree
//!
//! Each token becomes a `Mediate` before any offset is known. Offsets are
//! then resolved structurally: `init` yields the head words of a node and
//! `closing` its tail words, both given the byte offset at which the node's
//! tail starts.

use crate::types::Token;
use crate::word::{
    pad_address, pad_bool, pad_dynamic_bytes, pad_fixed_bytes, pad_i256, pad_string, pad_u256,
    pad_usize, Word, WORD_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Mediate {
    /// Words stored in place
    Raw(Vec<Word>),
    /// Length-prefixed payload behind a pointer
    Prefixed(Vec<Word>),
    /// Dynamic array behind a pointer
    Array(Vec<Mediate>),
    /// Elements laid out in place
    FixedArray(Vec<Mediate>),
}

impl Mediate {
    pub(crate) fn from_token(token: &Token) -> Self {
        match token {
            Token::Address(address) => Mediate::Raw(vec![pad_address(address)]),
            Token::Bool(value) => Mediate::Raw(vec![pad_bool(*value)]),
            Token::Int(value) => Mediate::Raw(vec![pad_i256(value)]),
            Token::Uint(value) => Mediate::Raw(vec![pad_u256(value)]),
            Token::FixedBytes(bytes) => Mediate::Raw(pad_fixed_bytes(bytes)),
            Token::Bytes(bytes) => Mediate::Prefixed(pad_dynamic_bytes(bytes)),
            Token::String(text) => Mediate::Prefixed(pad_string(text)),
            Token::Array(tokens) => Mediate::Array(tokens.iter().map(Mediate::from_token).collect()),
            Token::FixedArray(tokens) => {
                Mediate::FixedArray(tokens.iter().map(Mediate::from_token).collect())
            }
        }
    }

    /// Bytes contributed to the head
    pub(crate) fn init_len(&self) -> usize {
        match self {
            Mediate::Raw(words) => WORD_LEN * words.len(),
            Mediate::Prefixed(_) | Mediate::Array(_) => WORD_LEN,
            Mediate::FixedArray(children) => children.iter().map(Mediate::init_len).sum(),
        }
    }

    /// Bytes contributed to the tail
    pub(crate) fn closing_len(&self) -> usize {
        match self {
            Mediate::Raw(_) => 0,
            Mediate::Prefixed(words) => WORD_LEN * words.len(),
            Mediate::FixedArray(children) => children.iter().map(Mediate::closing_len).sum(),
            Mediate::Array(children) => {
                WORD_LEN + children.iter().map(|m| m.init_len() + m.closing_len()).sum::<usize>()
            }
        }
    }

    /// Tail offset of `list[position]`: every head in the list plus the tails before it
    pub(crate) fn offset_for(list: &[Mediate], position: usize) -> usize {
        let heads: usize = list.iter().map(Mediate::init_len).sum();
        list[..position].iter().fold(heads, |acc, m| acc + m.closing_len())
    }

    pub(crate) fn init(&self, offset: usize) -> Vec<Word> {
        match self {
            Mediate::Raw(words) => words.clone(),
            Mediate::Prefixed(_) | Mediate::Array(_) => vec![pad_usize(offset)],
            // element offsets are recomputed from the array itself, not shifted
            Mediate::FixedArray(children) => children
                .iter()
                .enumerate()
                .flat_map(|(i, m)| m.init(Mediate::offset_for(children, i)))
                .collect(),
        }
    }

    pub(crate) fn closing(&self, offset: usize) -> Vec<Word> {
        match self {
            Mediate::Raw(_) => Vec::new(),
            Mediate::Prefixed(words) => words.clone(),
            Mediate::FixedArray(children) => children
                .iter()
                .enumerate()
                .flat_map(|(i, m)| m.closing(Mediate::offset_for(children, i)))
                .collect(),
            Mediate::Array(children) => {
                let mut words = vec![pad_usize(children.len())];
                // element heads sit after the count word
                for (i, m) in children.iter().enumerate() {
                    words.extend(m.init(offset + Mediate::offset_for(children, i) + WORD_LEN));
                }
                for (i, m) in children.iter().enumerate() {
                    words.extend(m.closing(offset + Mediate::offset_for(children, i)));
                }
                words
            }
        }
    }
}

/// Lay out a token list: every head, then every tail
pub(crate) fn encode_words(tokens: &[Token]) -> Vec<Word> {
    let mediates: Vec<Mediate> = tokens.iter().map(Mediate::from_token).collect();

    let inits = mediates
        .iter()
        .enumerate()
        .flat_map(|(i, m)| m.init(Mediate::offset_for(&mediates, i)));
    let closings = mediates
        .iter()
        .enumerate()
        .flat_map(|(i, m)| m.closing(Mediate::offset_for(&mediates, i)));

    inits.chain(closings).collect()
}
