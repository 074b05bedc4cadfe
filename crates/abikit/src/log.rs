//! Event definitions and log decoding

use abikit_primitives::{Address, H256};
use serde::{Deserialize, Serialize};

use crate::decoder::Decoder;
use crate::error::{AbiError, Result};
use crate::signature::{compute_selector, Signature};
use crate::types::{ParamType, Token};
use crate::word::{slice_hex, slice_words, Word};

/// One event input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    /// Parameter name
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub kind: ParamType,
    /// Delivered as a topic rather than in the data section
    #[serde(default)]
    pub indexed: bool,
}

impl EventParam {
    /// Create a parameter
    pub fn new(name: impl Into<String>, kind: ParamType, indexed: bool) -> Self {
        Self { name: name.into(), kind, indexed }
    }
}

/// Event definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event name
    pub name: String,
    /// Inputs in declaration order
    pub inputs: Vec<EventParam>,
    /// Anonymous events carry no signature topic
    #[serde(default)]
    pub anonymous: bool,
}

/// A decoded log field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLogParam {
    /// Parameter name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub kind: ParamType,
    /// Decoded value; indexed dynamic values are their 32-byte digest
    #[serde(rename = "value")]
    pub token: Token,
}

/// Decoded log fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLog {
    /// Emitting contract, absent for anonymous events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Decoded fields
    pub params: Vec<DecodedLogParam>,
}

impl DecodedLog {
    /// Value of the first field called `name`
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.token)
    }

    /// Values in declaration order
    pub fn into_tokens(self) -> Vec<Token> {
        self.params.into_iter().map(|p| p.token).collect()
    }
}

impl Event {
    /// Create an event definition
    pub fn new(name: impl Into<String>, inputs: Vec<EventParam>, anonymous: bool) -> Self {
        Self { name: name.into(), inputs, anonymous }
    }

    /// Input types in declaration order
    pub fn param_types(&self) -> Vec<ParamType> {
        self.inputs.iter().map(|p| p.kind.clone()).collect()
    }

    /// Signature of `name(type1,...)`
    pub fn signature(&self) -> Signature {
        compute_selector(Some(self.name.as_str()), Some(self.param_types().as_slice()))
    }

    /// Whether `topic0` is this event's signature topic
    pub fn matches(&self, topic0: &H256) -> bool {
        !self.anonymous && self.signature().event_signature() == *topic0
    }

    /// Decode a log with the default decoder
    pub fn decode_log(
        &self,
        topics: &[H256],
        data: &[u8],
        address: Option<Address>,
    ) -> Result<DecodedLog> {
        self.decode_log_with(&Decoder::default(), topics, data, address)
    }

    /// Decode a log whose topics and data are hex text
    pub fn decode_log_hex<T: AsRef<str>>(
        &self,
        topics: &[T],
        data: &str,
        address: Option<Address>,
    ) -> Result<DecodedLog> {
        let topics = topics
            .iter()
            .map(|t| H256::from_hex(t.as_ref()).map_err(AbiError::from))
            .collect::<Result<Vec<_>>>()?;
        let words = slice_hex(data)?;
        self.decode_parts(&Decoder::default(), &topics, &words, address)
    }

    /// Decode a log with an explicit decoder
    pub fn decode_log_with(
        &self,
        decoder: &Decoder,
        topics: &[H256],
        data: &[u8],
        address: Option<Address>,
    ) -> Result<DecodedLog> {
        let words = slice_words(data)?;
        self.decode_parts(decoder, topics, &words, address)
    }

    fn decode_parts(
        &self,
        decoder: &Decoder,
        topics: &[H256],
        data: &[Word],
        address: Option<Address>,
    ) -> Result<DecodedLog> {
        let (topic_params, data_params): (Vec<&EventParam>, Vec<&EventParam>) =
            self.inputs.iter().partition(|p| p.indexed);

        let (topics, address) = if self.anonymous {
            (topics, None)
        } else {
            (topics.get(1..).unwrap_or_default(), address)
        };

        if topic_params.len() != topics.len() {
            tracing::debug!(
                event = %self.name,
                expected = topic_params.len(),
                actual = topics.len(),
                "topic count mismatch"
            );
            return Err(AbiError::InvalidTopicCount {
                expected: topic_params.len(),
                actual: topics.len(),
            });
        }

        let topic_words: Vec<Word> = topics.iter().map(|t| *t.as_bytes()).collect();
        let topic_types: Vec<ParamType> = topic_params.iter().map(|p| p.kind.clone()).collect();
        let data_types: Vec<ParamType> = data_params.iter().map(|p| p.kind.clone()).collect();

        let mut topic_tokens = decoder.decode_topics(&topic_types, &topic_words)?.into_iter();
        let mut data_tokens = decoder.decode_words(&data_types, data, false)?.into_iter();

        let mut params = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let source = if input.indexed { &mut topic_tokens } else { &mut data_tokens };
            let token = source.next().ok_or_else(|| {
                AbiError::InvalidData(format!("no value decoded for {}", input.name))
            })?;
            params.push(DecodedLogParam {
                name: input.name.clone(),
                kind: input.kind.clone(),
                token,
            });
        }

        Ok(DecodedLog { address, params })
    }
}
