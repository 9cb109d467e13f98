//! # Block Records
//!
//! JSON shape of a block as returned by `eth_getBlockByNumber` on an XDC
//! node, and its conversion into a [`SealInput`].
//!
//! Numeric fields accept either JSON numbers (the form produced by tooling
//! that pre-converts quantities) or quantity strings (`0x`-hex or decimal).
//! Byte fields accept a `0x` prefix, or the `xdc` prefix XDC nodes use for
//! addresses. Unknown fields such as `hash` or `size` are ignored;
//! `transactions` is kept as raw JSON for duplicate detection.
//!
//! Header fields are all-or-nothing: without them there is no digest. The
//! validator seal and the two blobs are decoded one by one, and a field that
//! fails is set aside so the rest of the block is still inspected.

use crate::error::RecordError;
use seal_recovery::{HeaderFields, SealInput};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{bloom_from_slice, encode_nonce, Bloom, BLOOM_LENGTH, U256};

/// A numeric field: JSON number or quantity string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    /// Interpret as an arbitrary-precision unsigned integer.
    pub fn to_u256(&self, field: &'static str) -> Result<U256, RecordError> {
        match self {
            Quantity::Number(n) => Ok(U256::from(*n)),
            Quantity::Text(text) => {
                parse_quantity(text).ok_or_else(|| RecordError::InvalidQuantity {
                    field,
                    value: text.clone(),
                })
            }
        }
    }

    /// Interpret as a `u64`, rejecting larger values.
    pub fn to_u64(&self, field: &'static str) -> Result<u64, RecordError> {
        let value = self.to_u256(field)?;
        if value > U256::from(u64::MAX) {
            return Err(RecordError::InvalidQuantity {
                field,
                value: value.to_string(),
            });
        }
        Ok(value.as_u64())
    }
}

fn parse_quantity(text: &str) -> Option<U256> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some("") => Some(U256::zero()),
        Some(digits) => U256::from_str_radix(digits, 16).ok(),
        None => U256::from_dec_str(text).ok(),
    }
}

/// One block record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub parent_hash: String,
    #[serde(rename = "sha3Uncles")]
    pub uncle_hash: String,
    #[serde(rename = "miner")]
    pub coinbase: String,
    pub state_root: String,
    pub transactions_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    pub difficulty: Quantity,
    pub number: Quantity,
    pub gas_limit: Quantity,
    pub gas_used: Quantity,
    pub timestamp: Quantity,
    pub extra_data: String,
    pub mix_hash: String,
    pub nonce: Quantity,
    #[serde(default)]
    pub validators: String,
    #[serde(default)]
    pub validator: String,
    #[serde(default)]
    pub penalties: String,
    #[serde(default)]
    pub transactions: Vec<Value>,
}

/// Side fields whose hex text could not be decoded.
#[derive(Debug, Default)]
pub struct RejectedFields {
    pub validator: Option<RecordError>,
    pub validators: Option<RecordError>,
    pub penalties: Option<RecordError>,
}

impl RejectedFields {
    /// The rejected fields, in record order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordError> {
        [&self.validators, &self.validator, &self.penalties]
            .into_iter()
            .flatten()
    }
}

/// A record converted for the core, plus what the core does not see.
#[derive(Debug)]
pub struct DecodedRecord {
    pub input: SealInput,
    pub rejected: RejectedFields,
    pub transactions: Vec<Value>,
}

impl BlockRecord {
    /// Decode every field into the typed input the core expects.
    ///
    /// # Errors
    /// Any header field that fails to decode fails the record. Failures in
    /// `validator`, `validators` and `penalties` are returned in
    /// [`DecodedRecord::rejected`] instead, with the field left empty.
    pub fn decode(self) -> Result<DecodedRecord, RecordError> {
        let header = HeaderFields {
            parent_hash: decode_fixed("parentHash", &self.parent_hash)?,
            uncle_hash: decode_fixed("sha3Uncles", &self.uncle_hash)?,
            coinbase: decode_fixed("miner", &self.coinbase)?,
            state_root: decode_fixed("stateRoot", &self.state_root)?,
            transactions_root: decode_fixed("transactionsRoot", &self.transactions_root)?,
            receipts_root: decode_fixed("receiptsRoot", &self.receipts_root)?,
            logs_bloom: decode_bloom(&self.logs_bloom)?,
            difficulty: self.difficulty.to_u256("difficulty")?,
            number: self.number.to_u256("number")?,
            gas_limit: self.gas_limit.to_u64("gasLimit")?,
            gas_used: self.gas_used.to_u64("gasUsed")?,
            timestamp: self.timestamp.to_u64("timestamp")?,
            extra_data: decode_hex("extraData", &self.extra_data)?,
            mix_hash: decode_fixed("mixHash", &self.mix_hash)?,
            nonce: encode_nonce(self.nonce.to_u64("nonce")?),
        };

        let mut rejected = RejectedFields::default();
        let input = SealInput {
            header,
            validator_seal: decode_side("validator", &self.validator, &mut rejected.validator),
            validators: decode_side("validators", &self.validators, &mut rejected.validators),
            penalties: decode_side("penalties", &self.penalties, &mut rejected.penalties),
        };

        Ok(DecodedRecord {
            input,
            rejected,
            transactions: self.transactions,
        })
    }
}

fn decode_side(field: &'static str, text: &str, rejected: &mut Option<RecordError>) -> Vec<u8> {
    match decode_hex(field, text) {
        Ok(bytes) => bytes,
        Err(err) => {
            *rejected = Some(err);
            Vec::new()
        }
    }
}

/// Parsed command input: one record or a batch.
#[derive(Debug)]
pub struct ParsedInput {
    /// One entry per input record; a record that does not match the block
    /// shape is an error in its own slot.
    pub records: Vec<Result<BlockRecord, RecordError>>,
    /// True when the input was a JSON array.
    pub is_batch: bool,
}

/// Parse a JSON object (one record) or a JSON array of records.
///
/// # Errors
/// Only when the text is not JSON at all. Records are parsed one by one.
pub fn parse_records(text: &str) -> Result<ParsedInput, RecordError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(match value {
        Value::Array(items) => ParsedInput {
            records: items.into_iter().map(parse_record).collect(),
            is_batch: true,
        },
        other => ParsedInput {
            records: vec![parse_record(other)],
            is_batch: false,
        },
    })
}

fn parse_record(value: Value) -> Result<BlockRecord, RecordError> {
    Ok(serde_json::from_value(value)?)
}

fn strip_prefix(text: &str) -> &str {
    let text = text.trim();
    ["0x", "0X", "xdc", "XDC"]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text)
}

/// Decode a variable-length hex byte string. Empty input is empty bytes.
pub fn decode_hex(field: &'static str, text: &str) -> Result<Vec<u8>, RecordError> {
    hex::decode(strip_prefix(text)).map_err(|source| RecordError::InvalidHex { field, source })
}

/// Decode a hex byte string of exactly `N` bytes.
pub fn decode_fixed<const N: usize>(
    field: &'static str,
    text: &str,
) -> Result<[u8; N], RecordError> {
    let bytes = decode_hex(field, text)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| RecordError::InvalidWidth {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// Decode the log bloom; shorter input is left-padded.
fn decode_bloom(text: &str) -> Result<Bloom, RecordError> {
    let bytes = decode_hex("logsBloom", text)?;
    bloom_from_slice(&bytes).ok_or(RecordError::InvalidWidth {
        field: "logsBloom",
        expected: BLOOM_LENGTH,
        actual: bytes.len(),
    })
}
