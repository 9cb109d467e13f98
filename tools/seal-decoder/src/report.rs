//! # Report Rendering
//!
//! Text mode keeps the line layout downstream block crawlers parse: miner,
//! validator, then the validator list as `[a b c]`, followed by penalties.
//! Records are separated by a blank line. A failed field prints
//! `error(<Kind>): <message>` on its own line, never a placeholder address.
//!
//! JSON mode emits one object per record (an array for batch input), with
//! every field wrapped as `{"ok": ...}` or `{"error": {...}}`.
//!
//! Duplicate reports print one line per repeated transaction, or a JSON
//! array of `{hash, number, miner}` objects.

use crate::config::{DecoderConfig, OutputFormat};
use crate::decode::{BlockOutcome, RecordOutcome};
use crate::duplicates::Duplicate;
use crate::error::{FieldError, RecordError};
use serde::Serialize;
use shared_types::{to_checksum_with_prefix, Address, AddressPrefix, U256};

/// Render outcomes in the configured format.
pub fn render(
    outcomes: &[RecordOutcome],
    config: &DecoderConfig,
    is_batch: bool,
) -> Result<String, serde_json::Error> {
    let prefix = AddressPrefix::from(config.address_prefix);
    match config.format {
        OutputFormat::Text => Ok(render_text(outcomes, prefix)),
        OutputFormat::Json => render_json(outcomes, prefix, is_batch),
    }
}

// =============================================================================
// TEXT
// =============================================================================

/// Line-oriented rendering.
pub fn render_text(outcomes: &[RecordOutcome], prefix: AddressPrefix) -> String {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok(report) => text_report(report, prefix),
            Err(err) => text_record_error(err),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn text_report(report: &BlockOutcome, prefix: AddressPrefix) -> String {
    let lines = [
        text_line(&report.miner, |a| to_checksum_with_prefix(a, prefix)),
        text_line(&report.validator, |a| to_checksum_with_prefix(a, prefix)),
        text_line(&report.validators, |ids| bracketed(ids.iter().map(U256::to_string))),
        text_line(&report.penalties, |addrs| {
            bracketed(addrs.iter().map(|a| to_checksum_with_prefix(a, prefix)))
        }),
    ];
    lines.join("\n")
}

fn text_line<T>(result: &Result<T, FieldError>, show: impl Fn(&T) -> String) -> String {
    match result {
        Ok(value) => show(value),
        Err(err) => format!("error({}): {}", err.kind(), err),
    }
}

fn text_record_error(err: &RecordError) -> String {
    format!("error({}): {}", err.kind(), err)
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(" "))
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum JsonField<T> {
    Ok(T),
    Error(JsonError),
}

#[derive(Debug, Serialize)]
struct JsonError {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    number: String,
    coinbase: String,
    seal_hash: Option<String>,
    miner: JsonField<String>,
    validator: JsonField<String>,
    validators: JsonField<Vec<String>>,
    penalties: JsonField<Vec<String>>,
    miner_matches_coinbase: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonOutcome {
    Report(Box<JsonReport>),
    Failure { error: JsonError },
}

fn json_field<T, U>(result: &Result<T, FieldError>, show: impl Fn(&T) -> U) -> JsonField<U> {
    match result {
        Ok(value) => JsonField::Ok(show(value)),
        Err(err) => JsonField::Error(JsonError {
            kind: err.kind(),
            field: err.field(),
            message: err.to_string(),
        }),
    }
}

fn json_outcome(outcome: &RecordOutcome, prefix: AddressPrefix) -> JsonOutcome {
    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            return JsonOutcome::Failure {
                error: JsonError {
                    kind: err.kind(),
                    field: err.field(),
                    message: err.to_string(),
                },
            }
        }
    };

    let address = |a: &Address| to_checksum_with_prefix(a, prefix);
    JsonOutcome::Report(Box::new(JsonReport {
        number: report.number.to_string(),
        coinbase: address(&report.coinbase),
        seal_hash: report.seal_hash.map(|h| format!("0x{}", hex::encode(h))),
        miner: json_field(&report.miner, address),
        validator: json_field(&report.validator, address),
        validators: json_field(&report.validators, |ids| {
            ids.iter().map(U256::to_string).collect()
        }),
        penalties: json_field(&report.penalties, |addrs| addrs.iter().map(address).collect()),
        miner_matches_coinbase: report.miner_matches_coinbase(),
    }))
}

/// JSON rendering; a single object unless the input was a batch.
pub fn render_json(
    outcomes: &[RecordOutcome],
    prefix: AddressPrefix,
    is_batch: bool,
) -> Result<String, serde_json::Error> {
    let rendered: Vec<JsonOutcome> = outcomes.iter().map(|o| json_outcome(o, prefix)).collect();
    match (is_batch, rendered.as_slice()) {
        (false, [single]) => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(&rendered),
    }
}

// =============================================================================
// DUPLICATES
// =============================================================================

#[derive(Debug, Serialize)]
struct JsonDuplicate {
    hash: String,
    number: String,
    miner: String,
}

/// Render duplicate transactions in the configured format.
pub fn render_duplicates(
    duplicates: &[Duplicate],
    config: &DecoderConfig,
) -> Result<String, serde_json::Error> {
    let prefix = AddressPrefix::from(config.address_prefix);
    match config.format {
        OutputFormat::Text => Ok(duplicates
            .iter()
            .map(|d| {
                format!(
                    "Found duplicated transaction hash: 0x{} at block number {} with minerAddress {}",
                    hex::encode(d.hash),
                    d.number,
                    to_checksum_with_prefix(&d.miner, prefix)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let rendered: Vec<JsonDuplicate> = duplicates
                .iter()
                .map(|d| JsonDuplicate {
                    hash: format!("0x{}", hex::encode(d.hash)),
                    number: d.number.to_string(),
                    miner: to_checksum_with_prefix(&d.miner, prefix),
                })
                .collect();
            serde_json::to_string_pretty(&rendered)
        }
    }
}
