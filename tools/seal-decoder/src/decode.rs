//! Record batch decoding.
//!
//! Records that fail to convert keep their position in the output; the
//! rest are inspected as one parallel batch. Side fields rejected during
//! conversion replace the core's result for that field only.

use crate::error::{FieldError, RecordError};
use crate::record::{BlockRecord, RejectedFields};
use seal_recovery::{SealError, SealInput, SealRecoveryApi, SealReport};
use serde_json::Value;
use shared_types::{Address, Hash, U256};
use tracing::warn;

/// Everything reported for one block.
#[derive(Debug)]
pub struct BlockOutcome {
    pub number: U256,
    pub coinbase: Address,
    pub seal_hash: Option<Hash>,
    pub miner: Result<Address, FieldError>,
    pub validator: Result<Address, FieldError>,
    pub validators: Result<Vec<U256>, FieldError>,
    pub penalties: Result<Vec<Address>, FieldError>,
    /// Raw `transactions` entries, for duplicate detection.
    pub transactions: Vec<Value>,
}

impl BlockOutcome {
    fn new(report: SealReport, rejected: RejectedFields, transactions: Vec<Value>) -> Self {
        Self {
            number: report.number,
            coinbase: report.coinbase,
            seal_hash: report.seal_hash,
            miner: report.miner.map_err(FieldError::from),
            validator: overlay(report.validator, rejected.validator),
            validators: overlay(report.validators, rejected.validators),
            penalties: overlay(report.penalties, rejected.penalties),
            transactions,
        }
    }

    /// Whether the recovered miner equals the declared coinbase.
    pub fn miner_matches_coinbase(&self) -> bool {
        matches!(&self.miner, Ok(miner) if *miner == self.coinbase)
    }

    /// Whether every field succeeded.
    pub fn is_complete(&self) -> bool {
        self.miner.is_ok()
            && self.validator.is_ok()
            && self.validators.is_ok()
            && self.penalties.is_ok()
    }
}

fn overlay<T>(result: Result<T, SealError>, rejected: Option<RecordError>) -> Result<T, FieldError> {
    match rejected {
        Some(err) => Err(FieldError::Record(err)),
        None => result.map_err(FieldError::Seal),
    }
}

/// Result for one input record.
pub type RecordOutcome = Result<BlockOutcome, RecordError>;

/// Convert and inspect records, preserving input order.
pub fn decode_records<S: SealRecoveryApi>(
    service: &S,
    records: Vec<Result<BlockRecord, RecordError>>,
) -> Vec<RecordOutcome> {
    let mut inputs: Vec<SealInput> = Vec::with_capacity(records.len());
    let mut carried: Vec<(RejectedFields, Vec<Value>)> = Vec::with_capacity(records.len());
    let mut failed: Vec<(usize, RecordError)> = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match record.and_then(BlockRecord::decode) {
            Ok(decoded) => {
                for err in decoded.rejected.iter() {
                    warn!(index, field = err.field(), kind = err.kind(), "{}", err);
                }
                inputs.push(decoded.input);
                carried.push((decoded.rejected, decoded.transactions));
            }
            Err(err) => {
                warn!(index, field = err.field(), kind = err.kind(), "{}", err);
                failed.push((index, err));
            }
        }
    }

    let mut outcomes: Vec<RecordOutcome> = service
        .inspect_batch(inputs)
        .into_iter()
        .zip(carried)
        .map(|(report, (rejected, transactions))| {
            Ok(BlockOutcome::new(report, rejected, transactions))
        })
        .collect();

    // Ascending indices, so each insert lands at its original position.
    for (index, err) in failed {
        outcomes.insert(index, Err(err));
    }
    outcomes
}

/// Whether any record or any field of any report failed.
pub fn has_failures(outcomes: &[RecordOutcome]) -> bool {
    outcomes
        .iter()
        .any(|outcome| !matches!(outcome, Ok(block) if block.is_complete()))
}
