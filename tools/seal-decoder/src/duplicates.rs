//! # Duplicate System Transactions
//!
//! Masternodes send block-signing and randomization transactions to two
//! system contracts. A miner that re-broadcasts the same one shows up as a
//! transaction with the same nonce and input as the previous system
//! transaction from that miner.
//!
//! Blocks are walked in input order. Only transactions sent by the block's
//! recovered miner to a system contract are considered; the last one per
//! miner is remembered and each repeat of it is reported.

use crate::decode::RecordOutcome;
use crate::error::RecordError;
use crate::record::{decode_fixed, decode_hex, Quantity};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{Address, Hash, U256};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Block-signer contract, target of block signing transactions.
pub const BLOCK_SIGNER_CONTRACT: Address = system_address(0x92);
/// Randomize contract, target of secret and opening transactions.
pub const RANDOMIZE_CONTRACT: Address = system_address(0x94);

const fn system_address(last: u8) -> Address {
    let mut address = [0u8; 20];
    address[19] = last;
    address
}

/// Whether `address` is one of the watched system contracts.
pub fn is_system_recipient(address: &Address) -> bool {
    *address == BLOCK_SIGNER_CONTRACT || *address == RANDOMIZE_CONTRACT
}

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    nonce: Quantity,
    #[serde(default)]
    input: String,
}

/// A transaction with the fields duplicate detection compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: Hash,
    pub from: Address,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub nonce: U256,
    pub input: Vec<u8>,
}

impl Transaction {
    /// Decode one `transactions` entry.
    ///
    /// Returns `Ok(None)` for hash-only entries (blocks fetched without full
    /// transaction objects).
    pub fn from_value(value: &Value) -> Result<Option<Self>, RecordError> {
        if value.is_string() {
            return Ok(None);
        }
        let record = TransactionRecord::deserialize(value)?;
        let to = match record.to.as_deref() {
            None | Some("") => None,
            Some(text) => Some(decode_fixed("to", text)?),
        };
        Ok(Some(Self {
            hash: decode_fixed("hash", &record.hash)?,
            from: decode_fixed("from", &record.from)?,
            to,
            nonce: record.nonce.to_u256("nonce")?,
            input: decode_hex("input", &record.input)?,
        }))
    }
}

/// A repeated system transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub hash: Hash,
    pub number: U256,
    pub miner: Address,
}

/// Last system transaction seen per miner.
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    last: HashMap<Address, (U256, Vec<u8>)>,
}

impl DuplicateFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one block's transactions; returns the duplicates found in it.
    pub fn observe_block(
        &mut self,
        number: U256,
        miner: Address,
        transactions: &[Transaction],
    ) -> Vec<Duplicate> {
        let mut found = Vec::new();
        for tx in transactions {
            let to_system = tx.to.as_ref().is_some_and(is_system_recipient);
            if !to_system || tx.from != miner {
                continue;
            }

            match self.last.get(&miner) {
                Some((nonce, input)) if *nonce == tx.nonce && *input == tx.input => {
                    found.push(Duplicate {
                        hash: tx.hash,
                        number,
                        miner,
                    });
                }
                _ => {
                    self.last.insert(miner, (tx.nonce, tx.input.clone()));
                }
            }
        }
        found
    }
}

/// Outcome of scanning decoded blocks.
#[derive(Debug, Default)]
pub struct DuplicateScan {
    pub duplicates: Vec<Duplicate>,
    /// Blocks that could not be scanned: record rejected or miner unknown.
    pub skipped_blocks: usize,
}

/// Scan decoded blocks in order.
pub fn find_duplicates(outcomes: &[RecordOutcome]) -> DuplicateScan {
    let mut finder = DuplicateFinder::new();
    let mut scan = DuplicateScan::default();

    for (index, outcome) in outcomes.iter().enumerate() {
        let Ok(block) = outcome else {
            scan.skipped_blocks += 1;
            continue;
        };
        let Ok(miner) = &block.miner else {
            warn!(index, number = %block.number, "Skipping block without a recovered miner");
            scan.skipped_blocks += 1;
            continue;
        };

        let transactions: Vec<Transaction> = block
            .transactions
            .iter()
            .filter_map(|value| match Transaction::from_value(value) {
                Ok(tx) => tx,
                Err(err) => {
                    warn!(
                        index,
                        number = %block.number,
                        kind = err.kind(),
                        "Skipping transaction: {}",
                        err
                    );
                    None
                }
            })
            .collect();

        let found = finder.observe_block(block.number, *miner, &transactions);
        debug!(
            index,
            number = %block.number,
            transactions = transactions.len(),
            duplicates = found.len(),
            "Scanned block"
        );
        scan.duplicates.extend(found);
    }
    scan
}
