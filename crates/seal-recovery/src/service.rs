//! # Seal Recovery Service
//!
//! Application service layer that implements the `SealRecoveryApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SealRecoveryApi`)
//! - Delegates encoding and cryptographic operations to the domain layer
//! - Keeps the four per-block operations isolated, so one failure is
//!   reported next to the others instead of replacing them

use crate::domain::ecdsa;
use crate::domain::entities::{SealInput, SealReport};
use crate::domain::errors::SealError;
use crate::domain::header::Header;
use crate::domain::validators;
use crate::ports::inbound::SealRecoveryApi;
use rayon::prelude::*;
use shared_types::{to_checksum_hex, Address, Hash, U256};
use tracing::{debug, info, warn};

/// Seal Recovery Service.
///
/// Stateless; one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct SealRecoveryService;

impl SealRecoveryService {
    /// Create a new seal recovery service.
    pub fn new() -> Self {
        Self
    }
}

impl SealRecoveryApi for SealRecoveryService {
    fn seal_hash(&self, header: &Header) -> Hash {
        header.seal_hash()
    }

    fn recover_miner(&self, header: &Header) -> Result<Address, SealError> {
        ecdsa::recover_address_from_slice(&header.seal_hash(), header.seal())
    }

    fn recover_validator(&self, header: &Header, signature: &[u8]) -> Result<Address, SealError> {
        ecdsa::recover_address_from_slice(&header.seal_hash(), signature)
    }

    fn decode_validators(&self, raw: &[u8]) -> Result<Vec<U256>, SealError> {
        validators::decode_validators(raw)
    }

    fn decode_penalties(&self, raw: &[u8]) -> Result<Vec<Address>, SealError> {
        validators::decode_penalties(raw)
    }

    fn inspect(&self, input: SealInput) -> SealReport {
        let SealInput {
            header,
            validator_seal,
            validators,
            penalties,
        } = input;

        let number = header.number;
        let coinbase = header.coinbase;

        let validators = self.decode_validators(&validators);
        let penalties = self.decode_penalties(&penalties);

        let (seal_hash, miner, validator) = match Header::new(header) {
            Ok(header) => {
                // Both seals sign the same digest; hash once.
                let digest = header.seal_hash();
                let miner = ecdsa::recover_address_from_slice(&digest, header.seal());
                let validator = ecdsa::recover_address_from_slice(&digest, &validator_seal);
                (Some(digest), miner, validator)
            }
            Err(err) => (None, Err(err.clone()), Err(err)),
        };

        log_address(number, "miner", &miner);
        log_address(number, "validator", &validator);
        if let Err(err) = &validators {
            warn!(%number, field = "validators", kind = err.kind(), "{}", err);
        }
        if let Err(err) = &penalties {
            warn!(%number, field = "penalties", kind = err.kind(), "{}", err);
        }

        SealReport {
            number,
            coinbase,
            seal_hash,
            miner,
            validator,
            validators,
            penalties,
        }
    }

    fn inspect_batch(&self, inputs: Vec<SealInput>) -> Vec<SealReport> {
        let total = inputs.len();
        let reports: Vec<SealReport> = inputs
            .into_par_iter()
            .map(|input| self.inspect(input))
            .collect();

        let complete = reports.iter().filter(|r| r.is_complete()).count();
        info!(total, complete, failed = total - complete, "Inspected block batch");
        reports
    }
}

fn log_address(number: U256, field: &'static str, result: &Result<Address, SealError>) {
    match result {
        Ok(address) => debug!(%number, field, address = %to_checksum_hex(address), "Recovered signer"),
        Err(err) => warn!(%number, field, kind = err.kind(), "{}", err),
    }
}
