//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the seal recovery core.

use crate::domain::entities::{SealInput, SealReport};
use crate::domain::errors::SealError;
use crate::domain::header::Header;
use shared_types::{Address, Hash, U256};

/// Primary Seal Recovery API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SealRecoveryApi: Send + Sync {
    /// Keccak-256 of the header's canonical encoding, seal excluded.
    fn seal_hash(&self, header: &Header) -> Hash;

    /// Recover the block producer from the seal inside `extra_data`.
    fn recover_miner(&self, header: &Header) -> Result<Address, SealError>;

    /// Recover the validator from its separately supplied seal.
    ///
    /// The validator signs the same digest as the miner.
    fn recover_validator(&self, header: &Header, signature: &[u8]) -> Result<Address, SealError>;

    /// Decode a packed validator table.
    fn decode_validators(&self, raw: &[u8]) -> Result<Vec<U256>, SealError>;

    /// Decode a packed penalty list.
    fn decode_penalties(&self, raw: &[u8]) -> Result<Vec<Address>, SealError>;

    /// Run every operation for one block, each in isolation.
    fn inspect(&self, input: SealInput) -> SealReport;

    /// Inspect many blocks in parallel. Output order matches input order.
    fn inspect_batch(&self, inputs: Vec<SealInput>) -> Vec<SealReport>;
}
