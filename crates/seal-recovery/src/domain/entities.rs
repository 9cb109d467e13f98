//! # Domain Entities
//!
//! Signatures, recovered keys, and the request/report pair used by the
//! service layer.

use super::errors::{SealError, SignatureFault};
use super::header::{HeaderFields, EXTRA_SEAL};
use shared_types::{Address, Hash, U256};

/// Uncompressed secp256k1 public key: `0x04 || x || y`.
pub type PublicKey = [u8; 65];

/// A recoverable ECDSA signature on secp256k1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery byte (0-3, 27/28, or EIP-155 adjusted)
    pub v: u8,
}

impl SealSignature {
    /// Split a 65-byte `r || s || v` string.
    ///
    /// # Errors
    /// * `SealError::InvalidSignature` - input is not exactly 65 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SealError> {
        if bytes.len() != EXTRA_SEAL {
            return Err(SealError::InvalidSignature(SignatureFault::Length(
                bytes.len(),
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Back to the compact 65-byte form.
    pub fn to_bytes(&self) -> [u8; EXTRA_SEAL] {
        let mut out = [0u8; EXTRA_SEAL];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// Everything needed to recover one block's signers.
#[derive(Clone, Debug, Default)]
pub struct SealInput {
    /// Header fields; `extra_data` carries the miner seal.
    pub header: HeaderFields,
    /// The validator's 65-byte co-signature, supplied separately.
    pub validator_seal: Vec<u8>,
    /// Packed validator slot table.
    pub validators: Vec<u8>,
    /// Packed penalised-masternode addresses.
    pub penalties: Vec<u8>,
}

/// Outcome of inspecting one block.
///
/// Each result is independent: a failure in one never hides the others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealReport {
    /// Block number from the header.
    pub number: U256,
    /// Beneficiary declared in the header.
    pub coinbase: Address,
    /// The digest both seals sign, when the header could be hashed.
    pub seal_hash: Option<Hash>,
    /// Signer of the seal embedded in `extra_data`.
    pub miner: Result<Address, SealError>,
    /// Signer of the separately supplied validator seal.
    pub validator: Result<Address, SealError>,
    /// Decoded validator identifiers, in blob order.
    pub validators: Result<Vec<U256>, SealError>,
    /// Decoded penalty addresses, in blob order.
    pub penalties: Result<Vec<Address>, SealError>,
}

impl SealReport {
    /// Whether the recovered miner equals the declared coinbase.
    pub fn miner_matches_coinbase(&self) -> bool {
        matches!(&self.miner, Ok(miner) if *miner == self.coinbase)
    }

    /// Whether every part of the report succeeded.
    pub fn is_complete(&self) -> bool {
        self.miner.is_ok()
            && self.validator.is_ok()
            && self.validators.is_ok()
            && self.penalties.is_ok()
    }
}
