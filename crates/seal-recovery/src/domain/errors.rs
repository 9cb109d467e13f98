//! # Seal Recovery Errors
//!
//! Error types for header validation, signature recovery and blob decoding.
//!
//! Each independent operation (miner recovery, validator recovery, validator
//! blob decode, penalty blob decode) fails with its own error; none of them
//! aborts the others.

use shared_types::Address;
use thiserror::Error;

/// Why a 65-byte seal could not be turned into a public key.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SignatureFault {
    /// The signature was not exactly 65 bytes.
    #[error("expected 65 bytes, got {0}")]
    Length(usize),
    /// The recovery byte is not 0-3, 27/28 or an EIP-155 value (>= 35).
    #[error("invalid recovery id {0}")]
    RecoveryId(u8),
    /// `r` or `s` is zero or not below the curve order.
    #[error("r or s outside [1, n-1]")]
    Scalar,
    /// No curve point could be reconstructed for the given `r` and parity.
    #[error("public key recovery failed")]
    Recovery,
}

/// Errors that can occur while recovering header signers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SealError {
    /// Extra-data is shorter than the 65-byte seal.
    #[error("extra-data 65 byte suffix signature missing (extra-data is {len} bytes)")]
    MissingSignature { len: usize },

    /// Malformed or non-recoverable ECDSA signature.
    #[error("invalid signature: {0}")]
    InvalidSignature(SignatureFault),

    /// Validator blob length is not a multiple of the slot width.
    #[error("malformed validator blob: {len} bytes is not a multiple of 20")]
    MalformedValidatorBlob { len: usize },

    /// Penalty blob length is not a multiple of the address width.
    #[error("malformed penalty blob: {len} bytes is not a multiple of 20")]
    MalformedPenaltyBlob { len: usize },

    /// Recovered signer does not match the expected signer.
    #[error("signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch { expected: Address, actual: Address },
}

impl SealError {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SealError::MissingSignature { .. } => "MissingSignature",
            SealError::InvalidSignature(_) => "InvalidSignature",
            SealError::MalformedValidatorBlob { .. } => "MalformedValidatorBlob",
            SealError::MalformedPenaltyBlob { .. } => "MalformedPenaltyBlob",
            SealError::SignerMismatch { .. } => "SignerMismatch",
        }
    }
}
