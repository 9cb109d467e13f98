//! Keccak-256 signing digest.
//!
//! This is the pre-standardisation Keccak padding used by Ethereum, not
//! FIPS-202 SHA3-256. The two produce different outputs for every input.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Keccak-256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
