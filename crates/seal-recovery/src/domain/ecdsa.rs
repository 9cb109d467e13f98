//! # ECDSA Public Key Recovery (secp256k1)
//!
//! Pure domain logic for turning a header seal back into the address that
//! produced it.
//!
//! ## Conventions
//!
//! - **Recovery byte**: 0-3 (raw), 27/28 (legacy offset) or >= 35 (EIP-155,
//!   parity `(v - 35) % 2`).
//! - **Scalar range**: R and S must be in [1, n-1].
//! - **High S**: accepted. The signature is normalised to low S and the
//!   parity flipped, which recovers the same key. Seals are not transactions
//!   and EIP-2 does not apply to them.
//! - **Address**: last 20 bytes of keccak256 over the 64 key bytes after the
//!   `0x04` prefix.
//! - Uses the k256 crate for curve arithmetic.

use super::entities::{PublicKey, SealSignature};
use super::errors::{SealError, SignatureFault};
use super::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{Address, Hash};

/// Recover the uncompressed public key that signed `digest`.
///
/// # Errors
/// * `SealError::InvalidSignature` - bad recovery byte, scalar out of range,
///   or no curve point for the given R and parity
pub fn recover_public_key(
    digest: &Hash,
    signature: &SealSignature,
) -> Result<PublicKey, SealError> {
    let mut recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let mut sig = Signature::from_slice(&sig_bytes)
        .map_err(|_| SealError::InvalidSignature(SignatureFault::Scalar))?;

    // (r, n - s) with the opposite parity names the same key
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let recovered = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SealError::InvalidSignature(SignatureFault::Recovery))?;

    let point = recovered.to_encoded_point(false);
    let mut public_key = [0u8; 65];
    public_key.copy_from_slice(point.as_bytes());
    Ok(public_key)
}

/// Derive an address from an uncompressed public key.
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let hash = keccak256(&public_key[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer's address from a signature over `digest`.
pub fn recover_address(digest: &Hash, signature: &SealSignature) -> Result<Address, SealError> {
    recover_public_key(digest, signature).map(|key| public_key_to_address(&key))
}

/// Recover the signer from raw 65 bytes.
pub fn recover_address_from_slice(digest: &Hash, signature: &[u8]) -> Result<Address, SealError> {
    let signature = SealSignature::from_slice(signature)?;
    recover_address(digest, &signature)
}

/// Recover the signer and check it against `expected`.
///
/// # Errors
/// * `SealError::SignerMismatch` - recovery succeeded but names someone else
pub fn verify_signer(
    digest: &Hash,
    signature: &SealSignature,
    expected: Address,
) -> Result<Address, SealError> {
    let actual = recover_address(digest, signature)?;
    if actual != expected {
        return Err(SealError::SignerMismatch { expected, actual });
    }
    Ok(actual)
}

/// Parse recovery ID from the v byte.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SealError> {
    let id = match v {
        0..=3 => v,
        27 | 28 => v - 27,
        35.. => (v - 35) % 2,
        _ => return Err(SealError::InvalidSignature(SignatureFault::RecoveryId(v))),
    };

    RecoveryId::from_byte(id).ok_or(SealError::InvalidSignature(SignatureFault::RecoveryId(v)))
}

// =============================================================================
// TEST HELPERS
// =============================================================================
