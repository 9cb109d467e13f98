//! # Header Primitives
//!
//! Fixed-width byte types that make up a block header's signable fields.
//!
//! All widths follow the Ethereum header layout that XDPoS inherits. Widths
//! are enforced by the array types themselves, so a value of one of these
//! types is always well-formed.

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Width of a Keccak-256 hash in bytes.
pub const HASH_LENGTH: usize = 32;

/// Width of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Width of a header log bloom in bytes.
pub const BLOOM_LENGTH: usize = 256;

/// Width of a header nonce in bytes.
pub const NONCE_LENGTH: usize = 8;

/// A 32-byte Keccak-256 hash (parent hash, state root, mix digest, ...).
pub type Hash = [u8; HASH_LENGTH];

/// A 20-byte account address.
pub type Address = [u8; ADDRESS_LENGTH];

/// A 256-byte log bloom bitmap.
pub type Bloom = [u8; BLOOM_LENGTH];

/// An 8-byte block nonce.
pub type BlockNonce = [u8; NONCE_LENGTH];

/// Encode a 64-bit integer as a block nonce (big-endian).
pub fn encode_nonce(value: u64) -> BlockNonce {
    value.to_be_bytes()
}

/// Build a bloom from a possibly shorter byte string.
///
/// Shorter input is right-aligned and left-padded with zeros. Returns `None`
/// when the input is longer than [`BLOOM_LENGTH`].
pub fn bloom_from_slice(bytes: &[u8]) -> Option<Bloom> {
    if bytes.len() > BLOOM_LENGTH {
        return None;
    }
    let mut bloom = [0u8; BLOOM_LENGTH];
    bloom[BLOOM_LENGTH - bytes.len()..].copy_from_slice(bytes);
    Some(bloom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_nonce_big_endian() {
        assert_eq!(encode_nonce(0), [0u8; 8]);
        assert_eq!(encode_nonce(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(
            encode_nonce(0x0102_0304_0506_0708),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_bloom_left_padding() {
        let bloom = bloom_from_slice(&[0xAB, 0xCD]).unwrap();
        assert_eq!(bloom[254], 0xAB);
        assert_eq!(bloom[255], 0xCD);
        assert!(bloom[..254].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bloom_full_width() {
        let bytes = [0x11u8; BLOOM_LENGTH];
        assert_eq!(bloom_from_slice(&bytes), Some(bytes));
    }

    #[test]
    fn test_bloom_too_long() {
        assert!(bloom_from_slice(&[0u8; BLOOM_LENGTH + 1]).is_none());
    }
}
