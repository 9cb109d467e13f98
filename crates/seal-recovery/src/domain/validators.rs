//! # Slot Blob Decoding
//!
//! XDPoS headers carry two packed tables next to the seal: the validator
//! table and the penalty list. Both are concatenations of 20-byte slots
//! with no length prefix and no separator.
//!
//! Validator slots are read as big-endian unsigned integers; penalty slots
//! are addresses. Order is preserved and duplicates are kept.

use super::errors::SealError;
use shared_types::{Address, ADDRESS_LENGTH, U256};

/// Width of one validator slot.
pub const VALIDATOR_SLOT_WIDTH: usize = 20;

/// Decode a validator blob into its identifiers, in blob order.
///
/// # Errors
/// * `SealError::MalformedValidatorBlob` - length not a multiple of 20
pub fn decode_validators(raw: &[u8]) -> Result<Vec<U256>, SealError> {
    if raw.len() % VALIDATOR_SLOT_WIDTH != 0 {
        return Err(SealError::MalformedValidatorBlob { len: raw.len() });
    }
    Ok(raw
        .chunks_exact(VALIDATOR_SLOT_WIDTH)
        .map(U256::from_big_endian)
        .collect())
}

/// Decode a penalty blob into addresses, in blob order.
///
/// # Errors
/// * `SealError::MalformedPenaltyBlob` - length not a multiple of 20
pub fn decode_penalties(raw: &[u8]) -> Result<Vec<Address>, SealError> {
    if raw.len() % ADDRESS_LENGTH != 0 {
        return Err(SealError::MalformedPenaltyBlob { len: raw.len() });
    }
    Ok(raw
        .chunks_exact(ADDRESS_LENGTH)
        .map(|slot| {
            let mut address = [0u8; ADDRESS_LENGTH];
            address.copy_from_slice(slot);
            address
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(value: u64) -> [u8; 20] {
        let mut out = [0u8; 20];
        out[12..].copy_from_slice(&value.to_be_bytes());
        out
    }

    #[test]
    fn test_empty_blob() {
        assert_eq!(decode_validators(&[]), Ok(vec![]));
        assert_eq!(decode_penalties(&[]), Ok(vec![]));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let blob = [slot(3), slot(1), slot(3), slot(0)].concat();
        assert_eq!(
            decode_validators(&blob),
            Ok(vec![
                U256::from(3u64),
                U256::from(1u64),
                U256::from(3u64),
                U256::zero()
            ])
        );
    }

    #[test]
    fn test_full_width_slot_is_big_endian() {
        let mut blob = [0u8; 20];
        blob[0] = 0x01;
        let expected = U256::from(2u64).pow(U256::from(152u64));
        assert_eq!(decode_validators(&blob), Ok(vec![expected]));
    }

    #[test]
    fn test_misaligned_blob() {
        assert_eq!(
            decode_validators(&[0u8; 21]),
            Err(SealError::MalformedValidatorBlob { len: 21 })
        );
        assert_eq!(
            decode_validators(&[0u8; 19]),
            Err(SealError::MalformedValidatorBlob { len: 19 })
        );
        assert_eq!(
            decode_penalties(&[0u8; 41]),
            Err(SealError::MalformedPenaltyBlob { len: 41 })
        );
    }

    #[test]
    fn test_penalties_are_addresses() {
        let a = [0xAAu8; 20];
        let b = [0xBBu8; 20];
        let blob = [a, b].concat();
        assert_eq!(decode_penalties(&blob), Ok(vec![a, b]));
    }
}
