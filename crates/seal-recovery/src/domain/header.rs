//! # Header Model
//!
//! The signable portion of an XDPoS block header.
//!
//! The producer's seal lives inside `extra_data`: its trailing
//! [`EXTRA_SEAL`] bytes are the signature and are excluded from the signing
//! hash. [`Header`] checks that those bytes exist once, at construction,
//! keeps a fixed-width copy of the seal, and hands out a borrowed view of the
//! seal-free prefix.

use super::encoding;
use super::errors::SealError;
use super::hashing::keccak256;
use shared_types::{Address, BlockNonce, Bloom, Hash, U256};

/// Width of the seal signature at the end of `extra_data`.
pub const EXTRA_SEAL: usize = 65;

/// Raw header field values, as decoded by the I/O layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderFields {
    pub parent_hash: Hash,
    pub uncle_hash: Hash,
    /// Block beneficiary (`miner` in RPC output).
    pub coinbase: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: U256,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    /// Vanity bytes followed by the 65-byte seal.
    pub extra_data: Vec<u8>,
    pub mix_hash: Hash,
    pub nonce: BlockNonce,
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self {
            parent_hash: [0u8; 32],
            uncle_hash: [0u8; 32],
            coinbase: [0u8; 20],
            state_root: [0u8; 32],
            transactions_root: [0u8; 32],
            receipts_root: [0u8; 32],
            logs_bloom: [0u8; 256],
            difficulty: U256::zero(),
            number: U256::zero(),
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Vec::new(),
            mix_hash: [0u8; 32],
            nonce: [0u8; 8],
        }
    }
}

/// A header whose `extra_data` is known to carry a seal.
///
/// Immutable once built; the only way in is [`Header::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    fields: HeaderFields,
    seal: [u8; EXTRA_SEAL],
}

impl Header {
    /// Validate the seal invariant and wrap the fields.
    ///
    /// # Errors
    /// * `SealError::MissingSignature` - `extra_data` is shorter than 65 bytes
    pub fn new(fields: HeaderFields) -> Result<Self, SealError> {
        let Some(seal) = fields.extra_data.last_chunk::<EXTRA_SEAL>().copied() else {
            return Err(SealError::MissingSignature {
                len: fields.extra_data.len(),
            });
        };
        Ok(Self { fields, seal })
    }

    /// Read access to the underlying field values.
    pub fn fields(&self) -> &HeaderFields {
        &self.fields
    }

    /// Block number.
    pub fn number(&self) -> U256 {
        self.fields.number
    }

    /// Block beneficiary as declared in the header.
    pub fn coinbase(&self) -> Address {
        self.fields.coinbase
    }

    /// `extra_data` without its trailing seal. Empty when `extra_data` is
    /// exactly 65 bytes.
    pub fn extra_without_seal(&self) -> &[u8] {
        let extra = &self.fields.extra_data;
        &extra[..extra.len() - EXTRA_SEAL]
    }

    /// The trailing 65-byte seal.
    pub fn seal(&self) -> &[u8; EXTRA_SEAL] {
        &self.seal
    }

    /// Keccak-256 of the canonical encoding; the digest both seals sign.
    pub fn seal_hash(&self) -> Hash {
        keccak256(&encoding::encode(self))
    }
}

impl TryFrom<HeaderFields> for Header {
    type Error = SealError;

    fn try_from(fields: HeaderFields) -> Result<Self, Self::Error> {
        Header::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with_extra(len: usize) -> HeaderFields {
        HeaderFields {
            extra_data: (0..len).map(|i| i as u8).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extra_exactly_seal_width() {
        let header = Header::new(fields_with_extra(65)).unwrap();
        assert!(header.extra_without_seal().is_empty());
        assert_eq!(header.seal().len(), EXTRA_SEAL);
        assert_eq!(header.seal()[0], 0);
    }

    #[test]
    fn test_extra_too_short() {
        assert_eq!(
            Header::new(fields_with_extra(64)),
            Err(SealError::MissingSignature { len: 64 })
        );
        assert_eq!(
            Header::new(fields_with_extra(0)),
            Err(SealError::MissingSignature { len: 0 })
        );
    }

    #[test]
    fn test_seal_split_with_vanity() {
        let header = Header::new(fields_with_extra(32 + 65)).unwrap();
        assert_eq!(header.extra_without_seal().len(), 32);
        assert_eq!(header.extra_without_seal()[31], 31);
        assert_eq!(header.seal()[0], 32);
        assert_eq!(header.seal()[64], 96);
    }

    #[test]
    fn test_seal_is_fixed_width_suffix() {
        let fields = fields_with_extra(10 + 65);
        let expected: Vec<u8> = fields.extra_data[10..].to_vec();
        let header = Header::new(fields).unwrap();
        let seal: &[u8; EXTRA_SEAL] = header.seal();
        assert_eq!(seal.as_slice(), expected.as_slice());
        assert_eq!(
            [header.extra_without_seal(), seal.as_slice()].concat(),
            header.fields().extra_data
        );
    }

    #[test]
    fn test_try_from() {
        let header: Result<Header, _> = fields_with_extra(70).try_into();
        assert!(header.is_ok());
    }
}
