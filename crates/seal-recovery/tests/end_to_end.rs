//! # End-to-End Seal Recovery Tests
//!
//! Builds realistic sealed headers with known keys and checks that the
//! public API reproduces the signers exactly.
//!
//! ## Test Categories
//!
//! 1. **Known signer** - fixed private key, fixed header, known address
//! 2. **Properties** - signature round-trip and blob decoding over random input
//! 3. **Boundaries** - extra-data exactly at and below the seal width

use k256::ecdsa::SigningKey;
use proptest::prelude::*;
use seal_recovery::{
    decode_validators, encode, keccak256, recover_address, recover_address_from_slice, Header,
    HeaderFields, SealError, SealInput, SealRecoveryApi, SealRecoveryService, SealSignature,
    EXTRA_SEAL,
};
use shared_types::{encode_nonce, to_checksum_hex, Address, U256};

// =============================================================================
// TEST HELPERS
// =============================================================================

fn key_from_byte(byte: u8) -> SigningKey {
    let mut secret = [0u8; 32];
    secret[31] = byte;
    SigningKey::from_slice(&secret).unwrap()
}

fn address_of(key: &SigningKey) -> Address {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

fn sign(digest: &[u8; 32], key: &SigningKey) -> [u8; 65] {
    let (sig, recid) = key.sign_prehash_recoverable(digest).unwrap();
    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = recid.to_byte();
    out
}

/// A header shaped like an XDC mainnet block, with a placeholder seal.
fn mainnet_like_fields() -> HeaderFields {
    let mut extra = b"XDC vanity".to_vec();
    extra.resize(32, 0);
    extra.extend_from_slice(&[0u8; EXTRA_SEAL]);

    HeaderFields {
        parent_hash: [0x1a; 32],
        uncle_hash: keccak256(&[0xc0]),
        coinbase: address_of(&key_from_byte(1)),
        state_root: [0x2b; 32],
        transactions_root: [0x3c; 32],
        receipts_root: [0x4d; 32],
        logs_bloom: [0u8; 256],
        difficulty: U256::from(2u64),
        number: U256::from(36_381_303u64),
        gas_limit: 420_000_000,
        gas_used: 21_000,
        timestamp: 1_700_000_000,
        extra_data: extra,
        mix_hash: [0u8; 32],
        nonce: encode_nonce(0),
    }
}

/// Replace the placeholder seal with a real one from `key`.
fn seal_with(mut fields: HeaderFields, key: &SigningKey) -> (HeaderFields, [u8; 32]) {
    let digest = Header::new(fields.clone()).unwrap().seal_hash();
    let len = fields.extra_data.len();
    fields.extra_data[len - EXTRA_SEAL..].copy_from_slice(&sign(&digest, key));
    (fields, digest)
}

// =============================================================================
// KNOWN SIGNER
// =============================================================================

#[test]
fn test_known_signer_reproduced() {
    let miner_key = key_from_byte(1);
    let (fields, digest) = seal_with(mainnet_like_fields(), &miner_key);
    let header = Header::new(fields).unwrap();

    // Sealing does not change the digest.
    assert_eq!(header.seal_hash(), digest);

    let miner = recover_address_from_slice(&digest, header.seal()).unwrap();
    assert_eq!(
        to_checksum_hex(&miner),
        "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
    );
    assert_eq!(miner, header.coinbase());
}

#[test]
fn test_full_report_for_sealed_block() {
    let miner_key = key_from_byte(1);
    let validator_key = key_from_byte(2);
    let (fields, digest) = seal_with(mainnet_like_fields(), &miner_key);

    let mut validators = Vec::new();
    for id in [7u8, 3, 7] {
        let mut slot = [0u8; 20];
        slot[19] = id;
        validators.extend_from_slice(&slot);
    }

    let report = SealRecoveryService::new().inspect(SealInput {
        header: fields,
        validator_seal: sign(&digest, &validator_key).to_vec(),
        validators,
        penalties: address_of(&validator_key).to_vec(),
    });

    assert_eq!(report.seal_hash, Some(digest));
    assert_eq!(report.miner, Ok(address_of(&miner_key)));
    assert_eq!(
        report.validator.as_ref().map(to_checksum_hex),
        Ok("0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF".to_string())
    );
    assert_eq!(
        report.validators,
        Ok(vec![U256::from(7u64), U256::from(3u64), U256::from(7u64)])
    );
    assert_eq!(report.penalties, Ok(vec![address_of(&validator_key)]));
    assert!(report.miner_matches_coinbase());
}

#[test]
fn test_tampered_field_changes_signer() {
    let miner_key = key_from_byte(1);
    let (mut fields, _) = seal_with(mainnet_like_fields(), &miner_key);
    fields.gas_used += 1;

    let header = Header::new(fields).unwrap();
    let recovered = SealRecoveryService::new().recover_miner(&header);
    assert_ne!(recovered, Ok(address_of(&miner_key)));
}

// =============================================================================
// BOUNDARIES
// =============================================================================

#[test]
fn test_extra_data_boundary() {
    let mut fields = mainnet_like_fields();
    fields.extra_data = vec![0u8; EXTRA_SEAL];
    let header = Header::new(fields.clone()).unwrap();
    assert!(header.extra_without_seal().is_empty());
    assert!(!encode(&header).is_empty());

    fields.extra_data.pop();
    assert_eq!(
        Header::new(fields),
        Err(SealError::MissingSignature { len: 64 })
    );
}

#[test]
fn test_digest_stable_across_calls() {
    let header = Header::new(mainnet_like_fields()).unwrap();
    let first = header.seal_hash();
    let _ = keccak256(b"unrelated work in between");
    assert_eq!(header.seal_hash(), first);
    assert_eq!(keccak256(&encode(&header)), first);
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_signature_round_trip(secret in any::<[u8; 32]>(), digest in any::<[u8; 32]>()) {
        let key = match SigningKey::from_slice(&secret) {
            Ok(key) => key,
            Err(_) => return Ok(()),
        };
        let sig = SealSignature::from_slice(&sign(&digest, &key)).unwrap();
        prop_assert_eq!(recover_address(&digest, &sig), Ok(address_of(&key)));
    }

    #[test]
    fn prop_validator_blob_length(raw in proptest::collection::vec(any::<u8>(), 0..200)) {
        match decode_validators(&raw) {
            Ok(ids) => {
                prop_assert_eq!(raw.len() % 20, 0);
                prop_assert_eq!(ids.len(), raw.len() / 20);
                for (id, slot) in ids.iter().zip(raw.chunks(20)) {
                    prop_assert_eq!(*id, U256::from_big_endian(slot));
                }
            }
            Err(err) => {
                prop_assert_ne!(raw.len() % 20, 0);
                prop_assert_eq!(err, SealError::MalformedValidatorBlob { len: raw.len() });
            }
        }
    }
}
