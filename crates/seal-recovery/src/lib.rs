//! # Seal Recovery
//!
//! Recovers the two parties that endorsed an XDPoS block header, the miner
//! and the co-signing validator, from their ECDSA seals, and decodes the
//! validator and penalty tables carried alongside the header.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure encoding and cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound interface
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Pipeline
//!
//! ```text
//! HeaderFields ──Header::new──→ Header ──encode──→ RLP ──keccak256──→ digest
//!                                                                       │
//!                       miner seal (extra_data[len-65..]) ──recover────┤
//!                       validator seal ───────────────────────recover──┘
//!                                                                       ↓
//!                                                                   addresses
//! validators blob ──decode_validators──→ Vec<U256>
//! penalties blob  ──decode_penalties───→ Vec<Address>
//! ```
//!
//! ## Notes
//!
//! - Both seals are recovered against the same digest; the validator signs
//!   byte-identical content to the miner.
//! - High-S seals are accepted and normalised before recovery.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::ecdsa::{
    public_key_to_address, recover_address, recover_address_from_slice, recover_public_key,
    verify_signer,
};
pub use domain::encoding::encode;
pub use domain::entities::{PublicKey, SealInput, SealReport, SealSignature};
pub use domain::errors::{SealError, SignatureFault};
pub use domain::hashing::keccak256;
pub use domain::header::{Header, HeaderFields, EXTRA_SEAL};
pub use domain::validators::{decode_penalties, decode_validators, VALIDATOR_SLOT_WIDTH};
pub use ports::inbound::SealRecoveryApi;
pub use service::SealRecoveryService;
