//! # Shared Types Crate
//!
//! Fixed-width header primitives shared by the seal recovery core and the
//! decoder CLI.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: hash, address, bloom and nonce widths are
//!   defined once, here.
//! - **Widths in the type**: every fixed-width field is a byte array, so a
//!   mis-sized value cannot be constructed.

pub mod address;
pub mod entities;

pub use address::{to_checksum_hex, to_checksum_with_prefix, AddressPrefix};
pub use entities::*;
