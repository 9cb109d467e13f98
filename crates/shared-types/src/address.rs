//! # Address Rendering
//!
//! EIP-55 mixed-case checksum encoding for 20-byte addresses.

use crate::entities::Address;
use sha3::{Digest, Keccak256};

/// Prefix style used when rendering an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressPrefix {
    /// Ethereum style `0x` prefix.
    #[default]
    Hex,
    /// XDC network style `xdc` prefix.
    Xdc,
}

impl AddressPrefix {
    /// The literal prefix string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressPrefix::Hex => "0x",
            AddressPrefix::Xdc => "xdc",
        }
    }
}

/// Render an address with EIP-55 checksum casing and a `0x` prefix.
pub fn to_checksum_hex(address: &Address) -> String {
    to_checksum_with_prefix(address, AddressPrefix::Hex)
}

/// Render an address with EIP-55 checksum casing and the given prefix.
///
/// The checksum is always computed over the lowercase hex digits, so the
/// casing is identical for both prefixes.
pub fn to_checksum_with_prefix(address: &Address, prefix: AddressPrefix) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(prefix.as_str().len() + lower.len());
    out.push_str(prefix.as_str());
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
