//! # Canonical Header Encoding
//!
//! RLP serialization of the header's signable fields, byte-compatible with
//! the XDPoS `sigHash` preimage.
//!
//! Field order is fixed:
//!
//! ```text
//! [parent_hash, uncle_hash, coinbase, state_root, transactions_root,
//!  receipts_root, logs_bloom, difficulty, number, gas_limit, gas_used,
//!  timestamp, extra_data[..len - 65], mix_hash, nonce]
//! ```
//!
//! Fixed-width fields are byte strings. `difficulty` and `number` are
//! arbitrary-precision scalars and the three `u64` fields are scalars too:
//! big-endian, no leading zero bytes, zero as the empty string.

use super::header::Header;
use rlp::{Encodable, RlpStream};

/// Number of items in the signable header list.
pub const SIGNABLE_FIELD_COUNT: usize = 15;

/// Borrowed byte string appended as a single RLP value.
struct ByteString<'a>(&'a [u8]);

impl Encodable for ByteString<'_> {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(self.0);
    }
}

/// Encode the signable fields of a header (seal excluded).
pub fn encode(header: &Header) -> Vec<u8> {
    let f = header.fields();
    let mut stream = RlpStream::new_list(SIGNABLE_FIELD_COUNT);
    stream.append(&ByteString(&f.parent_hash));
    stream.append(&ByteString(&f.uncle_hash));
    stream.append(&ByteString(&f.coinbase));
    stream.append(&ByteString(&f.state_root));
    stream.append(&ByteString(&f.transactions_root));
    stream.append(&ByteString(&f.receipts_root));
    stream.append(&ByteString(&f.logs_bloom));
    stream.append(&f.difficulty);
    stream.append(&f.number);
    stream.append(&f.gas_limit);
    stream.append(&f.gas_used);
    stream.append(&f.timestamp);
    stream.append(&ByteString(header.extra_without_seal()));
    stream.append(&ByteString(&f.mix_hash));
    stream.append(&ByteString(&f.nonce));
    stream.as_raw().to_vec()
}
