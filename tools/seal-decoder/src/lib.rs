//! # Seal Decoder
//!
//! Command-line adapter over the seal recovery core: reads XDC block
//! records as JSON, recovers the miner and validator of each block, and
//! prints the result as text or JSON.
//!
//! ## Modules
//!
//! - `record`: JSON record shape and hex/quantity decoding
//! - `decode`: batch conversion and inspection, order preserving
//! - `duplicates`: repeated system transactions per miner
//! - `report`: text and JSON rendering
//! - `config`: defaults, environment and flag resolution

pub mod config;
pub mod decode;
pub mod duplicates;
pub mod error;
pub mod record;
pub mod report;

pub use config::{DecoderConfig, OutputFormat, PrefixStyle};
pub use decode::{decode_records, has_failures, BlockOutcome, RecordOutcome};
pub use duplicates::{find_duplicates, Duplicate, DuplicateFinder, DuplicateScan, Transaction};
pub use error::{FieldError, RecordError};
pub use record::{parse_records, BlockRecord, DecodedRecord, ParsedInput, Quantity};
pub use report::{render, render_duplicates};
