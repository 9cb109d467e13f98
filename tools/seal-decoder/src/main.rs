//! Seal Decoder: recover XDPoS block signers from JSON block records.
//!
//! Reads one record (JSON object) or a batch (JSON array) from the
//! positional argument, `--file`, or stdin, and prints the recovered miner,
//! validator, validator list and penalties for each block. With
//! `--find-duplicates` it instead reports system transactions a miner sent
//! twice.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use seal_decoder::{
    decode_records, find_duplicates, has_failures, parse_records, render, render_duplicates,
    DecoderConfig, OutputFormat, PrefixStyle,
};
use seal_recovery::SealRecoveryService;

/// Seal Decoder: recover XDPoS block signers
#[derive(Parser, Debug)]
#[command(name = "seal-decoder", version)]
#[command(about = "Recover miner and validator addresses from XDC block records")]
struct Args {
    /// Block record JSON (object or array); read from stdin when omitted
    record: Option<String>,

    /// Read the block record JSON from a file
    #[arg(short, long, conflicts_with = "record")]
    file: Option<PathBuf>,

    /// Output format [env: SEAL_DECODER_FORMAT]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Address prefix style [env: SEAL_DECODER_ADDRESS_PREFIX]
    #[arg(long, value_enum)]
    address_prefix: Option<PrefixStyle>,

    /// Log filter, e.g. `seal_recovery=debug` [env: SEAL_DECODER_LOG]
    #[arg(long)]
    log: Option<String>,

    /// Worker threads for batch decoding
    #[arg(long)]
    threads: Option<usize>,

    /// Report repeated system transactions instead of block signers
    #[arg(long)]
    find_duplicates: bool,
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log filter: {}", directive))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(record) = &args.record {
        return Ok(record.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read block record from stdin")?;
    if input.trim().is_empty() {
        bail!("No block record given (pass JSON, --file, or pipe to stdin)");
    }
    Ok(input)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = DecoderConfig::from_env().with_overrides(
        args.format,
        args.address_prefix,
        args.log.clone(),
        args.threads,
    );
    init_logging(config.log_filter.as_deref())?;
    config.log_rejected();
    debug!(?config, "Loaded configuration");

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let input = read_input(&args)?;
    let parsed = parse_records(&input).context("Failed to parse block record")?;
    info!(records = parsed.records.len(), batch = parsed.is_batch, "Decoding block records");

    let service = SealRecoveryService::new();
    let outcomes = decode_records(&service, parsed.records);

    if args.find_duplicates {
        let scan = find_duplicates(&outcomes);
        info!(
            duplicates = scan.duplicates.len(),
            skipped = scan.skipped_blocks,
            "Scanned for duplicate transactions"
        );
        let rendered =
            render_duplicates(&scan.duplicates, &config).context("Failed to render duplicates")?;
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
        return Ok(if scan.skipped_blocks > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let rendered = render(&outcomes, &config, parsed.is_batch).context("Failed to render report")?;
    println!("{}", rendered);

    if has_failures(&outcomes) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
