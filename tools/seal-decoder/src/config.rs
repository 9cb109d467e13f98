//! Decoder configuration.
//!
//! Resolution order: defaults, then environment, then command-line flags.

use clap::ValueEnum;
use shared_types::AddressPrefix;
use tracing::warn;

/// Environment variable selecting the output format.
pub const ENV_FORMAT: &str = "SEAL_DECODER_FORMAT";
/// Environment variable selecting the address prefix.
pub const ENV_ADDRESS_PREFIX: &str = "SEAL_DECODER_ADDRESS_PREFIX";
/// Environment variable holding the log filter directive.
pub const ENV_LOG: &str = "SEAL_DECODER_LOG";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented text, one block per paragraph.
    #[default]
    Text,
    /// JSON object per block, array for batches.
    Json,
}

/// How addresses are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrefixStyle {
    /// `0x`-prefixed EIP-55 checksum.
    #[default]
    Hex,
    /// `xdc`-prefixed EIP-55 checksum, as shown by XDC explorers.
    Xdc,
}

impl From<PrefixStyle> for AddressPrefix {
    fn from(style: PrefixStyle) -> Self {
        match style {
            PrefixStyle::Hex => AddressPrefix::Hex,
            PrefixStyle::Xdc => AddressPrefix::Xdc,
        }
    }
}

/// An environment value that was not understood and left at its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSetting {
    pub variable: &'static str,
    pub value: String,
}

/// Decoder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    pub format: OutputFormat,
    pub address_prefix: PrefixStyle,
    /// Log filter directive (`EnvFilter` syntax).
    pub log_filter: Option<String>,
    /// Worker threads for batch decoding; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Environment values ignored while loading. Logging is not up yet at
    /// that point, so they are reported through [`Self::log_rejected`].
    pub rejected: Vec<RejectedSetting>,
}

impl DecoderConfig {
    /// Load from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_FORMAT) {
            match OutputFormat::from_str(&value, true) {
                Ok(format) => config.format = format,
                Err(_) => config.rejected.push(RejectedSetting {
                    variable: ENV_FORMAT,
                    value,
                }),
            }
        }

        if let Some(value) = lookup(ENV_ADDRESS_PREFIX) {
            match PrefixStyle::from_str(&value, true) {
                Ok(style) => config.address_prefix = style,
                Err(_) => config.rejected.push(RejectedSetting {
                    variable: ENV_ADDRESS_PREFIX,
                    value,
                }),
            }
        }

        config.log_filter = lookup(ENV_LOG).filter(|value| !value.trim().is_empty());
        config
    }

    /// Apply command-line overrides. `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        format: Option<OutputFormat>,
        address_prefix: Option<PrefixStyle>,
        log_filter: Option<String>,
        threads: Option<usize>,
    ) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(style) = address_prefix {
            self.address_prefix = style;
        }
        if log_filter.is_some() {
            self.log_filter = log_filter;
        }
        if threads.is_some() {
            self.threads = threads;
        }
        self
    }

    /// Warn about every ignored environment value.
    pub fn log_rejected(&self) {
        for setting in &self.rejected {
            warn!(
                variable = setting.variable,
                value = %setting.value,
                "Ignoring unrecognised setting"
            );
        }
    }
}
