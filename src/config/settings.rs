//! Configuration settings for HashBridge
//!
//! Defines the engine configuration, the supported digest algorithms,
//! and the CLI arguments of the `hashbridge` binary.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HashBridgeError, Result};

/// Default read buffer size for streaming file content (1 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// HashBridge - concurrent file content hashing
#[derive(Parser, Debug, Clone)]
#[command(name = "hashbridge")]
#[command(author = "HashBridge Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hash a list of files concurrently")]
#[command(long_about = r#"
HashBridge computes a content digest for every given file, in parallel,
and prints one result per input path in input order.

Failed files are reported as `Error: <message> Path: <path>` and do not
stop the rest of the batch.

Examples:
  hashbridge a.bin b.bin                     # SHA-256 of two files
  hashbridge -a blake3 -j 4 *.iso            # BLAKE3, four workers
  find . -type f | hashbridge --paths-from - # Paths from stdin
"#)]
pub struct CliArgs {
    /// Files to hash
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Read additional paths from a file, one per line (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    pub paths_from: Option<PathBuf>,

    /// Digest algorithm
    #[arg(short = 'a', long, value_enum, default_value = "sha256")]
    pub algorithm: HashAlgorithm,

    /// Maximum number of files hashed at once (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0", value_name = "NUM", env = "HASHBRIDGE_JOBS")]
    pub jobs: usize,

    /// Read buffer size in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE, value_name = "BYTES")]
    pub buffer_size: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Log filter directive matching the requested verbosity
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Digest algorithm used for file content
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256 - Standard cryptographic hash
    #[default]
    #[value(name = "sha256")]
    Sha256,
    /// BLAKE3 - Fast and cryptographically secure
    #[value(name = "blake3")]
    Blake3,
    /// XXHash3 - Ultra fast, non-cryptographic (128-bit)
    #[value(name = "xxhash3")]
    XXHash3,
    /// XXHash64 - Fast, non-cryptographic (64-bit)
    #[value(name = "xxhash64")]
    XXHash64,
}

impl HashAlgorithm {
    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Blake3 => 32,
            Self::XXHash3 => 16,
            Self::XXHash64 => 8,
        }
    }

    /// Length of the lowercase hex digest
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Blake3 => "BLAKE3",
            Self::XXHash3 => "XXHash3",
            Self::XXHash64 => "XXHash64",
        }
    }

    /// Numeric code used across the C ABI
    pub fn code(&self) -> u32 {
        match self {
            Self::Sha256 => 0,
            Self::Blake3 => 1,
            Self::XXHash3 => 2,
            Self::XXHash64 => 3,
        }
    }

    /// Parse a numeric code received across the C ABI
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Sha256),
            1 => Ok(Self::Blake3),
            2 => Ok(Self::XXHash3),
            3 => Ok(Self::XXHash64),
            other => Err(HashBridgeError::UnsupportedHashAlgorithm(other)),
        }
    }
}

/// Output format for the CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<result>  <path>` per line
    #[default]
    Text,
    /// JSON array of objects
    Json,
}

/// Runtime configuration for the hash engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
    /// Upper bound on files hashed simultaneously (0 = number of CPUs)
    pub max_in_flight: usize,
    /// Read buffer size in bytes
    pub buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            max_in_flight: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl EngineConfig {
    /// Create a configuration for the given algorithm with default limits
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Build a configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let config = Self {
            algorithm: args.algorithm,
            max_in_flight: args.jobs,
            buffer_size: args.buffer_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(HashBridgeError::config("buffer size must be greater than zero"));
        }
        Ok(())
    }

    /// Worker count for a batch of `batch_len` files
    ///
    /// Never more workers than files, never fewer than one.
    pub fn effective_workers(&self, batch_len: usize) -> usize {
        let cap = if self.max_in_flight == 0 {
            num_cpus::get()
        } else {
            self.max_in_flight
        };
        cap.min(batch_len).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_codes() {
        for algorithm in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Blake3,
            HashAlgorithm::XXHash3,
            HashAlgorithm::XXHash64,
        ] {
            assert_eq!(HashAlgorithm::from_code(algorithm.code()).unwrap(), algorithm);
        }
        assert!(HashAlgorithm::from_code(99).is_err());
    }

    #[test]
    fn test_hex_len() {
        assert_eq!(HashAlgorithm::Sha256.hex_len(), 64);
        assert_eq!(HashAlgorithm::XXHash64.hex_len(), 16);
    }

    #[test]
    fn test_effective_workers() {
        let config = EngineConfig {
            max_in_flight: 4,
            ..Default::default()
        };
        assert_eq!(config.effective_workers(100), 4);
        assert_eq!(config.effective_workers(2), 2);
        assert_eq!(config.effective_workers(0), 1);

        let auto = EngineConfig::default();
        assert!(auto.effective_workers(1000) >= 1);
        assert!(auto.effective_workers(1000) <= num_cpus::get());
    }

    #[test]
    fn test_validate() {
        let bad = EngineConfig {
            buffer_size: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_cli() {
        let args = CliArgs::parse_from(["hashbridge", "-a", "blake3", "-j", "3", "a", "b"]);
        let config = EngineConfig::from_cli(&args).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.max_in_flight, 3);
        assert_eq!(args.paths.len(), 2);
    }

    #[test]
    fn test_config_json() {
        let config = EngineConfig::with_algorithm(HashAlgorithm::XXHash3);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"xxhash3\""));
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
