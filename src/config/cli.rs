//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wifi-tester: USB Wi-Fi adapter test bench
///
/// Finds USB Wi-Fi adapters of a known hardware identity, connects each
/// one to a test network and records PASS/FAIL per adapter.
#[derive(Debug, Parser)]
#[command(name = "wifi-tester")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run (default: run)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// SSID of the test network
    #[arg(long, global = true)]
    pub ssid: Option<String>,

    /// WPA2-Personal passphrase of the test network
    #[arg(long, global = true)]
    pub passphrase: Option<String>,

    /// USB vendor ID to match (four hex digits)
    #[arg(long = "vendor-id", global = true, value_name = "HEX")]
    pub vendor_id: Option<String>,

    /// USB product ID to match (four hex digits)
    #[arg(long = "product-id", global = true, value_name = "HEX")]
    pub product_id: Option<String>,

    /// Adapter description substring to match (Windows)
    #[arg(long, global = true)]
    pub description: Option<String>,

    /// Connect timeout in seconds
    #[arg(long = "connect-timeout", global = true, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Timeout for every other external command in seconds
    #[arg(long = "command-timeout", global = true, value_name = "SECS")]
    pub command_timeout: Option<u64>,

    /// Path of the CSV report file
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    /// Print [n/total] progress lines
    #[arg(long = "show-progress", global = true)]
    pub show_progress: bool,

    /// Save results without asking once every adapter is tested
    #[arg(long = "auto-save", global = true)]
    pub auto_save: bool,

    /// Skip real connects; every adapter passes with a random MAC
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for wifi-tester
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Discover adapters and test each one in turn
    Run,
    /// Discover adapters and list them without testing
    Scan,
    /// Discover adapters and test a single one
    Test {
        /// Interface name of the adapter to test
        interface: String,
    },
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "wifi-tester.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
