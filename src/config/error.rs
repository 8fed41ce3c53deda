//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// SSID is empty or longer than 32 bytes.
    #[error("Invalid SSID '{ssid}': {reason}")]
    InvalidSsid {
        /// The rejected SSID
        ssid: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Passphrase is not a valid WPA2-Personal pass-phrase.
    ///
    /// The value itself is never included.
    #[error("Invalid passphrase: {reason}")]
    InvalidPassphrase {
        /// Reason for invalidity
        reason: String,
    },

    /// Vendor or product ID is not four hex digits.
    #[error("Invalid {field} '{value}': expected exactly four hex digits")]
    InvalidHexId {
        /// Name of the field
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Any other field rejected by validation.
    #[error("Invalid {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The network SSID field.
    pub const SSID: &str = "ssid";
    /// The network passphrase field.
    pub const PASSPHRASE: &str = "passphrase";
    /// The USB vendor ID field.
    pub const VENDOR_ID: &str = "vendor_id";
    /// The USB product ID field.
    pub const PRODUCT_ID: &str = "product_id";
    /// The adapter description field.
    pub const DESCRIPTION: &str = "description";
    /// The connect timeout field.
    pub const CONNECT_TIMEOUT: &str = "connect_timeout";
    /// The command timeout field.
    pub const COMMAND_TIMEOUT: &str = "command_timeout";
    /// The simulated interface list.
    pub const SIMULATE_INTERFACES: &str = "simulate.interfaces";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
