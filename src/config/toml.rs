//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Test network section
    #[serde(default)]
    pub network: NetworkSection,

    /// Adapter identity section
    #[serde(default)]
    pub adapter: AdapterSection,

    /// Timeouts section
    #[serde(default)]
    pub test: TestSection,

    /// Operator interaction section
    #[serde(default)]
    pub ui: UiSection,

    /// Report output section
    #[serde(default)]
    pub report: ReportSection,

    /// Simulation mode section
    #[serde(default)]
    pub simulate: SimulateSection,
}

/// Test network section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSection {
    /// Network SSID
    pub ssid: Option<String>,

    /// WPA2-Personal passphrase
    pub passphrase: Option<String>,
}

/// Adapter identity section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSection {
    /// USB vendor ID (four hex digits)
    pub vendor_id: Option<String>,

    /// USB product ID (four hex digits)
    pub product_id: Option<String>,

    /// Adapter description substring
    pub description: Option<String>,
}

/// Timeouts section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSection {
    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,

    /// Timeout for other external commands in seconds
    pub command_timeout: Option<u64>,
}

/// Operator interaction section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiSection {
    /// Print progress lines
    #[serde(default)]
    pub show_progress: bool,

    /// Save results without asking
    #[serde(default)]
    pub auto_save: bool,

    /// Skip real connects
    #[serde(default)]
    pub simulate_result: bool,
}

/// Report output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// Report file path
    pub path: Option<PathBuf>,
}

/// Simulation mode section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateSection {
    /// Interface names reported instead of real discovery
    pub interfaces: Option<Vec<String>>,

    /// Delay before each simulated verdict in milliseconds
    pub delay_ms: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# wifi-tester Configuration File

[network]
# SSID of the test network (required)
# ssid = "FactoryTest"

# WPA2-Personal passphrase, 8 to 63 characters (required unless simulating)
# passphrase = "change-me"

[adapter]
# USB vendor/product IDs matched on Linux (default: MediaTek MT7601U)
vendor_id = "148f"
product_id = "7601"

# Description substring matched on Windows
description = "MT7601U"

[test]
# Upper bound for each connect attempt in seconds (default: 20)
connect_timeout = 20

# Upper bound for every other external command in seconds (default: 30)
# command_timeout = 30

[ui]
# Print [n/total] progress lines
show_progress = true

# Save results without asking once every adapter is tested
# auto_save = false

# Skip real connects; every adapter passes with a random MAC
# simulate_result = false

[report]
# CSV report file (rows are appended)
# path = "wifi_test_results.csv"

[simulate]
# Interfaces reported in simulation mode
# interfaces = ["wlan0", "wlan1"]

# Delay before each simulated verdict in milliseconds (default: 2000)
# delay_ms = 2000
"#
    .to_string()
}
