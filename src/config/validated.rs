//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::EngineSettings;
use crate::network::{AdapterIdentity, Credentials, InterfaceHandle};

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Longest SSID accepted by 802.11, in bytes.
const MAX_SSID_BYTES: usize = 32;

/// WPA2-Personal pass-phrase length bounds, in printable ASCII characters.
const PASSPHRASE_CHARS: std::ops::RangeInclusive<usize> = 8..=63;

/// What the binary does once configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Discover and test every adapter.
    Run,
    /// Discover and list adapters only.
    Scan,
    /// Discover and test one named adapter.
    Test(InterfaceHandle),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => f.write_str("run"),
            Self::Scan => f.write_str("scan"),
            Self::Test(interface) => write!(f, "test {interface}"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidatedConfig {
    /// Selected subcommand
    pub mode: Mode,

    /// Test network credentials
    ///
    /// Empty in scan mode when none were configured.
    pub credentials: Credentials,

    /// Hardware identity of the adapters under test
    pub identity: AdapterIdentity,

    /// Upper bound for the association step
    pub connect_timeout: Duration,

    /// Upper bound for every other external command
    pub command_timeout: Duration,

    /// CSV report file
    pub report_path: PathBuf,

    /// Print progress lines
    pub show_progress: bool,

    /// Save without asking once a generation completes
    pub auto_save: bool,

    /// Skip real connects; every adapter passes
    pub simulate_result: bool,

    /// Interfaces reported by discovery in simulation mode
    pub simulate_interfaces: Vec<InterfaceHandle>,

    /// Delay before each simulated verdict
    pub simulate_delay: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ mode: {}, ssid: {}, adapter: {}, connect_timeout: {}s, \
             command_timeout: {}s, report: {}, show_progress: {}, auto_save: {}, simulate: {} }}",
            self.mode,
            self.credentials.ssid(),
            self.identity,
            self.connect_timeout.as_secs(),
            self.command_timeout.as_secs(),
            self.report_path.display(),
            self.show_progress,
            self.auto_save,
            self.simulate_result,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values; boolean flags
    /// are enabled when set in either source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The SSID is missing, empty or longer than 32 bytes
    /// - The passphrase is missing or not 8 to 63 characters (unless simulating)
    /// - Vendor or product ID is not four hex digits
    /// - The description is empty
    /// - A timeout is zero
    /// - The simulated interface list is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let mode = match &cli.command {
            Some(Command::Scan) => Mode::Scan,
            Some(Command::Test { interface }) => Mode::Test(InterfaceHandle::new(interface)),
            Some(Command::Run | Command::Init { .. }) | None => Mode::Run,
        };

        let ui = toml.map(|t| &t.ui);
        let show_progress = cli.show_progress || ui.is_some_and(|u| u.show_progress);
        let auto_save = cli.auto_save || ui.is_some_and(|u| u.auto_save);
        let simulate_result = cli.simulate || ui.is_some_and(|u| u.simulate_result);

        // Scan never connects, so credentials are optional there
        let credentials = if mode == Mode::Scan {
            Self::scan_credentials(cli, toml)
        } else {
            Self::resolve_credentials(cli, toml, simulate_result)?
        };

        let identity = Self::resolve_identity(cli, toml)?;

        let connect_timeout = positive_secs(
            field::CONNECT_TIMEOUT,
            cli.connect_timeout
                .or_else(|| toml.and_then(|t| t.test.connect_timeout))
                .unwrap_or(defaults::CONNECT_TIMEOUT_SECS),
        )?;
        let command_timeout = positive_secs(
            field::COMMAND_TIMEOUT,
            cli.command_timeout
                .or_else(|| toml.and_then(|t| t.test.command_timeout))
                .unwrap_or(defaults::COMMAND_TIMEOUT_SECS),
        )?;

        let report_path = cli
            .report
            .clone()
            .or_else(|| toml.and_then(|t| t.report.path.clone()))
            .unwrap_or_else(|| PathBuf::from(defaults::REPORT_PATH));

        let simulate_interfaces = Self::resolve_simulate_interfaces(toml)?;
        let simulate_delay = toml
            .and_then(|t| t.simulate.delay_ms)
            .map_or_else(defaults::simulate_delay, Duration::from_millis);

        Ok(Self {
            mode,
            credentials,
            identity,
            connect_timeout,
            command_timeout,
            report_path,
            show_progress,
            auto_save,
            simulate_result,
            simulate_interfaces,
            simulate_delay,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the per-user default file is loaded when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_default(cli, default_config_path().as_deref())
    }

    /// Like [`ValidatedConfig::load`], with an explicit fallback file.
    ///
    /// `default_path` is only used when `cli.config` is unset. A missing file
    /// there is created from the template so the next run finds it; failing
    /// to create it is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`ValidatedConfig::load`].
    pub fn load_with_default(cli: &Cli, default_path: Option<&Path>) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else if let Some(path) = default_path {
            if !path.is_file() {
                seed_default_config(path);
            }
            if path.is_file() {
                tracing::debug!("Using config file {}", path.display());
                Some(TomlConfig::load(path)?)
            } else {
                None
            }
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the engine inputs derived from this configuration.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            identity: self.identity.clone(),
            credentials: self.credentials.clone(),
            connect_timeout: self.connect_timeout,
            simulate_result: self.simulate_result,
            simulate_delay: self.simulate_delay,
        }
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        simulate: bool,
    ) -> Result<Credentials, ConfigError> {
        let ssid = cli
            .ssid
            .as_deref()
            .or_else(|| toml.and_then(|t| t.network.ssid.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::SSID, "Use --ssid or set network.ssid in config file")
            })?;
        validate_ssid(ssid)?;

        let passphrase = cli
            .passphrase
            .as_deref()
            .or_else(|| toml.and_then(|t| t.network.passphrase.as_deref()));

        let passphrase = match passphrase {
            Some(p) => {
                if !simulate {
                    validate_passphrase(p)?;
                }
                p
            }
            None if simulate => "",
            None => {
                return Err(ConfigError::missing(
                    field::PASSPHRASE,
                    "Use --passphrase or set network.passphrase in config file",
                ));
            }
        };

        Ok(Credentials::new(ssid, passphrase))
    }

    fn scan_credentials(cli: &Cli, toml: Option<&TomlConfig>) -> Credentials {
        let ssid = cli
            .ssid
            .clone()
            .or_else(|| toml.and_then(|t| t.network.ssid.clone()))
            .unwrap_or_default();
        let passphrase = cli
            .passphrase
            .clone()
            .or_else(|| toml.and_then(|t| t.network.passphrase.clone()))
            .unwrap_or_default();
        Credentials::new(ssid, passphrase)
    }

    fn resolve_identity(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<AdapterIdentity, ConfigError> {
        let adapter = toml.map(|t| &t.adapter);

        let vendor_id = cli
            .vendor_id
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.vendor_id.as_deref()))
            .unwrap_or(defaults::VENDOR_ID);
        let product_id = cli
            .product_id
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.product_id.as_deref()))
            .unwrap_or(defaults::PRODUCT_ID);
        let description = cli
            .description
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.description.as_deref()))
            .unwrap_or(defaults::DESCRIPTION);

        if description.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field::DESCRIPTION,
                reason: "must not be empty".to_string(),
            });
        }

        Ok(AdapterIdentity::new(
            parse_hex_id(field::VENDOR_ID, vendor_id)?,
            parse_hex_id(field::PRODUCT_ID, product_id)?,
            description.trim(),
        ))
    }

    fn resolve_simulate_interfaces(
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<InterfaceHandle>, ConfigError> {
        let names = toml
            .and_then(|t| t.simulate.interfaces.clone())
            .unwrap_or_else(defaults::simulate_interfaces);

        if names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field::SIMULATE_INTERFACES,
                reason: "must list at least one interface".to_string(),
            });
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: field::SIMULATE_INTERFACES,
                reason: "interface names must not be empty".to_string(),
            });
        }

        Ok(names.into_iter().map(InterfaceHandle::from).collect())
    }
}

/// Returns `<user config dir>/wifi-tester/settings.toml`, if the platform
/// has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Writes the template to `path`, creating its directory.
fn seed_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::debug!("Cannot create config dir {}: {e}", parent.display());
            return;
        }
    }
    match write_default_config(path) {
        Ok(()) => tracing::info!("Created config file {}", path.display()),
        Err(e) => tracing::debug!("{e}"),
    }
}

fn validate_ssid(ssid: &str) -> Result<(), ConfigError> {
    let reason = if ssid.is_empty() {
        "must not be empty".to_string()
    } else if ssid.len() > MAX_SSID_BYTES {
        format!(
            "{} bytes exceeds the {MAX_SSID_BYTES}-byte limit",
            ssid.len()
        )
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidSsid {
        ssid: ssid.to_string(),
        reason,
    })
}

fn validate_passphrase(passphrase: &str) -> Result<(), ConfigError> {
    if !passphrase.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
        return Err(ConfigError::InvalidPassphrase {
            reason: "must contain printable ASCII characters only".to_string(),
        });
    }

    let chars = passphrase.chars().count();
    if PASSPHRASE_CHARS.contains(&chars) {
        return Ok(());
    }

    Err(ConfigError::InvalidPassphrase {
        reason: format!(
            "must be {} to {} characters, got {chars}",
            PASSPHRASE_CHARS.start(),
            PASSPHRASE_CHARS.end()
        ),
    })
}

/// Accepts exactly four hex digits and returns them lowercased.
fn parse_hex_id(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(trimmed.to_ascii_lowercase())
    } else {
        Err(ConfigError::InvalidHexId {
            field,
            value: value.to_string(),
        })
    }
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}
