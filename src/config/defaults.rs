//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::network::AdapterIdentity;
use crate::network::platform::DEFAULT_SIMULATED_INTERFACES;

/// Default USB vendor ID (MediaTek/Ralink).
pub const VENDOR_ID: &str = AdapterIdentity::MT7601U_VENDOR_ID;

/// Default USB product ID (MT7601U).
pub const PRODUCT_ID: &str = AdapterIdentity::MT7601U_PRODUCT_ID;

/// Default adapter description substring.
pub const DESCRIPTION: &str = AdapterIdentity::MT7601U_DESCRIPTION;

/// Default upper bound for the association step, in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 20;

/// Default upper bound for every other external command, in seconds.
pub const COMMAND_TIMEOUT_SECS: u64 = 30;

/// Default report file.
pub const REPORT_PATH: &str = crate::report::DEFAULT_REPORT_FILE;

/// Default delay before each simulated verdict, in milliseconds.
pub const SIMULATE_DELAY_MS: u64 = 2000;

/// Directory under the user config dir holding the default config file.
pub const CONFIG_DIR_NAME: &str = "wifi-tester";

/// File name of the default config file.
pub const CONFIG_FILE_NAME: &str = "settings.toml";

/// Default connect timeout as Duration.
#[must_use]
pub const fn connect_timeout() -> Duration {
    Duration::from_secs(CONNECT_TIMEOUT_SECS)
}

/// Default command timeout as Duration.
#[must_use]
pub const fn command_timeout() -> Duration {
    Duration::from_secs(COMMAND_TIMEOUT_SECS)
}

/// Default simulated delay as Duration.
#[must_use]
pub const fn simulate_delay() -> Duration {
    Duration::from_millis(SIMULATE_DELAY_MS)
}

/// Default simulated interface names.
#[must_use]
pub fn simulate_interfaces() -> Vec<String> {
    DEFAULT_SIMULATED_INTERFACES
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}
