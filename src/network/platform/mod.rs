//! Platform-specific discovery, connect and inspection implementations.
//!
//! Shared code names the `Platform*` aliases; `cfg` picks the concrete type
//! once, here.
//!
//! # Platform Support
//!
//! - **Linux**: sysfs device registry, `nmcli`, `getifaddrs`.
//! - **Windows**: PowerShell `Get-NetAdapter`, `netsh wlan`, `GetAdaptersAddresses`.
//!
//! The command-driven implementations compile everywhere so their command
//! sequences can be tested on any host.

mod netsh;
mod nmcli;
mod powershell;
mod simulated;
mod sysfs;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use netsh::NetshConnector;
pub use nmcli::NmcliConnector;
pub use powershell::PowerShellDiscovery;
pub use simulated::{DEFAULT_SIMULATED_INTERFACES, SimulatedDiscovery};
pub use sysfs::SysfsDiscovery;

#[cfg(unix)]
pub use unix::IfAddrsInspector;
#[cfg(windows)]
pub use windows::WindowsInspector;

#[cfg(not(windows))]
pub use nmcli::NmcliConnector as PlatformConnector;
#[cfg(not(windows))]
pub use sysfs::SysfsDiscovery as PlatformDiscovery;
#[cfg(unix)]
pub use unix::IfAddrsInspector as PlatformInspector;

#[cfg(windows)]
pub use netsh::NetshConnector as PlatformConnector;
#[cfg(windows)]
pub use powershell::PowerShellDiscovery as PlatformDiscovery;
#[cfg(windows)]
pub use windows::WindowsInspector as PlatformInspector;

use std::time::Duration;

use super::SystemRunner;

/// Creates the host's discovery implementation.
#[cfg(not(windows))]
#[must_use]
pub fn platform_discovery(_command_timeout: Duration) -> PlatformDiscovery {
    PlatformDiscovery::new()
}

/// Creates the host's discovery implementation.
#[cfg(windows)]
#[must_use]
pub const fn platform_discovery(command_timeout: Duration) -> PlatformDiscovery {
    PlatformDiscovery::new(SystemRunner, command_timeout)
}

/// Creates the host's connector; `command_timeout` bounds the preparatory
/// steps of each connect.
#[must_use]
pub const fn platform_connector(command_timeout: Duration) -> PlatformConnector {
    PlatformConnector::new(SystemRunner, command_timeout)
}
