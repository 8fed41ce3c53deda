//! Address inspection on Unix through `getifaddrs(3)`.

use nix::ifaddrs::{InterfaceAddress, getifaddrs};

use crate::network::{AddressInspector, InterfaceHandle, UNKNOWN_MAC, format_mac};

/// Reads interface addresses from the kernel on every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfAddrsInspector;

impl IfAddrsInspector {
    /// Returns every address entry belonging to `interface`.
    ///
    /// A failed `getifaddrs` call yields no entries.
    fn entries(interface: &InterfaceHandle) -> Vec<InterfaceAddress> {
        match getifaddrs() {
            Ok(addrs) => addrs
                .filter(|a| a.interface_name == interface.as_str())
                .collect(),
            Err(e) => {
                tracing::debug!("getifaddrs failed: {e}");
                Vec::new()
            }
        }
    }
}

impl AddressInspector for IfAddrsInspector {
    fn has_ipv4(&self, interface: &InterfaceHandle) -> bool {
        Self::entries(interface).iter().any(|entry| {
            entry
                .address
                .as_ref()
                .and_then(|addr| addr.as_sockaddr_in())
                .is_some()
        })
    }

    fn mac_of(&self, interface: &InterfaceHandle) -> String {
        Self::entries(interface)
            .iter()
            .find_map(|entry| entry.address.as_ref()?.as_link_addr()?.addr())
            .map_or_else(|| UNKNOWN_MAC.to_string(), format_mac)
    }
}
