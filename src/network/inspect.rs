//! Address inspection: IPv4 verification and MAC resolution.

use rand::Rng;

use super::InterfaceHandle;

/// Sentinel returned when an interface has no link-layer address.
pub const UNKNOWN_MAC: &str = "Unknown";

/// Trait for querying an interface's current address assignments.
///
/// Both queries are best-effort: a missing interface (e.g. unplugged
/// mid-test) or a failed host query is reported as "no address", never
/// as an error.
pub trait AddressInspector: Send + Sync {
    /// Returns true iff at least one IPv4 address is assigned to `interface`.
    fn has_ipv4(&self, interface: &InterfaceHandle) -> bool;

    /// Returns the interface's hardware address, or [`UNKNOWN_MAC`].
    fn mac_of(&self, interface: &InterfaceHandle) -> String;
}

/// Formats six octets as lowercase `aa:bb:cc:dd:ee:ff`.
#[must_use]
pub fn format_mac(octets: [u8; 6]) -> String {
    octets
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Generates a MAC address for simulated runs.
///
/// The first octet is `0x02` (locally administered, unicast) and the next
/// two are zero, so simulated addresses never look like vendor-assigned
/// ones: `02:00:00:XX:XX:XX`.
#[must_use]
pub fn random_mac() -> String {
    let mut rng = rand::thread_rng();
    format_mac([0x02, 0x00, 0x00, rng.r#gen(), rng.r#gen(), rng.r#gen()])
}
