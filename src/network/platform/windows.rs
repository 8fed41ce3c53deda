//! Address inspection on Windows using `GetAdaptersAddresses`.

use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST,
    GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::Networking::WinSock::{AF_INET, AF_UNSPEC};

use crate::network::{AddressInspector, InterfaceHandle, UNKNOWN_MAC, format_mac};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Address facts for one adapter, keyed by its friendly name
/// (the name `netsh` and `Get-NetAdapter` use).
#[derive(Debug, Clone, PartialEq, Eq)]
struct AdapterAddresses {
    name: String,
    has_ipv4: bool,
    mac: Option<[u8; 6]>,
}

/// Windows implementation of [`AddressInspector`].
///
/// Every query re-reads the adapter table, so an adapter unplugged
/// between tests simply stops matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsInspector;

impl WindowsInspector {
    fn lookup(interface: &InterfaceHandle) -> Option<AdapterAddresses> {
        match fetch_adapters() {
            Ok(adapters) => adapters.into_iter().find(|a| a.name == interface.as_str()),
            Err(e) => {
                tracing::debug!("GetAdaptersAddresses failed: {e}");
                None
            }
        }
    }
}

impl AddressInspector for WindowsInspector {
    fn has_ipv4(&self, interface: &InterfaceHandle) -> bool {
        Self::lookup(interface).is_some_and(|a| a.has_ipv4)
    }

    fn mac_of(&self, interface: &InterfaceHandle) -> String {
        Self::lookup(interface)
            .and_then(|a| a.mac)
            .map_or_else(|| UNKNOWN_MAC.to_string(), format_mac)
    }
}

/// Reads every adapter's friendly name, IPv4 presence and hardware address.
fn fetch_adapters() -> Result<Vec<AdapterAddresses>, windows::core::Error> {
    let raw_adapters = get_adapter_addresses()?;

    let mut adapters = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list is valid as long as `raw_adapters` is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(parsed) = parse_adapter(adapter) {
            adapters.push(parsed);
        }

        current = adapter.Next;
    }

    Ok(adapters)
}

/// Calls `GetAdaptersAddresses`, retrying once with the size the API asks for.
fn get_adapter_addresses() -> Result<Vec<u8>, windows::core::Error> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: `buffer` is writable for `size` bytes.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, retrying with a larger buffer
/// on overflow.
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), windows::core::Error> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as above, with the size the API requested.
        let result = unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        };

        if result != NO_ERROR.0 {
            return Err(WIN32_ERROR(result).into());
        }
    } else if result != NO_ERROR.0 {
        return Err(WIN32_ERROR(result).into());
    }

    Ok(())
}

/// Extracts the fields we need from one adapter record.
///
/// Returns `None` if the friendly name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<AdapterAddresses> {
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };

    Some(AdapterAddresses {
        name,
        has_ipv4: has_unicast_ipv4(adapter),
        mac: physical_address(&adapter.PhysicalAddress, adapter.PhysicalAddressLength),
    })
}

/// Returns the hardware address when the adapter reports a 6-byte one.
fn physical_address(raw: &[u8; 8], len: u32) -> Option<[u8; 6]> {
    if len != 6 {
        return None;
    }
    let mut mac = [0u8; 6];
    mac.copy_from_slice(&raw[..6]);
    Some(mac)
}

fn has_unicast_ipv4(adapter: &IP_ADAPTER_ADDRESSES_LH) -> bool {
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        // SAFETY: `lpSockaddr` is null or points to a valid SOCKADDR.
        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            if sockaddr.sa_family == AF_INET {
                return true;
            }
        }

        unicast = entry.Next;
    }

    false
}
