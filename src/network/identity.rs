//! Core value types: adapter identity, interface handles and credentials.

use std::fmt;

/// Hardware identity used to pick test adapters out of all host interfaces.
///
/// Linux matches on the USB vendor/product pair reported by the device
/// registry; Windows matches the free-text adapter description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterIdentity {
    /// USB vendor ID as a hex token (e.g. `148f`).
    pub vendor_id: String,
    /// USB product ID as a hex token (e.g. `7601`).
    pub product_id: String,
    /// Substring expected in the adapter's human-readable description.
    pub description: String,
}

impl AdapterIdentity {
    /// Vendor ID of the MediaTek (Ralink) MT7601U.
    pub const MT7601U_VENDOR_ID: &str = "148f";
    /// Product ID of the MediaTek (Ralink) MT7601U.
    pub const MT7601U_PRODUCT_ID: &str = "7601";
    /// Description fragment reported for the MT7601U.
    pub const MT7601U_DESCRIPTION: &str = "MT7601U";

    /// Creates a new identity.
    #[must_use]
    pub fn new(
        vendor_id: impl Into<String>,
        product_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            product_id: product_id.into(),
            description: description.into(),
        }
    }

    /// Returns true if both IDs equal this identity's pair.
    ///
    /// Hex tokens compare case-insensitively; surrounding whitespace
    /// (sysfs attributes end in a newline) is ignored.
    #[must_use]
    pub fn matches_ids(&self, vendor_id: &str, product_id: &str) -> bool {
        vendor_id.trim().eq_ignore_ascii_case(&self.vendor_id)
            && product_id.trim().eq_ignore_ascii_case(&self.product_id)
    }

    /// Returns true if `description` contains the identity substring,
    /// ignoring case.
    #[must_use]
    pub fn matches_description(&self, description: &str) -> bool {
        description
            .to_lowercase()
            .contains(&self.description.to_lowercase())
    }
}

impl Default for AdapterIdentity {
    fn default() -> Self {
        Self::new(
            Self::MT7601U_VENDOR_ID,
            Self::MT7601U_PRODUCT_ID,
            Self::MT7601U_DESCRIPTION,
        )
    }
}

impl fmt::Display for AdapterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (\"{}\")",
            self.vendor_id, self.product_id, self.description
        )
    }
}

/// OS-assigned name of a network interface (e.g. `wlan0`, `Wi-Fi 2`).
///
/// Handles are only meaningful for the discovery pass that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceHandle(String);

impl InterfaceHandle {
    /// Creates a handle from an interface name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the interface name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InterfaceHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InterfaceHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for InterfaceHandle {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// SSID and WPA2-Personal passphrase of the test network.
///
/// The passphrase never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    ssid: String,
    passphrase: String,
}

impl Credentials {
    /// Placeholder shown instead of the passphrase in logs.
    pub const REDACTED: &str = "********";

    /// Creates a new credential pair.
    #[must_use]
    pub fn new(ssid: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            passphrase: passphrase.into(),
        }
    }

    /// Returns the network SSID.
    #[must_use]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Returns the passphrase.
    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("passphrase", &Self::REDACTED)
            .finish()
    }
}
