//! Linux adapter discovery through the sysfs device registry.

use std::fs;
use std::path::{Path, PathBuf};

use crate::network::{AdapterDiscovery, AdapterIdentity, DiscoveryError, InterfaceHandle};

/// Default sysfs mount point.
const SYSFS_ROOT: &str = "/sys";

/// Discovers adapters by reading `class/net` and the USB attributes of each
/// interface's parent device.
///
/// For every entry under `<root>/class/net`, the `device` link is resolved
/// and its ancestors are searched for the USB device directory carrying
/// `idVendor` and `idProduct`. These are the attributes udev exposes as
/// `ID_VENDOR_ID` and `ID_MODEL_ID`.
///
/// # Example
///
/// ```no_run
/// use wifi_tester::network::{AdapterDiscovery, AdapterIdentity};
/// use wifi_tester::network::platform::SysfsDiscovery;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let found = SysfsDiscovery::new().discover(&AdapterIdentity::default()).await?;
/// println!("{found:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SysfsDiscovery {
    root: PathBuf,
}

impl SysfsDiscovery {
    /// Creates a discovery reading the live `/sys` tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(SYSFS_ROOT)
    }

    /// Creates a discovery reading a sysfs tree mounted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the sysfs root this discovery reads.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan(&self, identity: &AdapterIdentity) -> Result<Vec<InterfaceHandle>, DiscoveryError> {
        let class_dir = self.root.join("class").join("net");
        let entries = fs::read_dir(&class_dir).map_err(|source| DiscoveryError::Registry {
            path: class_dir.clone(),
            source,
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DiscoveryError::Registry {
                path: class_dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();

            match usb_ids(&entry.path()) {
                Some((vendor, product)) if identity.matches_ids(&vendor, &product) => {
                    tracing::debug!("{name}: {vendor}:{product} matches");
                    found.push(InterfaceHandle::new(name));
                }
                Some((vendor, product)) => {
                    tracing::trace!("{name}: {vendor}:{product} does not match");
                }
                None => tracing::trace!("{name}: not a USB device"),
            }
        }

        Ok(found)
    }
}

impl Default for SysfsDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterDiscovery for SysfsDiscovery {
    async fn discover(
        &self,
        identity: &AdapterIdentity,
    ) -> Result<Vec<InterfaceHandle>, DiscoveryError> {
        self.scan(identity)
    }
}

/// Returns the `(idVendor, idProduct)` of the USB device backing the
/// interface at `interface_dir`, or `None` for non-USB interfaces.
fn usb_ids(interface_dir: &Path) -> Option<(String, String)> {
    let device = fs::canonicalize(interface_dir.join("device")).ok()?;

    device.ancestors().find_map(|dir| {
        let vendor = fs::read_to_string(dir.join("idVendor")).ok()?;
        let product = fs::read_to_string(dir.join("idProduct")).ok()?;
        Some((vendor.trim().to_string(), product.trim().to_string()))
    })
}
