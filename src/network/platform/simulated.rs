//! Stand-in discovery for runs without adapter hardware.

use crate::network::{AdapterDiscovery, AdapterIdentity, DiscoveryError, InterfaceHandle};

/// Default interfaces reported in simulation mode.
pub const DEFAULT_SIMULATED_INTERFACES: [&str; 2] = ["wlan0", "wlan1"];

/// Reports a fixed interface list regardless of identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedDiscovery {
    interfaces: Vec<InterfaceHandle>,
}

impl SimulatedDiscovery {
    /// Creates a discovery reporting `interfaces` in order.
    #[must_use]
    pub fn new<I, S>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InterfaceHandle>,
    {
        Self {
            interfaces: interfaces.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for SimulatedDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_INTERFACES)
    }
}

impl AdapterDiscovery for SimulatedDiscovery {
    async fn discover(
        &self,
        identity: &AdapterIdentity,
    ) -> Result<Vec<InterfaceHandle>, DiscoveryError> {
        tracing::debug!("Simulating discovery of {identity}");
        Ok(self.interfaces.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_reports_two_interfaces() {
        let found = SimulatedDiscovery::default()
            .discover(&AdapterIdentity::default())
            .await
            .unwrap();

        assert_eq!(
            found,
            vec![InterfaceHandle::from("wlan0"), InterfaceHandle::from("wlan1")]
        );
    }

    #[tokio::test]
    async fn identity_is_ignored() {
        let identity = AdapterIdentity::new("0bda", "8179", "RTL8188");
        let found = SimulatedDiscovery::new(["sim0"])
            .discover(&identity)
            .await
            .unwrap();

        assert_eq!(found, vec![InterfaceHandle::from("sim0")]);
    }
}
