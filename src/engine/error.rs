//! Error types for the engine layer.

use thiserror::Error;

use super::TestOutcome;
use crate::network::{DiscoveryError, InterfaceHandle};

/// Error type for engine operations.
///
/// Adapter-level failures are outcomes, not errors; these variants cover
/// only a failed discovery pass and misuse of single-adapter mode.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The discovery pass could not query the host.
    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// The named interface is not part of the current generation.
    #[error("Interface '{interface}' was not found by the last discovery")]
    UnknownInterface {
        /// Interface that was requested
        interface: InterfaceHandle,
    },

    /// The named interface already has a terminal outcome.
    #[error("Interface '{interface}' was already tested ({outcome})")]
    AlreadyTested {
        /// Interface that was requested
        interface: InterfaceHandle,
        /// Its existing outcome
        outcome: TestOutcome,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn discovery_error_preserves_source() {
        let error: EngineError = DiscoveryError::Malformed {
            reason: "bad json".to_string(),
        }
        .into();

        assert!(error.to_string().contains("Discovery failed"));
        assert!(error.source().unwrap().to_string().contains("bad json"));
    }

    #[test]
    fn unknown_interface_names_interface() {
        let error = EngineError::UnknownInterface {
            interface: "wlan7".into(),
        };
        assert_eq!(
            error.to_string(),
            "Interface 'wlan7' was not found by the last discovery"
        );
    }

    #[test]
    fn already_tested_shows_outcome() {
        let error = EngineError::AlreadyTested {
            interface: "wlan0".into(),
            outcome: TestOutcome::Pass,
        };
        assert!(error.to_string().contains("(PASS)"));
    }
}
