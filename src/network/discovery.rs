//! Adapter discovery trait and error types.

use std::path::PathBuf;

use thiserror::Error;

use super::{AdapterIdentity, CommandError, InterfaceHandle};

/// Error type for discovery operations.
///
/// A discovery error means the host query itself failed. It is never used
/// for "no matching hardware", which is an empty result.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The host adapter-listing command failed or timed out.
    #[error("Adapter listing command failed: {0}")]
    Command(#[from] CommandError),

    /// The device registry could not be read.
    #[error("Failed to read device registry '{}': {source}", path.display())]
    Registry {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The adapter listing could not be parsed.
    #[error("Malformed adapter listing: {reason}")]
    Malformed {
        /// Description of the parse failure
        reason: String,
    },
}

/// Trait for finding test adapters attached to the host.
///
/// # Implementation Notes
///
/// - Return interfaces in the order the host yields them
/// - Never cache results; every call is a fresh query
/// - An empty `Vec` means "scan succeeded, nothing attached"
pub trait AdapterDiscovery: Send + Sync {
    /// Lists interfaces whose hardware matches `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when the host facility cannot be queried.
    fn discover(
        &self,
        identity: &AdapterIdentity,
    ) -> impl std::future::Future<Output = Result<Vec<InterfaceHandle>, DiscoveryError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_displays_path() {
        let error = DiscoveryError::Registry {
            path: PathBuf::from("/sys/class/net"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert!(error.to_string().contains("/sys/class/net"));
    }

    #[test]
    fn command_error_converts() {
        let error: DiscoveryError = CommandError::TimedOut {
            program: "powershell".to_string(),
            timeout: std::time::Duration::from_secs(30),
        }
        .into();

        assert!(matches!(error, DiscoveryError::Command(_)));
        assert!(error.to_string().contains("timed out"));
    }
}
