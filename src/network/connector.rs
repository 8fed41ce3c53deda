//! Network association trait and error types.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::{CommandError, Credentials, InterfaceHandle};

/// Individual steps of a connect sequence, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStep {
    /// `nmcli radio wifi on`
    RadioOn,
    /// `nmcli device wifi rescan`
    Rescan,
    /// `netsh wlan show profiles`
    ProfileQuery,
    /// Writing the transient profile file
    ProfileWrite,
    /// `netsh wlan add profile`
    ProfileInstall,
    /// Final association command
    Associate,
}

impl fmt::Display for ConnectStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RadioOn => "radio enable",
            Self::Rescan => "rescan",
            Self::ProfileQuery => "profile query",
            Self::ProfileWrite => "profile write",
            Self::ProfileInstall => "profile install",
            Self::Associate => "associate",
        };
        f.write_str(name)
    }
}

/// Coarse failure category reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectFailureKind {
    /// Radio, rescan or profile provisioning failed.
    Registration,
    /// The association command itself failed.
    Association,
    /// A step exceeded its time limit.
    TimedOut,
}

impl fmt::Display for ConnectFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration => write!(f, "registration"),
            Self::Association => write!(f, "association"),
            Self::TimedOut => write!(f, "timeout"),
        }
    }
}

/// Error type for connect operations.
///
/// Only used for logging; the public contract of
/// [`NetworkConnector::connect`] is a boolean.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// A preparatory step (radio, rescan, profile provisioning) failed.
    #[error("{step} step failed: {source}")]
    Registration {
        /// Step that failed
        step: ConnectStep,
        /// Underlying command error
        #[source]
        source: CommandError,
    },

    /// The transient profile file could not be written.
    #[error("Failed to write transient WLAN profile: {0}")]
    ProfileArtifact(#[source] std::io::Error),

    /// The association command failed.
    #[error("Association failed: {0}")]
    Association(#[source] CommandError),

    /// A step did not finish in time.
    #[error("{step} step timed out after {}s", timeout.as_secs())]
    TimedOut {
        /// Step that timed out
        step: ConnectStep,
        /// Time limit that was exceeded
        timeout: Duration,
    },
}

impl ConnectError {
    /// Classifies a command failure at `step`.
    #[must_use]
    pub fn at_step(step: ConnectStep, error: CommandError) -> Self {
        match error {
            CommandError::TimedOut { timeout, .. } => Self::TimedOut { step, timeout },
            other if step == ConnectStep::Associate => Self::Association(other),
            other => Self::Registration {
                step,
                source: other,
            },
        }
    }

    /// Returns the coarse failure category.
    #[must_use]
    pub const fn kind(&self) -> ConnectFailureKind {
        match self {
            Self::Registration { .. } | Self::ProfileArtifact(_) => {
                ConnectFailureKind::Registration
            }
            Self::Association(_) => ConnectFailureKind::Association,
            Self::TimedOut { .. } => ConnectFailureKind::TimedOut,
        }
    }
}

/// Trait for associating an interface with the test network.
///
/// Implementations must be idempotent: repeating a call with the same
/// arguments must not fail because state from the first call exists.
pub trait NetworkConnector: Send + Sync {
    /// Runs the platform connect sequence.
    ///
    /// `timeout` bounds the final association step.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] naming the step that failed.
    fn try_connect(
        &self,
        interface: &InterfaceHandle,
        credentials: &Credentials,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<(), ConnectError>> + Send;

    /// Runs the connect sequence and collapses the outcome to a boolean.
    ///
    /// `true` means the association commands completed; it does not imply
    /// an address was assigned.
    fn connect(
        &self,
        interface: &InterfaceHandle,
        credentials: &Credentials,
        timeout: Duration,
    ) -> impl std::future::Future<Output = bool> + Send {
        async move {
            match self.try_connect(interface, credentials, timeout).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Connect on {interface} failed: {e}");
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(program: &str) -> CommandError {
        CommandError::Failed {
            program: program.to_string(),
            code: Some(1),
            stderr: String::new(),
        }
    }

    #[test]
    fn timeout_at_any_step_is_timed_out() {
        let error = ConnectError::at_step(
            ConnectStep::Rescan,
            CommandError::TimedOut {
                program: "nmcli".to_string(),
                timeout: Duration::from_secs(30),
            },
        );

        assert!(matches!(
            error,
            ConnectError::TimedOut {
                step: ConnectStep::Rescan,
                ..
            }
        ));
        assert_eq!(error.kind(), ConnectFailureKind::TimedOut);
    }

    #[test]
    fn failure_at_associate_is_association() {
        let error = ConnectError::at_step(ConnectStep::Associate, failed("netsh"));
        assert_eq!(error.kind(), ConnectFailureKind::Association);
    }

    #[test]
    fn failure_at_preparatory_step_is_registration() {
        for step in [
            ConnectStep::RadioOn,
            ConnectStep::Rescan,
            ConnectStep::ProfileQuery,
            ConnectStep::ProfileInstall,
        ] {
            let error = ConnectError::at_step(step, failed("x"));
            assert_eq!(error.kind(), ConnectFailureKind::Registration, "{step}");
        }
    }

    #[test]
    fn profile_artifact_is_registration() {
        let error = ConnectError::ProfileArtifact(std::io::Error::other("disk full"));
        assert_eq!(error.kind(), ConnectFailureKind::Registration);
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn timed_out_display_names_step() {
        let error = ConnectError::TimedOut {
            step: ConnectStep::Associate,
            timeout: Duration::from_secs(20),
        };
        assert_eq!(error.to_string(), "associate step timed out after 20s");
    }

    struct FixedConnector(bool);

    impl NetworkConnector for FixedConnector {
        async fn try_connect(
            &self,
            _interface: &InterfaceHandle,
            _credentials: &Credentials,
            _timeout: Duration,
        ) -> Result<(), ConnectError> {
            if self.0 {
                Ok(())
            } else {
                Err(ConnectError::Association(failed("nmcli")))
            }
        }
    }

    #[tokio::test]
    async fn connect_collapses_result_to_bool() {
        let iface = InterfaceHandle::from("wlan0");
        let creds = Credentials::new("Lab", "password123");
        let timeout = Duration::from_secs(1);

        assert!(FixedConnector(true).connect(&iface, &creds, timeout).await);
        assert!(!FixedConnector(false).connect(&iface, &creds, timeout).await);
    }
}
