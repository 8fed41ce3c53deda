//! Linux connect sequence using NetworkManager's `nmcli`.

use std::time::Duration;

use crate::network::{
    CommandLine, CommandRunner, ConnectError, ConnectStep, Credentials, InterfaceHandle,
    NetworkConnector, SystemRunner,
};

/// Connects an interface with `nmcli device wifi connect`.
///
/// Every call runs the full sequence: radio on, rescan, connect. The
/// sequence restates the whole target state, so repeating it is safe.
///
/// # Side effects
///
/// `nmcli radio wifi on` switches the Wi-Fi radio on for the whole host,
/// not just the interface under test.
#[derive(Debug, Clone)]
pub struct NmcliConnector<R = SystemRunner> {
    runner: R,
    command_timeout: Duration,
}

impl<R: CommandRunner> NmcliConnector<R> {
    /// Creates a connector; `command_timeout` bounds the radio and rescan
    /// steps.
    #[must_use]
    pub const fn new(runner: R, command_timeout: Duration) -> Self {
        Self {
            runner,
            command_timeout,
        }
    }

    async fn step(
        &self,
        step: ConnectStep,
        command: CommandLine,
        timeout: Duration,
        secret: &str,
    ) -> Result<(), ConnectError> {
        tracing::debug!("[{step}] {}", command.redacted(secret));
        self.runner
            .run(&command, timeout)
            .await
            .map(|_| ())
            .map_err(|e| ConnectError::at_step(step, e))
    }
}

fn nmcli() -> CommandLine {
    CommandLine::new("nmcli")
}

impl<R: CommandRunner> NetworkConnector for NmcliConnector<R> {
    async fn try_connect(
        &self,
        interface: &InterfaceHandle,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<(), ConnectError> {
        let secret = credentials.passphrase();

        self.step(
            ConnectStep::RadioOn,
            nmcli().args(["radio", "wifi", "on"]),
            self.command_timeout,
            secret,
        )
        .await?;

        self.step(
            ConnectStep::Rescan,
            nmcli().args(["device", "wifi", "rescan"]),
            self.command_timeout,
            secret,
        )
        .await?;

        self.step(
            ConnectStep::Associate,
            nmcli().args([
                "device",
                "wifi",
                "connect",
                credentials.ssid(),
                "password",
                secret,
                "ifname",
                interface.as_str(),
            ]),
            timeout,
            secret,
        )
        .await
    }
}
