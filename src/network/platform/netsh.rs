//! Windows connect sequence using `netsh wlan` and stored WLAN profiles.

use std::io::Write;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use quick_xml::escape::escape;
use regex::Regex;
use tempfile::TempPath;

use crate::network::{
    CommandError, CommandLine, CommandOutput, CommandRunner, ConnectError, ConnectStep,
    Credentials, InterfaceHandle, NetworkConnector, SystemRunner,
};

/// Matches profile entries in `netsh wlan show profiles` output, e.g.
/// `    All User Profile     : TestLab`. Section headers are not indented
/// and never match.
static PROFILE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]+[^:\r\n]*profil[^:\r\n]*:[ \t]*([^\r\n]+?)[ \t]*\r?$")
        .unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Connects an interface through a stored WLAN profile named after the SSID.
///
/// The profile is installed only when `netsh wlan show profiles` does not
/// already list it, so repeated calls never create duplicates. The profile
/// XML carries the passphrase in cleartext and lives in a transient file
/// that is deleted before the association step, whether or not
/// installation succeeded.
#[derive(Debug, Clone)]
pub struct NetshConnector<R = SystemRunner> {
    runner: R,
    command_timeout: Duration,
    profile_dir: Option<PathBuf>,
}

impl<R: CommandRunner> NetshConnector<R> {
    /// Creates a connector; `command_timeout` bounds the profile steps.
    #[must_use]
    pub const fn new(runner: R, command_timeout: Duration) -> Self {
        Self {
            runner,
            command_timeout,
            profile_dir: None,
        }
    }

    /// Writes transient profile files to `dir` instead of the system
    /// temporary directory.
    #[must_use]
    pub fn with_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_dir = Some(dir.into());
        self
    }

    async fn run(
        &self,
        step: ConnectStep,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        tracing::debug!("[{step}] {command}");
        self.runner.run(command, timeout).await
    }

    /// Returns true if a profile named `ssid` is stored for `interface`.
    ///
    /// `netsh` exits non-zero when the interface has no profiles at all;
    /// that is treated as "not stored". Timeouts and launch failures are
    /// errors.
    async fn profile_exists(
        &self,
        interface: &InterfaceHandle,
        ssid: &str,
    ) -> Result<bool, ConnectError> {
        let command = netsh().args([
            "wlan".to_string(),
            "show".to_string(),
            "profiles".to_string(),
            format!("interface={interface}"),
        ]);

        match self
            .run(ConnectStep::ProfileQuery, &command, self.command_timeout)
            .await
        {
            Ok(output) => Ok(profile_names(&output.stdout).any(|name| name == ssid)),
            Err(e @ CommandError::Failed { .. }) => {
                tracing::debug!("No stored profiles on {interface}: {e}");
                Ok(false)
            }
            Err(e) => Err(ConnectError::at_step(ConnectStep::ProfileQuery, e)),
        }
    }

    /// Writes the profile XML to a transient file.
    fn write_profile(&self, credentials: &Credentials) -> Result<TempPath, ConnectError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("wifi-tester-").suffix(".xml");
        let mut file = match &self.profile_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ConnectError::ProfileArtifact)?;

        file.write_all(profile_xml(credentials).as_bytes())
            .and_then(|()| file.flush())
            .map_err(ConnectError::ProfileArtifact)?;

        // Release our handle so netsh can open the file; the path still
        // deletes itself on drop.
        Ok(file.into_temp_path())
    }

    async fn install_profile(
        &self,
        interface: &InterfaceHandle,
        credentials: &Credentials,
    ) -> Result<(), ConnectError> {
        let profile = self.write_profile(credentials)?;

        let command = netsh().args([
            "wlan".to_string(),
            "add".to_string(),
            "profile".to_string(),
            format!("filename={}", profile.display()),
            format!("interface={interface}"),
            "user=current".to_string(),
        ]);
        let installed = self
            .run(ConnectStep::ProfileInstall, &command, self.command_timeout)
            .await;

        if let Err(e) = profile.close() {
            tracing::warn!("Failed to delete transient profile: {e}");
        }

        installed
            .map(|_| ())
            .map_err(|e| ConnectError::at_step(ConnectStep::ProfileInstall, e))
    }
}

fn netsh() -> CommandLine {
    CommandLine::new("netsh")
}

impl<R: CommandRunner> NetworkConnector for NetshConnector<R> {
    async fn try_connect(
        &self,
        interface: &InterfaceHandle,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<(), ConnectError> {
        let ssid = credentials.ssid();

        if self.profile_exists(interface, ssid).await? {
            tracing::debug!("Profile '{ssid}' already stored on {interface}");
        } else {
            tracing::info!("Installing profile '{ssid}' on {interface}");
            self.install_profile(interface, credentials).await?;
        }

        let command = netsh().args([
            "wlan".to_string(),
            "connect".to_string(),
            format!("ssid={ssid}"),
            format!("name={ssid}"),
            format!("interface={interface}"),
        ]);
        self.run(ConnectStep::Associate, &command, timeout)
            .await
            .map(|_| ())
            .map_err(|e| ConnectError::at_step(ConnectStep::Associate, e))
    }
}

/// Extracts profile names from `netsh wlan show profiles` output.
fn profile_names(output: &str) -> impl Iterator<Item = &str> {
    PROFILE_LINE
        .captures_iter(output)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Renders a WPA2-Personal (AES) profile for `credentials`.
fn profile_xml(credentials: &Credentials) -> String {
    let ssid = escape(credentials.ssid());
    let key = escape(credentials.passphrase());
    format!(
        r#"<?xml version="1.0"?>
<WLANProfile xmlns="http://www.microsoft.com/networking/WLAN/profile/v1">
    <name>{ssid}</name>
    <SSIDConfig>
        <SSID>
            <name>{ssid}</name>
        </SSID>
    </SSIDConfig>
    <connectionType>ESS</connectionType>
    <connectionMode>manual</connectionMode>
    <MSM>
        <security>
            <authEncryption>
                <authentication>WPA2PSK</authentication>
                <encryption>AES</encryption>
                <useOneX>false</useOneX>
            </authEncryption>
            <sharedKey>
                <keyType>passPhrase</keyType>
                <protected>false</protected>
                <keyMaterial>{key}</keyMaterial>
            </sharedKey>
        </security>
    </MSM>
</WLANProfile>
"#
    )
}
