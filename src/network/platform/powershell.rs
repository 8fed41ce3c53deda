//! Windows adapter discovery through a PowerShell `Get-NetAdapter` listing.

use std::time::Duration;

use serde::Deserialize;

use crate::network::{
    AdapterDiscovery, AdapterIdentity, CommandLine, CommandRunner, DiscoveryError,
    InterfaceHandle, SystemRunner,
};

/// Lists visible Wi-Fi adapters (`NdisPhysicalMedium` 9 is Native 802.11)
/// as compact JSON.
const LIST_WIFI_ADAPTERS: &str = "Get-NetAdapter \
    | Where-Object { $_.NdisPhysicalMedium -eq 9 -and -not $_.Hidden } \
    | Select-Object Name, InterfaceDescription \
    | ConvertTo-Json -Compress";

/// One adapter record from `Get-NetAdapter`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NetAdapterRecord {
    name: String,
    #[serde(default)]
    interface_description: Option<String>,
}

/// `ConvertTo-Json` emits a bare object instead of a one-element array
/// when the pipeline yields a single record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<NetAdapterRecord>),
    One(NetAdapterRecord),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<NetAdapterRecord> {
        match self {
            Self::Many(records) => records,
            Self::One(record) => vec![record],
        }
    }
}

/// Discovers adapters whose description contains the identity substring.
///
/// The listing is filtered to Wi-Fi class, non-hidden adapters by
/// PowerShell; the description match happens here.
#[derive(Debug, Clone)]
pub struct PowerShellDiscovery<R = SystemRunner> {
    runner: R,
    timeout: Duration,
}

impl<R: CommandRunner> PowerShellDiscovery<R> {
    /// Creates a discovery using `runner`, bounding the listing by `timeout`.
    #[must_use]
    pub const fn new(runner: R, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    /// Returns the listing command line.
    #[must_use]
    pub fn command() -> CommandLine {
        CommandLine::new("powershell").args([
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            LIST_WIFI_ADAPTERS,
        ])
    }
}

impl<R: CommandRunner> AdapterDiscovery for PowerShellDiscovery<R> {
    async fn discover(
        &self,
        identity: &AdapterIdentity,
    ) -> Result<Vec<InterfaceHandle>, DiscoveryError> {
        let command = Self::command();
        tracing::debug!("Running {}", command.program);
        let output = self.runner.run(&command, self.timeout).await?;

        let records = parse_adapter_listing(&output.stdout)?;
        Ok(records
            .into_iter()
            .filter(|r| {
                r.interface_description
                    .as_deref()
                    .is_some_and(|d| identity.matches_description(d))
            })
            .map(|r| InterfaceHandle::new(r.name))
            .collect())
    }
}

/// Parses `ConvertTo-Json` output into a list of records.
///
/// Empty output means no adapters.
fn parse_adapter_listing(stdout: &str) -> Result<Vec<NetAdapterRecord>, DiscoveryError> {
    let json = stdout.trim_start_matches('\u{feff}').trim();
    if json.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<OneOrMany>(json)
        .map(OneOrMany::into_vec)
        .map_err(|e| DiscoveryError::Malformed {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::CommandOutput;
    use crate::network::command::mock::{ScriptedRunner, timed_out};

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn discovery_returning(stdout: &str) -> PowerShellDiscovery<ScriptedRunner> {
        PowerShellDiscovery::new(
            ScriptedRunner::new(vec![Ok(CommandOutput::stdout(stdout))]),
            TIMEOUT,
        )
    }

    async fn discover(discovery: &PowerShellDiscovery<ScriptedRunner>) -> Vec<String> {
        discovery
            .discover(&AdapterIdentity::default())
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.to_string())
            .collect()
    }

    mod parsing {
        use super::*;

        #[test]
        fn array_of_records() {
            let records = parse_adapter_listing(
                r#"[{"Name":"Wi-Fi","InterfaceDescription":"Intel(R) Wi-Fi 6 AX201"},
                    {"Name":"Wi-Fi 2","InterfaceDescription":"Ralink MT7601U USB Wireless"}]"#,
            )
            .unwrap();

            assert_eq!(records.len(), 2);
            assert_eq!(records[1].name, "Wi-Fi 2");
        }

        #[test]
        fn bare_record_is_normalized_to_list() {
            let records = parse_adapter_listing(
                r#"{"Name":"Wi-Fi 2","InterfaceDescription":"Ralink MT7601U USB Wireless"}"#,
            )
            .unwrap();

            assert_eq!(records.len(), 1);
            assert_eq!(records[0].name, "Wi-Fi 2");
        }

        #[test]
        fn empty_output_is_no_adapters() {
            assert!(parse_adapter_listing("").unwrap().is_empty());
            assert!(parse_adapter_listing("  \r\n").unwrap().is_empty());
        }

        #[test]
        fn byte_order_mark_is_ignored() {
            let records =
                parse_adapter_listing("\u{feff}{\"Name\":\"Wi-Fi\",\"InterfaceDescription\":\"x\"}")
                    .unwrap();
            assert_eq!(records.len(), 1);
        }

        #[test]
        fn missing_description_is_tolerated() {
            let records = parse_adapter_listing(r#"[{"Name":"Wi-Fi"}]"#).unwrap();
            assert_eq!(records[0].interface_description, None);
        }

        #[test]
        fn malformed_json_is_error() {
            let result = parse_adapter_listing("Get-NetAdapter : Access is denied.");
            assert!(matches!(result, Err(DiscoveryError::Malformed { .. })));
        }
    }

    #[tokio::test]
    async fn keeps_only_matching_descriptions_in_listing_order() {
        let discovery = discovery_returning(
            r#"[{"Name":"Wi-Fi 3","InterfaceDescription":"MediaTek MT7601U #2"},
                {"Name":"Wi-Fi","InterfaceDescription":"Intel(R) Wi-Fi 6 AX201 160MHz"},
                {"Name":"Wi-Fi 2","InterfaceDescription":"ralink mt7601u usb wireless"}]"#,
        );

        assert_eq!(discover(&discovery).await, vec!["Wi-Fi 3", "Wi-Fi 2"]);
    }

    #[tokio::test]
    async fn no_wifi_adapters_is_empty() {
        let discovery = discovery_returning("");
        assert!(discover(&discovery).await.is_empty());
    }

    #[tokio::test]
    async fn runs_listing_command_with_timeout() {
        let discovery = discovery_returning("");
        discover(&discovery).await;

        let argv = discovery.runner.argv();
        assert_eq!(argv.len(), 1);
        assert_eq!(
            &argv[0][..4],
            &["powershell", "-NoProfile", "-NonInteractive", "-Command"]
        );
        assert!(argv[0][4].contains("Get-NetAdapter"));
        assert!(argv[0][4].contains("ConvertTo-Json"));
        assert_eq!(discovery.runner.timeouts(), vec![TIMEOUT]);
    }

    #[tokio::test]
    async fn command_failure_is_error_not_empty() {
        let discovery = PowerShellDiscovery::new(
            ScriptedRunner::new(vec![Err(timed_out("powershell", TIMEOUT))]),
            TIMEOUT,
        );

        let result = discovery.discover(&AdapterIdentity::default()).await;

        assert!(matches!(result, Err(DiscoveryError::Command(_))));
    }
}
