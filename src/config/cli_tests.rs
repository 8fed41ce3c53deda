//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter([
            "wifi-tester",
            "--ssid",
            "FactoryTest",
            "--passphrase",
            "secret123",
        ]);

        assert!(cli.command.is_none());
        assert_eq!(cli.ssid.as_deref(), Some("FactoryTest"));
        assert_eq!(cli.passphrase.as_deref(), Some("secret123"));
    }

    #[test]
    fn parse_identity_options() {
        let cli = Cli::parse_from_iter([
            "wifi-tester",
            "--vendor-id",
            "0BDA",
            "--product-id",
            "8179",
            "--description",
            "RTL8188EUS",
        ]);

        assert_eq!(cli.vendor_id.as_deref(), Some("0BDA"));
        assert_eq!(cli.product_id.as_deref(), Some("8179"));
        assert_eq!(cli.description.as_deref(), Some("RTL8188EUS"));
    }

    #[test]
    fn parse_timeouts_and_report() {
        let cli = Cli::parse_from_iter([
            "wifi-tester",
            "--connect-timeout",
            "45",
            "--command-timeout",
            "10",
            "--report",
            "out/results.csv",
        ]);

        assert_eq!(cli.connect_timeout, Some(45));
        assert_eq!(cli.command_timeout, Some(10));
        assert_eq!(cli.report, Some(PathBuf::from("out/results.csv")));
    }

    #[test]
    fn boolean_flags_default_to_false() {
        let cli = Cli::parse_from_iter(["wifi-tester"]);

        assert!(!cli.show_progress);
        assert!(!cli.auto_save);
        assert!(!cli.simulate);
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_boolean_flags() {
        let cli = Cli::parse_from_iter([
            "wifi-tester",
            "--show-progress",
            "--auto-save",
            "--simulate",
            "-v",
        ]);

        assert!(cli.show_progress);
        assert!(cli.auto_save);
        assert!(cli.simulate);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_short_flag() {
        let cli = Cli::parse_from_iter(["wifi-tester", "-c", "bench.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("bench.toml")));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn run_subcommand() {
        let cli = Cli::parse_from_iter(["wifi-tester", "run"]);

        assert_eq!(cli.command, Some(Command::Run));
    }

    #[test]
    fn scan_subcommand() {
        let cli = Cli::parse_from_iter(["wifi-tester", "scan"]);

        assert_eq!(cli.command, Some(Command::Scan));
    }

    #[test]
    fn test_subcommand_takes_interface() {
        let cli = Cli::parse_from_iter(["wifi-tester", "test", "wlan1"]);

        assert_eq!(
            cli.command,
            Some(Command::Test {
                interface: "wlan1".to_string()
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from_iter(["wifi-tester", "test", "wlan1", "--ssid", "Lab", "-v"]);

        assert_eq!(cli.ssid.as_deref(), Some("Lab"));
        assert!(cli.verbose);
    }

    #[test]
    fn init_default_output() {
        let cli = Cli::parse_from_iter(["wifi-tester", "init"]);

        assert_eq!(
            cli.command,
            Some(Command::Init {
                output: PathBuf::from("wifi-tester.toml")
            })
        );
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["wifi-tester", "init", "-o", "custom.toml"]);

        assert!(matches!(
            cli.command,
            Some(Command::Init { ref output }) if output == &PathBuf::from("custom.toml")
        ));
    }
}
