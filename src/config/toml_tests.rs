//! Tests for TOML configuration parsing.

use std::path::PathBuf;

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [network]
            ssid = "FactoryTest"
            passphrase = "secret123"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.network.ssid.as_deref(), Some("FactoryTest"));
        assert_eq!(config.network.passphrase.as_deref(), Some("secret123"));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.network.ssid.is_none());
        assert!(config.adapter.vendor_id.is_none());
        assert!(!config.ui.show_progress);
        assert!(config.simulate.interfaces.is_none());
    }

    #[test]
    fn parse_all_sections() {
        let toml = r#"
            [network]
            ssid = "Lab"
            passphrase = "password1"

            [adapter]
            vendor_id = "0bda"
            product_id = "8179"
            description = "RTL8188EUS"

            [test]
            connect_timeout = 40
            command_timeout = 15

            [ui]
            show_progress = true
            auto_save = true
            simulate_result = true

            [report]
            path = "reports/bench.csv"

            [simulate]
            interfaces = ["wlx1", "wlx2", "wlx3"]
            delay_ms = 10
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.adapter.vendor_id.as_deref(), Some("0bda"));
        assert_eq!(config.adapter.product_id.as_deref(), Some("8179"));
        assert_eq!(config.adapter.description.as_deref(), Some("RTL8188EUS"));
        assert_eq!(config.test.connect_timeout, Some(40));
        assert_eq!(config.test.command_timeout, Some(15));
        assert!(config.ui.show_progress);
        assert!(config.ui.auto_save);
        assert!(config.ui.simulate_result);
        assert_eq!(config.report.path, Some(PathBuf::from("reports/bench.csv")));
        assert_eq!(
            config.simulate.interfaces,
            Some(vec![
                "wlx1".to_string(),
                "wlx2".to_string(),
                "wlx3".to_string()
            ])
        );
        assert_eq!(config.simulate.delay_ms, Some(10));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_rejected() {
        assert!(TomlConfig::parse("[wifi]\nchannel = 6").is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
            [network]
            ssid = "Lab"
            security = "wpa3"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_rejected() {
        let toml = r#"
            [test]
            connect_timeout = "twenty"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn negative_timeout_rejected() {
        assert!(TomlConfig::parse("[test]\ncommand_timeout = -1").is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.adapter.vendor_id.as_deref(), Some("148f"));
        assert_eq!(config.adapter.product_id.as_deref(), Some("7601"));
        assert_eq!(config.test.connect_timeout, Some(20));
        assert!(config.ui.show_progress);
    }

    #[test]
    fn default_template_leaves_credentials_unset() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.network.ssid.is_none());
        assert!(config.network.passphrase.is_none());
    }
}
