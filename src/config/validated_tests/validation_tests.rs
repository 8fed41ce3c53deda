//! Tests for value validation.

use std::time::Duration;

use super::*;

mod ssid {
    use super::*;

    #[test]
    fn empty_ssid_rejected() {
        let cli = cli(&["--ssid", "", "--passphrase", "secret123"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidSsid { .. })
        ));
    }

    #[test]
    fn thirty_two_byte_ssid_accepted() {
        let ssid = "s".repeat(32);
        let cli = cli(&["--ssid", ssid.as_str(), "--passphrase", "secret123"]);

        assert!(ValidatedConfig::from_raw(&cli, None).is_ok());
    }

    #[test]
    fn thirty_three_byte_ssid_rejected() {
        let ssid = "s".repeat(33);
        let cli = cli(&["--ssid", ssid.as_str(), "--passphrase", "secret123"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidSsid { .. })
        ));
    }

    #[test]
    fn limit_counts_bytes_not_characters() {
        // 11 three-byte characters
        let ssid = "\u{6d4b}".repeat(11);
        let cli = cli(&["--ssid", ssid.as_str(), "--passphrase", "secret123"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidSsid { .. })
        ));
    }
}

mod passphrase {
    use super::*;

    fn with_passphrase(passphrase: &str) -> Result<ValidatedConfig, ConfigError> {
        ValidatedConfig::from_raw(&cli(&["--ssid", "Lab", "--passphrase", passphrase]), None)
    }

    #[test]
    fn length_bounds() {
        assert!(with_passphrase(&"p".repeat(7)).is_err());
        assert!(with_passphrase(&"p".repeat(8)).is_ok());
        assert!(with_passphrase(&"p".repeat(63)).is_ok());
        assert!(with_passphrase(&"p".repeat(64)).is_err());
    }

    #[test]
    fn non_ascii_rejected() {
        // Eight characters, but not ASCII
        assert!(matches!(
            with_passphrase("pässwörd"),
            Err(ConfigError::InvalidPassphrase { .. })
        ));
        assert!(with_passphrase("pass\tword").is_err());
        assert!(with_passphrase("pass word!").is_ok());
    }

    #[test]
    fn error_does_not_contain_value() {
        let err = with_passphrase("hunter2").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPassphrase { .. }));
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn short_passphrase_allowed_when_simulating() {
        let cli = cli(&["--ssid", "Lab", "--passphrase", "x", "--simulate"]);

        assert!(ValidatedConfig::from_raw(&cli, None).is_ok());
    }
}

mod hardware_ids {
    use super::*;

    #[test]
    fn ids_are_normalized_to_lowercase() {
        let cli = cli_with_network(&["--vendor-id", "148F", "--product-id", "76AB"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.identity.vendor_id, "148f");
        assert_eq!(config.identity.product_id, "76ab");
    }

    #[test]
    fn non_hex_vendor_id_rejected() {
        let cli = cli_with_network(&["--vendor-id", "14zf"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidHexId {
                field: "vendor_id",
                ..
            })
        ));
    }

    #[test]
    fn wrong_length_product_id_rejected() {
        let cli = cli_with_network(&["--product-id", "76011"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidHexId {
                field: "product_id",
                ..
            })
        ));
    }

    #[test]
    fn prefixed_id_rejected() {
        let cli = cli_with_network(&["--vendor-id", "0x14"]);

        assert!(ValidatedConfig::from_raw(&cli, None).is_err());
    }

    #[test]
    fn blank_description_rejected() {
        let cli = cli_with_network(&["--description", "  "]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidValue {
                field: "description",
                ..
            })
        ));
    }
}

mod durations {
    use super::*;

    #[test]
    fn zero_connect_timeout_rejected() {
        let cli = cli_with_network(&["--connect-timeout", "0"]);

        assert!(matches!(
            ValidatedConfig::from_raw(&cli, None),
            Err(ConfigError::InvalidDuration {
                field: "connect_timeout",
                ..
            })
        ));
    }

    #[test]
    fn zero_command_timeout_in_toml_rejected() {
        let toml = toml("[test]\ncommand_timeout = 0");

        assert!(matches!(
            ValidatedConfig::from_raw(&cli_with_network(&[]), Some(&toml)),
            Err(ConfigError::InvalidDuration {
                field: "command_timeout",
                ..
            })
        ));
    }

    #[test]
    fn zero_simulate_delay_allowed() {
        let toml = toml("[simulate]\ndelay_ms = 0");

        let config = ValidatedConfig::from_raw(&cli_with_network(&[]), Some(&toml)).unwrap();

        assert_eq!(config.simulate_delay, Duration::ZERO);
    }
}

mod simulate_interfaces {
    use super::*;

    #[test]
    fn empty_list_rejected() {
        let toml = toml("[simulate]\ninterfaces = []");

        assert!(matches!(
            ValidatedConfig::from_raw(&cli_with_network(&[]), Some(&toml)),
            Err(ConfigError::InvalidValue {
                field: "simulate.interfaces",
                ..
            })
        ));
    }

    #[test]
    fn blank_name_rejected() {
        let toml = toml("[simulate]\ninterfaces = [\"wlan0\", \"\"]");

        assert!(ValidatedConfig::from_raw(&cli_with_network(&[]), Some(&toml)).is_err());
    }
}
