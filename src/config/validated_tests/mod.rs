//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["wifi-tester"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// CLI args carrying valid credentials
fn cli_with_network(extra: &[&str]) -> Cli {
    let mut args = vec!["--ssid", "FactoryTest", "--passphrase", "secret123"];
    args.extend(extra);
    cli(&args)
}

mod validation_tests;
