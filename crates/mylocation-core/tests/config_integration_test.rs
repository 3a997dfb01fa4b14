//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use mylocation_core::config::{BusyPolicy, CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("MYLOCATION_BUSY_POLICY");
    env::remove_var("MYLOCATION_ALERT_ON_POSITIONING_ERROR");
    env::remove_var("MYLOCATION_FALLBACK_PLACE_LABEL");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
busy_policy = "reject"
alert_on_positioning_error = false
fallback_place_label = "dropped pin"
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.busy_policy.value, BusyPolicy::Reject);
    assert_eq!(config.busy_policy.source, ConfigSource::File);
    assert!(!config.alert_on_positioning_error.value);
    assert_eq!(config.fallback_place_label.value, "dropped pin");
    assert_eq!(config.initial_region.source, ConfigSource::Default);
}

#[test]
fn test_missing_file_is_config_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/mylocation.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = config_file("busy_policy = [not valid");
    let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file(r#"busy_policy = "reject""#);

    env::set_var("MYLOCATION_BUSY_POLICY", "supersede");
    env::set_var("MYLOCATION_ALERT_ON_POSITIONING_ERROR", "off");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.busy_policy.value, BusyPolicy::Supersede);
    assert_eq!(config.busy_policy.source, ConfigSource::Environment);
    assert!(!config.alert_on_positioning_error.value);
    assert_eq!(config.alert_on_positioning_error.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("MYLOCATION_BUSY_POLICY", "queue");
    env::set_var("MYLOCATION_ALERT_ON_POSITIONING_ERROR", "maybe");
    env::set_var("MYLOCATION_FALLBACK_PLACE_LABEL", "  ");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.busy_policy.source, ConfigSource::Default);
    assert_eq!(config.alert_on_positioning_error.source, ConfigSource::Default);
    assert_eq!(config.fallback_place_label.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var("MYLOCATION_FALLBACK_PLACE_LABEL", "from env");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        fallback_place_label: Some("from cli".to_string()),
        ..Default::default()
    });

    assert_eq!(config.fallback_place_label.value, "from cli");
    assert_eq!(config.fallback_place_label.source, ConfigSource::Cli);

    let inspection = config.to_inspection_map();
    let (value, source) = &inspection["fallback_place_label"];
    assert_eq!(value, "from cli");
    assert_eq!(*source, ConfigSource::Cli);

    clear_env();
}
