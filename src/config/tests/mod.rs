//! Unit tests for config module
//!
//! Tests settings types, defaults, validation and loading from disk.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::{fs, path::PathBuf};

use crate::{
    AgentError,
    config::{AgentSettings, BootstrapSettings, LogLevel},
    services::DevMeta,
};

#[test]
fn settings_default() {
    let settings = AgentSettings::default();

    assert_eq!(settings.general.log_level, LogLevel::Info);
    assert!(!settings.general.log_to_file);
    assert_eq!(settings.device.device_type, "fridge");
    assert_eq!(settings.center.init_config_path, None);
    assert_eq!(settings.bootstrap, BootstrapSettings::default());
    assert!(settings.validate().is_ok());
}

#[test]
fn settings_serialize_roundtrip() {
    let original = AgentSettings::default();

    let toml_str = toml::to_string(&original).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[bootstrap]"));

    let deserialized: AgentSettings = toml::from_str(&toml_str).unwrap();
    assert_eq!(original, deserialized);
}

#[test]
fn settings_full_toml() {
    let settings = AgentSettings::from_toml(
        r#"
        [general]
        log_level = "debug"

        [device]
        device_type = "freezer"
        name = "garage"
        mac = "aa:bb:cc:dd:ee:ff"

        [center]
        init_config_path = "/etc/device-agent/init.json"

        [bootstrap]
        max_attempts = 3
        initial_backoff_ms = 100
        max_backoff_ms = 800
    "#,
    )
    .unwrap();

    assert_eq!(settings.general.log_level, LogLevel::Debug);
    assert_eq!(settings.device.name, "garage");
    assert_eq!(
        settings.center.init_config_path,
        Some(PathBuf::from("/etc/device-agent/init.json"))
    );
    assert_eq!(settings.bootstrap.max_attempts, 3);

    let meta = DevMeta::from(&settings.device);
    assert_eq!(meta.device_type, "freezer");
    assert_eq!(meta.mac, "aa:bb:cc:dd:ee:ff");
}

#[test]
fn settings_partial_section_keeps_defaults() {
    let settings = AgentSettings::from_toml(
        r#"
        [bootstrap]
        max_attempts = 9
    "#,
    )
    .unwrap();

    assert_eq!(settings.bootstrap.max_attempts, 9);
    assert_eq!(
        settings.bootstrap.initial_backoff_ms,
        BootstrapSettings::default().initial_backoff_ms
    );
}

#[test]
fn log_level_display() {
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Trace.to_string(), "trace");
}

#[test]
fn invalid_log_level_is_rejected() {
    let result = AgentSettings::from_toml(
        r#"
        [general]
        log_level = "loud"
    "#,
    );

    assert!(matches!(result, Err(AgentError::TomlParseError { .. })));
}

#[test]
fn zero_attempts_fail_validation() {
    let result = AgentSettings::from_toml(
        r#"
        [bootstrap]
        max_attempts = 0
    "#,
    );

    assert!(matches!(result, Err(AgentError::ConfigValidation { .. })));
}

#[test]
fn inverted_backoff_fails_validation() {
    let result = AgentSettings::from_toml(
        r#"
        [bootstrap]
        initial_backoff_ms = 5000
        max_backoff_ms = 10
    "#,
    );

    let Err(AgentError::ConfigValidation { component, details }) = result else {
        panic!("expected validation error");
    };
    assert_eq!(component, "bootstrap");
    assert!(details.contains("initial_backoff_ms"));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let settings = AgentSettings::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(settings, AgentSettings::default());
}

#[test]
fn relative_init_path_resolves_against_settings_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [center]
        init_config_path = "init.json"
    "#,
    )
    .unwrap();

    let settings = AgentSettings::load_from(&path).unwrap();

    assert_eq!(
        settings.center.init_config_path,
        Some(dir.path().join("init.json"))
    );
}

#[test]
fn malformed_file_reports_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[general\nlog_level = ").unwrap();

    let err = AgentSettings::load_from(&path).unwrap_err();

    match err {
        AgentError::TomlParseError { location, .. } => assert!(location.ends_with("config.toml")),
        other => panic!("expected parse error, got {other}"),
    }
}
