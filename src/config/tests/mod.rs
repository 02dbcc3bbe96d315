//! Unit tests for config module
//!
//! Tests configuration types, defaults, and file loading.

#![allow(clippy::unwrap_used)]

use std::{fs, time::Duration};

use tempfile::TempDir;

use crate::config::Config;

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.audio.command, "pactl");
    assert_eq!(config.audio.timeout(), Duration::from_millis(5000));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [audio]
        command = "wpctl"
        timeout_ms = 1500
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.audio.command, "wpctl");
    assert_eq!(config.audio.timeout(), Duration::from_millis(1500));
}

#[test]
fn config_partial_toml_keeps_defaults() {
    let toml_str = r#"
        [audio]
        timeout_ms = 250
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.audio.command, "pactl");
    assert_eq!(config.audio.timeout_ms, 250);
}

#[test]
fn config_empty_toml_is_all_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.audio.command, "pactl");
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(format!("{original:?}"), format!("{deserialized:?}"));
}

#[test]
fn load_from_reads_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[audio]\ncommand = \"pactl-test\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.audio.command, "pactl-test");
}

#[test]
fn load_from_rejects_malformed_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[audio\nnot toml").unwrap();

    assert!(Config::load_from(&path).is_err());
}
