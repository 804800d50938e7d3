use std::collections::BTreeMap;
use std::fs;

use photodeck::{Config, PhotodeckError};

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photodeck.toml");
    fs::write(
        &path,
        "server_address = \"https://photos.example//\"\nauth_token = \"t0k\"\n",
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.server_address, "https://photos.example");
    assert_eq!(config.auth_token.as_deref(), Some("t0k"));
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.trace_level, None);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photodeck.toml");
    fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, PhotodeckError::Config(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PhotodeckError::Io(_)));
}

#[test]
fn arguments_override_file_values() {
    let file = Config {
        server_address: "https://photos.example".to_string(),
        auth_token: Some("t0k".to_string()),
        ..Config::default()
    };

    let mut args = BTreeMap::new();
    args.insert("server_address".to_string(), "http://lan:8000/".to_string());
    args.insert("route".to_string(), "/".to_string());

    let merged = file.merged_with(&args);
    assert_eq!(merged.server_address, "http://lan:8000");
    assert_eq!(merged.auth_token.as_deref(), Some("t0k"));
}

#[test]
fn empty_map_gives_defaults() {
    assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
}
