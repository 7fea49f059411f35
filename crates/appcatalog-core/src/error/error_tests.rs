#![allow(non_snake_case)]

use super::*;

#[test]
fn ConfigError___invalid___displays_message() {
    let err = ConfigError::Invalid("serverPort out of range".into());

    assert_eq!(
        err.to_string(),
        "invalid configuration: serverPort out of range"
    );
}

#[test]
fn ConfigError___from_io_error___converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");

    let err: ConfigError = io_err.into();

    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().starts_with("failed to read configuration"));
}

#[test]
fn ConfigError___from_json_error___converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();

    let err: ConfigError = json_err.into();

    assert!(matches!(err, ConfigError::Json(_)));
}
