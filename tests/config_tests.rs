//! Tests for loading registry configuration from JSON files.

use maxrf_rs::{DeviceRegistry, DeviceType, MaxError, RegistryConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const INSTALLATION: &str = r#"{
    "capacity": 4,
    "devices": [
        { "address": "04C8DD", "device_type": "cube", "name": "Cube" },
        { "address": "0x0298E5", "device_type": "wall", "name": "Living room" },
        { "address": "0C2B4D", "device_type": "radiator" }
    ]
}"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(INSTALLATION);
    let config = RegistryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.capacity, 4);
    assert_eq!(config.devices.len(), 3);
    assert_eq!(config.devices[1].address, 0x0298E5);
    assert_eq!(config.devices[2].name, None);

    let registry = DeviceRegistry::from_config(&config).unwrap();
    assert_eq!(registry.capacity(), 4);
    assert_eq!(registry.len(), 3);
    let wall = registry.get(0x0298E5).unwrap();
    assert_eq!(wall.device_type(), DeviceType::Wall);
    assert_eq!(wall.label(), "Living room");
    assert!(registry.get(0x0C2B4D).unwrap().radiator().is_some());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = RegistryConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(MaxError::Io(_))));
}

#[test]
fn test_malformed_json() {
    let file = write_config("{ \"capacity\": ");
    assert!(matches!(
        RegistryConfig::from_file(file.path()),
        Err(MaxError::InvalidConfig(_))
    ));
}

#[test]
fn test_rejected_configurations() {
    let cases = [
        r#"{"capacity": 1, "devices": [{"address": "000001"}, {"address": "000002"}]}"#,
        r#"{"devices": [{"address": "000000"}]}"#,
        r#"{"devices": [{"address": "1000000"}]}"#,
        r#"{"devices": [{"address": "0298E5"}, {"address": "0298e5"}]}"#,
        r#"{"devices": [{"address": "XYZ"}]}"#,
        r#"{"devices": [{"address": "0298E5", "device_type": "thermostat"}]}"#,
    ];
    for json in cases {
        assert!(
            matches!(RegistryConfig::from_json(json), Err(MaxError::InvalidConfig(_))),
            "{json}"
        );
    }
}

#[test]
fn test_json_round_trip() {
    let config = RegistryConfig::from_json(INSTALLATION).unwrap();
    let json = config.to_json().unwrap();
    assert!(json.contains("\"0298E5\""));
    assert_eq!(RegistryConfig::from_json(&json).unwrap(), config);
}
