//! # Registry Configuration
//!
//! The registry can be pre-seeded with the devices of an installation so
//! they show up with their type and a readable name from the first frame.
//! Configuration is JSON:
//!
//! ```json
//! {
//!   "capacity": 6,
//!   "devices": [
//!     { "address": "04C8DD", "device_type": "cube", "name": "Cube" },
//!     { "address": "0298E5", "device_type": "wall", "name": "Living room" }
//!   ]
//! }
//! ```

use crate::constants::DEFAULT_REGISTRY_CAPACITY;
use crate::error::MaxError;
use crate::protocol::types::DeviceType;
use crate::util::hex::{format_address, parse_address};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::path::Path;

/// A device known before any traffic is seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownDevice {
    #[serde(serialize_with = "serialize_address", deserialize_with = "deserialize_address")]
    pub address: u32,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub name: Option<String>,
}

/// Device registry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Total number of slots, seeded ones included
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub devices: Vec<KnownDevice>,
}

fn default_capacity() -> usize {
    DEFAULT_REGISTRY_CAPACITY
}

fn serialize_address<S: Serializer>(address: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_address(*address))
}

fn deserialize_address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_address(&text).map_err(serde::de::Error::custom)
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_REGISTRY_CAPACITY,
            devices: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, MaxError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MaxError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loading registry configuration from {}", path.display());
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, MaxError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject seeds the registry could not hold.
    pub fn validate(&self) -> Result<(), MaxError> {
        if self.devices.len() > self.capacity {
            return Err(MaxError::InvalidConfig(format!(
                "{} devices configured but capacity is {}",
                self.devices.len(),
                self.capacity
            )));
        }

        let mut seen = HashSet::new();
        for device in &self.devices {
            if device.address == 0 {
                return Err(MaxError::InvalidConfig(
                    "address 000000 is reserved for broadcasts".to_string(),
                ));
            }
            if !seen.insert(device.address) {
                return Err(MaxError::InvalidConfig(format!(
                    "device {} configured twice",
                    format_address(device.address)
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::from_json("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.capacity, DEFAULT_REGISTRY_CAPACITY);
    }

    #[test]
    fn test_parse_devices() {
        let config = RegistryConfig::from_json(
            r#"{"capacity": 4, "devices": [
                {"address": "04C8DD", "device_type": "cube", "name": "Cube"},
                {"address": "0x0298e5", "device_type": "wall"},
                {"address": "00B825"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(config.capacity, 4);
        assert_eq!(config.devices[0].address, 0x04C8DD);
        assert_eq!(config.devices[0].name.as_deref(), Some("Cube"));
        assert_eq!(config.devices[1].device_type, DeviceType::Wall);
        assert_eq!(config.devices[2].device_type, DeviceType::Unknown);
        assert_eq!(config.devices[2].name, None);
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(RegistryConfig::from_json(r#"{"devices": [{"address": "000000"}]}"#).is_err());
        assert!(RegistryConfig::from_json(r#"{"devices": [{"address": "1000000"}]}"#).is_err());
        assert!(RegistryConfig::from_json(
            r#"{"devices": [{"address": "000001"}, {"address": "000001"}]}"#
        )
        .is_err());
        assert!(RegistryConfig::from_json(
            r#"{"capacity": 1, "devices": [{"address": "000001"}, {"address": "000002"}]}"#
        )
        .is_err());
        assert!(matches!(
            RegistryConfig::from_json("not json"),
            Err(MaxError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_hex_addresses() {
        let config = RegistryConfig {
            capacity: 2,
            devices: vec![KnownDevice {
                address: 0x0298E5,
                device_type: DeviceType::Wall,
                name: Some("Living room".to_string()),
            }],
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"0298E5\""));
        assert_eq!(RegistryConfig::from_json(&json).unwrap(), config);
    }
}
