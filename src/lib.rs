//! # maxrf-rs - A Rust Crate for Receiving MAX! Heating Control Radio Traffic
//!
//! The maxrf-rs crate decodes the 868 MHz radio protocol spoken by MAX! heating
//! controls (cube, wall thermostats, radiator thermostats) and keeps a small
//! table with the last state every device reported.
//!
//! ## Features
//!
//! - Undo the CC1101-style PN9 whitening applied to every frame on air
//! - Check the length byte and CRC-16 envelope around each message
//! - Decode the ten-byte message header and the state-bearing payloads
//!   (set temperature, wall thermostat state, radiator thermostat state,
//!   display mode); all other message types are kept as opaque bytes
//! - Track sender and recipient devices in a bounded registry that can be
//!   seeded from a JSON configuration
//! - Render decoded messages and the device table as plain text
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! To use the maxrf-rs crate in your Rust project, add the following to your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! maxrf-rs = "0.1.0"
//! ```
//!
//! Decoding a message that has already been dewhitened and checked:
//!
//! ```rust
//! use maxrf_rs::{parse, DeviceRegistry, Payload};
//!
//! let mut registry = DeviceRegistry::default();
//! let bytes = [
//!     0xE4, 0x04, 0x70, 0x02, 0x98, 0xE5, 0x00, 0x00, 0x00, 0x00, // header
//!     0x19, 0x04, 0x2A, 0x00, 0xCD, // payload
//! ];
//!
//! let message = parse(&bytes, &mut registry).unwrap();
//! assert_eq!(message.header.address_from, 0x0298E5);
//! assert!(matches!(message.payload, Payload::Unknown { .. }));
//! ```

pub mod config;
pub mod constants;
pub mod device_registry;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod radio;
pub mod report;
pub mod util;

pub use crate::error::MaxError;
pub use crate::logging::{init_logger, log_info};

// Core decoding types
pub use config::{KnownDevice, RegistryConfig};
pub use device_registry::{Device, DeviceKind, DeviceRegistry, DeviceSlot, RadiatorState};
pub use protocol::{
    parse, try_parse, DeviceType, DisplayMode, Message, MessageHeader, MessageType, Mode, Payload,
    UntilTime,
};
pub use radio::{ReceiveStats, Receiver};

// Presentation
pub use report::{DeviceTableReport, MessageReport};

/// Remove (or apply) the PN9 whitening of a received frame in place.
///
/// # Arguments
/// * `buf` - Raw frame bytes as read from the transceiver
///
/// # Returns
/// * `Ok(())` - Buffer dewhitened
/// * `Err(MaxError::BufferTooLong)` - Buffer longer than the whitening sequence; left unmodified
pub fn dewhiten(buf: &mut [u8]) -> Result<(), MaxError> {
    radio::pn9::xor_pn9(buf)
}
