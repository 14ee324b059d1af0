//! MAX! Protocol Constants
//!
//! This module defines constants used by the MAX! radio protocol
//! implementation: header layout, sentinels, and the checksum/whitening
//! parameters of the CC1101-compatible link layer.

// ----------------------------------------------------------------------------
// Message header layout
// ----------------------------------------------------------------------------

/// Length of the fixed message header in bytes
pub const HEADER_LEN: usize = 10;

/// Width of a device address in bits
pub const ADDRESS_BITS: u32 = 24;

/// Largest representable device address
pub const ADDRESS_MAX: u32 = 0x00FF_FFFF;

// ----------------------------------------------------------------------------
// Sentinels for unknown device state
// ----------------------------------------------------------------------------

/// Actual temperature not (yet) observed
pub const ACTUAL_TEMP_UNKNOWN: u16 = 0xFFFF;

/// Set temperature not (yet) observed
pub const SET_TEMP_UNKNOWN: u8 = 0xFF;

/// Valve position not (yet) observed
pub const VALVE_UNKNOWN: u8 = 0xFF;

// ----------------------------------------------------------------------------
// Link layer
// ----------------------------------------------------------------------------

/// CRC-16 polynomial (TI DN502, as computed by the CC1101)
pub const CRC16_POLY: u16 = 0x8005;

/// CRC-16 initial register value
pub const CRC16_INIT: u16 = 0xFFFF;

/// Number of PN9 bytes in the whitening table
pub const PN9_LEN: usize = 50;

/// Bytes of length/CRC housekeeping around a message on air
pub const ENVELOPE_OVERHEAD: usize = 3;

// ----------------------------------------------------------------------------
// Device registry
// ----------------------------------------------------------------------------

/// Number of device slots when no configuration is given
pub const DEFAULT_REGISTRY_CAPACITY: usize = 6;
