//! # MAX! Error Handling
//!
//! This module defines the MaxError enum, which represents the different error
//! types that can occur in the maxrf-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the MAX! crate.
#[derive(Debug, Error)]
pub enum MaxError {
    /// Message is shorter than the fixed 10-byte header.
    #[error("Frame too short: {len} bytes, need at least 10")]
    FrameTooShort { len: usize },

    /// The type-specific payload decoder needs more bytes than were received.
    #[error("Payload too short for message type 0x{message_type:02X}: need {needed} bytes, got {actual}")]
    PayloadTooShort {
        message_type: u8,
        needed: usize,
        actual: usize,
    },

    /// Buffer is longer than the whitening sequence table.
    #[error("Buffer too long for whitening: {len} bytes (max {max})")]
    BufferTooLong { len: usize, max: usize },

    /// Indicates a checksum mismatch on a received frame.
    #[error("Invalid checksum: expected {expected:04X}, calculated {calculated:04X}")]
    CrcMismatch { expected: u16, calculated: u16 },

    /// The frame length byte points past the received data.
    #[error("Invalid length byte {length}: only {available} bytes available")]
    InvalidLength { length: u8, available: usize },

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string: {0}")]
    InvalidHexString(String),

    /// Registry configuration was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch‑all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<crate::util::hex::HexError> for MaxError {
    fn from(err: crate::util::hex::HexError) -> Self {
        MaxError::InvalidHexString(err.to_string())
    }
}

impl From<serde_json::Error> for MaxError {
    fn from(err: serde_json::Error) -> Self {
        MaxError::InvalidConfig(err.to_string())
    }
}
