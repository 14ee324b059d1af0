//! Unit tests for the `MaxError` enum and its associated `Display` trait implementation.

use maxrf_rs::error::MaxError;
use maxrf_rs::util::hex::{decode_hex, HexError};

/// Tests that the `FrameTooShort` variant is correctly formatted.
#[test]
fn test_frame_too_short_error() {
    let err = MaxError::FrameTooShort { len: 7 };
    assert_eq!(err.to_string(), "Frame too short: 7 bytes, need at least 10");
}

/// Tests that the `PayloadTooShort` variant is correctly formatted.
#[test]
fn test_payload_too_short_error() {
    let err = MaxError::PayloadTooShort {
        message_type: 0x60,
        needed: 3,
        actual: 1,
    };
    assert_eq!(
        err.to_string(),
        "Payload too short for message type 0x60: need 3 bytes, got 1"
    );
}

/// Tests that the `BufferTooLong` variant is correctly formatted.
#[test]
fn test_buffer_too_long_error() {
    let err = MaxError::BufferTooLong { len: 64, max: 50 };
    assert_eq!(err.to_string(), "Buffer too long for whitening: 64 bytes (max 50)");
}

/// Tests that the `CrcMismatch` variant is correctly formatted.
#[test]
fn test_crc_mismatch_error() {
    let err = MaxError::CrcMismatch {
        expected: 0x3241,
        calculated: 0x00AB,
    };
    assert_eq!(err.to_string(), "Invalid checksum: expected 3241, calculated 00AB");
}

/// Tests that the `InvalidLength` variant is correctly formatted.
#[test]
fn test_invalid_length_error() {
    let err = MaxError::InvalidLength {
        length: 12,
        available: 9,
    };
    assert_eq!(err.to_string(), "Invalid length byte 12: only 9 bytes available");
}

/// Tests that hex errors convert into `InvalidHexString`.
#[test]
fn test_invalid_hex_string_error() {
    let hex_err = decode_hex("ABC").unwrap_err();
    assert_eq!(hex_err, HexError::OddLength(3));

    let err: MaxError = hex_err.into();
    assert_eq!(
        err.to_string(),
        "Invalid hexadecimal string: Odd number of hex characters: 3"
    );
}

/// Tests that JSON errors convert into `InvalidConfig`.
#[test]
fn test_invalid_config_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: MaxError = json_err.into();
    assert!(matches!(err, MaxError::InvalidConfig(_)));
    assert!(err.to_string().starts_with("Invalid configuration: "));
}

/// Tests that I/O errors are wrapped.
#[test]
fn test_io_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "devices.json");
    let err: MaxError = io.into();
    assert_eq!(err.to_string(), "I/O error: devices.json");
}

/// Tests that the `Other` variant is correctly formatted.
#[test]
fn test_other_error() {
    let err = MaxError::Other("Test error message".to_string());
    assert_eq!(err.to_string(), "Other error: Test error message");
}
