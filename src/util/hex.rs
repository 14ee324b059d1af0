//! # Hex Encoding/Decoding Utilities
//!
//! Hex is how MAX! frames and device addresses show up everywhere outside
//! the radio: sniffer logs, the CLI, configuration files and test vectors.
//!
//! ## Usage
//!
//! ```rust
//! use maxrf_rs::util::hex::{decode_hex, format_hex_spaced, parse_address};
//!
//! let frame = decode_hex("E4 04 70 02 98 E5").unwrap();
//! assert_eq!(format_hex_spaced(&frame), "E4 04 70 02 98 E5");
//! assert_eq!(parse_address("0298E5").unwrap(), 0x0298E5);
//! ```

use crate::constants::ADDRESS_MAX;
use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),

    #[error("Address out of range: {0}")]
    AddressOutOfRange(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Encode bytes to uppercase hex string
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format bytes for compact display in logs: "e4 04 70"
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format bytes the way sniffer dumps show payloads: "E4 04 70"
pub fn format_hex_spaced(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a 24-bit device address as six uppercase hex digits
pub fn format_address(address: u32) -> String {
    format!("{:06X}", address & ADDRESS_MAX)
}

/// Parse a device address written as hex, with or without a `0x` prefix
pub fn parse_address(input: &str) -> Result<u32, HexError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(HexError::EmptyString);
    }

    let value = u32::from_str_radix(digits, 16)
        .map_err(|e| HexError::DecodeError(format!("{input}: {e}")))?;

    if value > ADDRESS_MAX {
        return Err(HexError::AddressOutOfRange(input.to_string()));
    }
    Ok(value)
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("Invalid hex in test data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_case() {
        let data = vec![0xAB, 0xCD, 0xEF];
        assert_eq!(encode_hex(&data), "abcdef");
        assert_eq!(encode_hex_upper(&data), "ABCDEF");
    }

    #[test]
    fn test_decode_with_whitespace() {
        let hex = "E4 04 70 02 98 E5";
        assert_eq!(decode_hex(hex).unwrap(), vec![0xE4, 0x04, 0x70, 0x02, 0x98, 0xE5]);
    }

    #[test]
    fn test_format_compact_and_spaced() {
        let data = vec![0x19, 0x04, 0x2A, 0x00, 0xCD];
        assert_eq!(format_hex_compact(&data), "19 04 2a 00 cd");
        assert_eq!(format_hex_spaced(&data), "19 04 2A 00 CD");
        assert_eq!(format_hex_spaced(&[]), "");
    }

    #[test]
    fn test_addresses() {
        assert_eq!(format_address(0x0298E5), "0298E5");
        assert_eq!(format_address(0), "000000");
        assert_eq!(parse_address("0x04c8dd").unwrap(), 0x04C8DD);
        assert_eq!(parse_address(" 00B825 ").unwrap(), 0x00B825);
        assert!(matches!(parse_address("1000000"), Err(HexError::AddressOutOfRange(_))));
        assert!(matches!(parse_address("zz"), Err(HexError::DecodeError(_))));
        assert_eq!(parse_address(""), Err(HexError::EmptyString));
    }

    #[test]
    fn test_errors() {
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
        assert_eq!(decode_hex("1"), Err(HexError::OddLength(1)));
        assert!(decode_hex("GG").is_err());
    }
}
