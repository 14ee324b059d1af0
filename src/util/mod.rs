//! # Utility Modules
//!
//! This module provides common utility functions used throughout the
//! maxrf-rs crate: sub-byte field extraction, hex encoding/decoding, and
//! logging patterns for the receive path.

pub mod bits;
pub mod hex;
pub mod logging;

// Re-export commonly used types and functions
pub use bits::{extract, try_extract};
pub use hex::{
    decode_hex, encode_hex, format_address, format_hex_compact, format_hex_spaced, parse_address,
};
pub use logging::{log_frame_hex, LogThrottle};
