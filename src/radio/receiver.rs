//! # MAX! Receive Pipeline
//!
//! Ties the link layer and the message grammar together:
//!
//! 1. **Dewhitening** - undo PN9 whitening in place
//! 2. **Envelope check** - length byte and CRC-16
//! 3. **Message decode** - header, payload, registry update
//!
//! Every outcome is counted in [`ReceiveStats`]. Checksum failures are
//! expected on a shared band, so their warnings are rate-limited.

use crate::device_registry::DeviceRegistry;
use crate::error::MaxError;
use crate::protocol::message::{try_parse_at, Message};
use crate::protocol::types::MessageType;
use crate::radio::frame::decode_envelope;
use crate::util::logging::{self, LogThrottle};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics for frame receive operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiveStats {
    pub frames_received: u64,
    pub frames_decoded: u64,
    pub crc_errors: u64,
    pub length_errors: u64,
    pub too_long: u64,
    pub too_short: u64,
    pub undecodable_payloads: u64,
    pub unknown_types: u64,
}

/// Receiver state: registry, statistics and log throttling
#[derive(Debug)]
pub struct Receiver {
    registry: DeviceRegistry,
    stats: ReceiveStats,
    error_throttle: LogThrottle,
}

impl Receiver {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self {
            registry,
            stats: ReceiveStats::default(),
            error_throttle: LogThrottle::default(),
        }
    }

    /// Handle a whitened on-air frame (length byte, message, checksum).
    ///
    /// `raw` is dewhitened in place; the returned message borrows it.
    pub fn receive<'a>(&mut self, raw: &'a mut [u8]) -> Result<Message<'a>, MaxError> {
        self.receive_at(raw, Utc::now())
    }

    pub fn receive_at<'a>(
        &mut self,
        raw: &'a mut [u8],
        now: DateTime<Utc>,
    ) -> Result<Message<'a>, MaxError> {
        let _span = logging::span_frame_processing("receive");
        self.stats.frames_received += 1;
        logging::log_frame_hex("Received frame", raw);

        let message = match decode_envelope(raw) {
            Ok(message) => message,
            Err(e) => {
                self.record_error(&e);
                return Err(e);
            }
        };
        self.decode_counted(message, now)
    }

    /// Handle message bytes that are already dewhitened and checked.
    pub fn decode<'a>(&mut self, message: &'a [u8]) -> Result<Message<'a>, MaxError> {
        let _span = logging::span_frame_processing("decode");
        self.stats.frames_received += 1;
        logging::log_frame_hex("Decoding message", message);
        self.decode_counted(message, Utc::now())
    }

    fn decode_counted<'a>(
        &mut self,
        message: &'a [u8],
        now: DateTime<Utc>,
    ) -> Result<Message<'a>, MaxError> {
        match try_parse_at(message, &mut self.registry, now) {
            Ok(decoded) => {
                self.stats.frames_decoded += 1;
                if let MessageType::Unknown(value) = decoded.message_type() {
                    self.stats.unknown_types += 1;
                    log::debug!("Message type {value:#04X} kept as opaque payload");
                }
                Ok(decoded)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    fn record_error(&mut self, error: &MaxError) {
        match error {
            MaxError::CrcMismatch {
                expected,
                calculated,
            } => {
                self.stats.crc_errors += 1;
                if self.error_throttle.allow() {
                    logging::debug::log_crc_result(*expected, *calculated, false);
                }
                return;
            }
            MaxError::InvalidLength { .. } => self.stats.length_errors += 1,
            MaxError::BufferTooLong { .. } => self.stats.too_long += 1,
            MaxError::FrameTooShort { .. } => self.stats.too_short += 1,
            MaxError::PayloadTooShort { .. } => self.stats.undecodable_payloads += 1,
            _ => {}
        }
        log::debug!("Frame dropped: {error}");
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    /// Get current receive statistics
    pub fn stats(&self) -> ReceiveStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ReceiveStats::default();
        self.error_throttle.reset();
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new(DeviceRegistry::default())
    }
}
