//! # Receive-Path Logging Utilities
//!
//! A MAX! installation chatters constantly: every thermostat reports its
//! state a few times an hour and neighbouring systems share the band. These
//! helpers keep the receive path observable without flooding the log.
//!
//! ## Usage
//!
//! ```rust
//! use maxrf_rs::util::logging::{LogThrottle, log_frame_hex};
//!
//! let mut throttle = LogThrottle::new(1000, 5); // 5 messages per second
//! if throttle.allow() {
//!     log::warn!("CRC error detected");
//! }
//!
//! log_frame_hex("Received frame", &[0xE4, 0x04, 0x70]);
//! ```

use std::time::Instant;

/// Throttling structure for rate-limiting log messages
#[derive(Debug)]
pub struct LogThrottle {
    /// Time window for throttling (in milliseconds)
    window_ms: u64,
    /// Maximum messages allowed per window
    cap: u32,
    /// Current message count in window
    count: u32,
    /// Start time of current window
    t0: Instant,
}

impl LogThrottle {
    /// Create new throttle with time window and message cap
    ///
    /// # Arguments
    /// * `window_ms` - Time window in milliseconds
    /// * `cap` - Maximum messages allowed per window
    pub fn new(window_ms: u64, cap: u32) -> Self {
        Self {
            window_ms,
            cap,
            count: 0,
            t0: Instant::now(),
        }
    }

    /// Check if logging is allowed (resets counter after window expires)
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.t0).as_millis() as u64;

        if elapsed_ms > self.window_ms {
            self.t0 = now;
            self.count = 0;
        }

        self.count = self.count.saturating_add(1);
        self.count <= self.cap
    }

    /// Reset the throttle (start new window immediately)
    pub fn reset(&mut self) {
        self.t0 = Instant::now();
        self.count = 0;
    }
}

impl Default for LogThrottle {
    /// Five messages per second.
    fn default() -> Self {
        Self::new(1000, 5)
    }
}

/// Log frame data in hex format for debugging
///
/// Output is truncated after 64 bytes.
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    const MAX_LOG_BYTES: usize = 64;

    let display_data = &data[..data.len().min(MAX_LOG_BYTES)];
    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!(target: "maxrf::frame", "{prefix}: {hex_str}{suffix}");
}

/// Enter a tracing span for frame processing; it closes when dropped
#[cfg(feature = "tracing")]
pub fn span_frame_processing(stage: &str) -> tracing::span::EnteredSpan {
    tracing::info_span!("frame_processing", stage = stage).entered()
}

/// Fallback span creation when tracing is not available
#[cfg(not(feature = "tracing"))]
pub fn span_frame_processing(_stage: &str) {}

/// Debug logging utilities for protocol analysis
pub mod debug {
    use crate::radio::receiver::ReceiveStats;

    /// Log receiver statistics in a formatted way
    pub fn log_receive_stats(stats: &ReceiveStats) {
        log::info!(
            "Receive stats: received={}, decoded={}, crc_errors={}, length_errors={}, too_long={}, too_short={}, bad_payloads={}, unknown_types={}",
            stats.frames_received,
            stats.frames_decoded,
            stats.crc_errors,
            stats.length_errors,
            stats.too_long,
            stats.too_short,
            stats.undecodable_payloads,
            stats.unknown_types,
        );
    }

    /// Log CRC validation results
    pub fn log_crc_result(expected: u16, calculated: u16, valid: bool) {
        if valid {
            log::debug!("CRC valid: {expected:04X}");
        } else {
            log::warn!("CRC mismatch: expected {expected:04X}, calculated {calculated:04X}");
        }
    }
}
