//! Unit tests for the logging functionality in the `maxrf-rs` crate.

use maxrf_rs::logging::{init_logger, log_debug, log_error, log_info, log_warn};
use maxrf_rs::util::logging::{debug, log_frame_hex, span_frame_processing, LogThrottle};
use maxrf_rs::ReceiveStats;

/// Tests that the logging helpers work as expected.
#[test]
fn test_logging() {
    // Just ensure logging functions do not panic after init.
    init_logger();
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
}

/// Tests that the logger can be initialized more than once.
#[test]
fn test_init_logger_twice() {
    init_logger();
    init_logger();
}

#[test]
fn test_receive_path_helpers() {
    init_logger();
    let _span = span_frame_processing("test");
    log_frame_hex("frame", &[0x0F, 0xE4, 0x04, 0x70]);
    debug::log_crc_result(0x3241, 0x3241, true);
    debug::log_crc_result(0x3241, 0x0000, false);
    debug::log_receive_stats(&ReceiveStats::default());
}

#[test]
fn test_default_throttle_allows_five() {
    let mut throttle = LogThrottle::default();
    let allowed = (0..10).filter(|_| throttle.allow()).count();
    assert_eq!(allowed, 5);
}

#[test]
fn test_enhanced_logging_reports_second_init() {
    let _ = maxrf_rs::logging::init_enhanced_logging();
    assert!(maxrf_rs::logging::init_enhanced_logging().is_err());
}
