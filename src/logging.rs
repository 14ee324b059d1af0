use log::{debug, error, info, log_enabled, warn, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first logger in place.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        debug!("Logger already initialized");
    }
}

/// Enhanced logging initialization with tracing support
///
/// This function initializes the most appropriate logging backend:
/// - With the `tracing` feature: a `tracing_subscriber` fmt layer filtered by `RUST_LOG`
/// - Otherwise: standard env_logger
///
/// Fails if a logger or tracing subscriber is already installed.
///
/// # Examples
/// ```rust,no_run
/// use maxrf_rs::logging::init_enhanced_logging;
///
/// init_enhanced_logging().expect("Failed to initialize logging");
/// log::info!("Receiver started");
/// ```
pub fn init_enhanced_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(feature = "tracing")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).try_init()?;
    }

    #[cfg(not(feature = "tracing"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        env_logger::Builder::from_env(env).try_init()?;
    }

    Ok(())
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
