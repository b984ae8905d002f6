//! Logging and observability
//!
//! Structured logging with:
//! - human-readable console output on stderr
//! - JSON log files with rotation
//! - level selection from config, overridable through `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use domekeeper::logging::init_logging;
//! use domekeeper::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(location = "Tropical Dome", plants = 42, "Location loaded");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use domekeeper::log_error_with_context;
/// use domekeeper::domain::DomekeeperError;
///
/// let error = DomekeeperError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log progress through a sequence of write batches
///
/// # Example
///
/// ```no_run
/// use domekeeper::log_batch_processing;
///
/// log_batch_processing!("insert", 1, 2);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($operation:expr, $current:expr, $total:expr) => {
        tracing::debug!(
            operation = $operation,
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}
