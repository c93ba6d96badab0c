//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry writing to stderr, so that
//! machine-readable output on stdout stays clean.

mod logging;

pub use logging::{TelemetryError, init_logging};
