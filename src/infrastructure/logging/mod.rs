//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console formatting (stderr, so stdout stays clean for results)
//! - Optional daily-rotated JSON log files
//! - `RUST_LOG` overrides the configured level

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
