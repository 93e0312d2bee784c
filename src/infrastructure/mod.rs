//! Infrastructure layer module
//!
//! This module contains the cross-cutting pieces the services build on:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Text chunking and similarity ranking
//!
//! Adapters for external services live in `crate::adapters`.

pub mod config;
pub mod logging;
pub mod vector;
