//! Domain layer for the retrieval engine
//!
//! This module contains the core models, error taxonomy, and the port
//! traits that external collaborators implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{RetrievalError, RetrievalResult};
