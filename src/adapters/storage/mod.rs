//! Persistent embedding cache adapters.

pub mod json_file;

pub use json_file::JsonFileStore;
