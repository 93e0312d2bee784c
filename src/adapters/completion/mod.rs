//! Completion provider adapters.

pub mod openai;

pub use openai::{OpenAiCompletionConfig, OpenAiCompletionProvider};
