//! Completion provider port for answer generation.

use async_trait::async_trait;

use crate::domain::errors::RetrievalResult;

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,

    /// User prompt, including any retrieved context
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,
}

/// Trait for language-completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier used for generation.
    fn model(&self) -> &str;

    /// Generate text for the request.
    ///
    /// Failures surface as [`RetrievalError::Generation`](crate::domain::errors::RetrievalError::Generation);
    /// implementations never substitute a fallback answer.
    async fn complete(&self, request: &CompletionRequest) -> RetrievalResult<String>;
}
