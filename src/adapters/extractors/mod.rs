//! Text extraction adapters.
//!
//! `ExtensionExtractor` is the one wired into the retrieval tool; it routes
//! each document to a concrete extractor by file extension.

pub mod pdftotext;
pub mod plain_text;

pub use pdftotext::PdftotextExtractor;
pub use plain_text::PlainTextExtractor;

use async_trait::async_trait;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::DocumentRef;
use crate::domain::ports::TextExtractor;

/// Routes documents to an extractor based on their extension.
///
/// - `pdf` goes to `pdf`
/// - `txt`, `md`, `text` go to `text`
/// - anything else is an unsupported format
pub struct ExtensionExtractor {
    pdf: Box<dyn TextExtractor>,
    text: Box<dyn TextExtractor>,
}

impl ExtensionExtractor {
    pub fn new(pdf: Box<dyn TextExtractor>, text: Box<dyn TextExtractor>) -> Self {
        Self { pdf, text }
    }
}

impl Default for ExtensionExtractor {
    fn default() -> Self {
        Self::new(
            Box::new(PdftotextExtractor::default()),
            Box::new(PlainTextExtractor),
        )
    }
}

#[async_trait]
impl TextExtractor for ExtensionExtractor {
    async fn extract(&self, document: &DocumentRef) -> RetrievalResult<String> {
        match document.extension().as_deref() {
            Some("pdf") => self.pdf.extract(document).await,
            Some("txt" | "md" | "text") => self.text.extract(document).await,
            Some(other) => Err(RetrievalError::extraction(
                document.as_str(),
                format!("unsupported format: .{other}"),
            )),
            None => Err(RetrievalError::extraction(
                document.as_str(),
                "unsupported format: no file extension",
            )),
        }
    }
}
