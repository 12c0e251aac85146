//! Turning an uploaded document into a question bank.
//!
//! Extractors report progress through a callback and stop early when the
//! cancellation token fires, so a real PDF backend can replace the simulated
//! one without changing callers.

mod json;
mod progress;
mod simulated;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use quiz_core::model::Question;

use crate::error::ExtractionError;

pub use json::JsonQuestionBankExtractor;
pub use progress::ExtractionProgress;
pub use simulated::{ExtractionSettings, SimulatedPdfExtractor};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// An uploaded file handed to an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, PDF_MEDIA_TYPE, bytes)
    }

    #[must_use]
    pub fn json(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, JSON_MEDIA_TYPE, bytes)
    }
}

/// Source of question banks.
#[async_trait]
pub trait QuestionExtractor: Send + Sync {
    /// Media type this extractor accepts.
    fn media_type(&self) -> &'static str;

    /// Reject documents this extractor cannot read.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::UnsupportedFileType` on a media type mismatch.
    fn check_document(&self, document: &SourceDocument) -> Result<(), ExtractionError> {
        if document.media_type.eq_ignore_ascii_case(self.media_type()) {
            Ok(())
        } else {
            Err(ExtractionError::UnsupportedFileType {
                expected: self.media_type(),
                found: document.media_type.clone(),
            })
        }
    }

    /// Extract every question from `document`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Cancelled` once `cancel` fires, or a
    /// backend-specific error when the document cannot be read.
    async fn extract(
        &self,
        document: &SourceDocument,
        on_progress: &(dyn Fn(ExtractionProgress) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<Vec<Question>, ExtractionError>;
}
