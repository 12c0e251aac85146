//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;
use quiz_core::model::QuestionError;

/// Errors emitted by question extractors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    #[error("unsupported file type {found:?}, expected {expected}")]
    UnsupportedFileType {
        expected: &'static str,
        found: String,
    },
    #[error("extraction was cancelled")]
    Cancelled,
    #[error("no questions found in {file_name}")]
    NoQuestions { file_name: String },
    #[error("question bank is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question {index} is invalid: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error(transparent)]
    Bank(QuestionError),
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("no question bank loaded")]
    NoBank,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl StudyError {
    /// True when the user can fix the problem and retry (e.g. nothing selected).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, StudyError::Quiz(err) if err.is_validation())
    }
}
