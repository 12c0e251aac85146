use thiserror::Error;

use crate::model::{AnalyticsSettingsError, QuestionError, SubjectError};
use crate::quiz::QuizError;

/// Umbrella error for callers that do not care which core operation failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Settings(#[from] AnalyticsSettingsError),
}
