use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use quiz_core::model::{Question, QuestionDraft, validate_bank};

use super::{ExtractionProgress, JSON_MEDIA_TYPE, QuestionExtractor, SourceDocument};
use crate::error::ExtractionError;

/// Reads a question bank exported as a JSON array of
/// `{ id, text, options, answer, subject }` objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonQuestionBankExtractor;

#[async_trait]
impl QuestionExtractor for JsonQuestionBankExtractor {
    fn media_type(&self) -> &'static str {
        JSON_MEDIA_TYPE
    }

    async fn extract(
        &self,
        document: &SourceDocument,
        on_progress: &(dyn Fn(ExtractionProgress) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<Vec<Question>, ExtractionError> {
        self.check_document(document)?;
        let drafts: Vec<QuestionDraft> = serde_json::from_slice(&document.bytes)?;
        if drafts.is_empty() {
            return Err(ExtractionError::NoQuestions {
                file_name: document.file_name.clone(),
            });
        }

        let total = drafts.len();
        let mut questions = Vec::with_capacity(total);
        for (index, draft) in drafts.into_iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(ExtractionError::Cancelled);
            }
            let question = draft
                .validate()
                .map_err(|source| ExtractionError::Question { index, source })?;
            questions.push(question);
            on_progress(ExtractionProgress::of(index + 1, total, questions.len()));
        }

        validate_bank(&questions).map_err(ExtractionError::Bank)?;
        Ok(questions)
    }
}
