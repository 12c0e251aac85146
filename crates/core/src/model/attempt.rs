use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::{OptionLetter, Question};
use crate::model::subject::Subject;

//
// ─── ATTEMPT RECORD ────────────────────────────────────────────────────────────
//

/// Record of a single submitted answer.
///
/// Created exactly once per submission and never mutated afterwards. The
/// running list of these is the input to performance analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_answer: OptionLetter,
    pub correct_answer: OptionLetter,
    pub is_correct: bool,
    pub subject: Subject,
    pub timestamp: DateTime<Utc>,
    pub study_time_seconds: u64,
}

impl AttemptRecord {
    /// Build the record for answering `question` with `selected`.
    #[must_use]
    pub fn for_question(
        question: &Question,
        selected: OptionLetter,
        timestamp: DateTime<Utc>,
        study_time_seconds: u64,
    ) -> Self {
        Self {
            question_id: question.id(),
            question_text: question.text().to_string(),
            selected_answer: selected,
            correct_answer: question.answer(),
            is_correct: question.is_correct(selected),
            subject: question.subject().clone(),
            timestamp,
            study_time_seconds,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
