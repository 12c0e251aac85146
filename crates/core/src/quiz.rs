use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    AttemptRecord, OptionLetter, Question, SessionScore, Subject, SubjectFilter, score_percent,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Illegal moves on a quiz session. None of these change the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for the selected subject")]
    NoQuestions,
    #[error("select an answer before submitting")]
    NoAnswerSelected,
    #[error("answer already submitted for this question")]
    AlreadyRevealed,
    #[error("submit an answer before moving on")]
    NotRevealed,
    #[error("quiz already completed")]
    Completed,
    #[error("option {0} is not offered for this question")]
    UnknownOption(OptionLetter),
}

impl QuizError {
    /// True for conditions the user fixes by retrying, as opposed to
    /// calls the presentation layer should never have made.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, QuizError::NoAnswerSelected)
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// The active filter selects no questions.
    NoQuestions,
    /// Waiting for a selection and submission on the current question.
    Answering,
    /// The current answer was submitted and its correctness is shown.
    Revealed,
    /// Every question in the active set was answered.
    Complete,
}

/// Outcome of moving past a revealed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    /// The session finished; carries every attempt made in it, in order.
    Completed(Vec<AttemptRecord>),
}

/// Position within the active question set, useful for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
    pub is_complete: bool,
}

/// One run through a (possibly subject-filtered) question set.
///
/// Transitions: `Answering` → `Revealed` on submit, `Revealed` → `Answering`
/// (next question) or `Complete` on advance. A filter change or reset starts
/// over from the first question with no attempts.
#[derive(Clone)]
pub struct QuizSession {
    bank: Vec<Question>,
    filter: SubjectFilter,
    questions: Vec<Question>,
    current: usize,
    selected: Option<OptionLetter>,
    results: Vec<AttemptRecord>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start a session over the whole bank.
    #[must_use]
    pub fn new(bank: Vec<Question>) -> Self {
        let mut session = Self {
            questions: bank.clone(),
            bank,
            filter: SubjectFilter::All,
            current: 0,
            selected: None,
            results: Vec::new(),
            phase: QuizPhase::NoQuestions,
        };
        session.restart();
        session
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn filter(&self) -> &SubjectFilter {
        &self.filter
    }

    /// Questions selected by the active filter.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question on screen, if the session is answering or revealing one.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Answering | QuizPhase::Revealed => self.questions.get(self.current),
            QuizPhase::NoQuestions | QuizPhase::Complete => None,
        }
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<OptionLetter> {
        self.selected
    }

    /// Attempts made in this session, in answering order.
    #[must_use]
    pub fn results(&self) -> &[AttemptRecord] {
        &self.results
    }

    #[must_use]
    pub fn last_attempt(&self) -> Option<&AttemptRecord> {
        self.results.last()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Complete
    }

    /// Sorted, de-duplicated subjects of the full bank, for filter menus.
    #[must_use]
    pub fn available_subjects(&self) -> Vec<Subject> {
        self.bank
            .iter()
            .map(|q| q.subject().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn score(&self) -> SessionScore {
        SessionScore::from_attempts(&self.results)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let position = if total == 0 {
            0
        } else {
            (self.current + 1).min(total)
        };
        QuizProgress {
            position,
            total,
            answered: self.results.len(),
            percent: score_percent(position, total),
            is_complete: self.is_complete(),
        }
    }

    /// Choose an option for the current question. Later calls replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownOption` if the letter is not one of the
    /// question's options, or a phase error outside `Answering`.
    pub fn select_answer(&mut self, letter: OptionLetter) -> Result<QuizPhase, QuizError> {
        let question = self.answering_question()?;
        if !question.has_option(letter) {
            return Err(QuizError::UnknownOption(letter));
        }
        self.selected = Some(letter);
        Ok(self.phase)
    }

    /// Submit the selected option and reveal whether it was correct.
    ///
    /// `study_time_seconds` and `at` come from the caller's timer and clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoAnswerSelected` when nothing is selected (state is
    /// unchanged and the user may retry), `QuizError::AlreadyRevealed` when the
    /// current answer was already submitted, or another phase error.
    pub fn submit_answer(
        &mut self,
        study_time_seconds: u64,
        at: DateTime<Utc>,
    ) -> Result<&AttemptRecord, QuizError> {
        let question = self.answering_question()?;
        let selected = self.selected.ok_or(QuizError::NoAnswerSelected)?;

        let record = AttemptRecord::for_question(question, selected, at, study_time_seconds);
        let slot = self.results.len();
        self.results.push(record);
        self.phase = QuizPhase::Revealed;

        Ok(&self.results[slot])
    }

    /// Move past a revealed question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRevealed` if the current answer has not been
    /// submitted, or a phase error when there is nothing to advance.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        match self.phase {
            QuizPhase::Revealed => {}
            QuizPhase::Answering => return Err(QuizError::NotRevealed),
            QuizPhase::NoQuestions => return Err(QuizError::NoQuestions),
            QuizPhase::Complete => return Err(QuizError::Completed),
        }

        if self.is_last_question() {
            self.phase = QuizPhase::Complete;
            return Ok(Advance::Completed(self.results.clone()));
        }

        self.current += 1;
        self.selected = None;
        self.phase = QuizPhase::Answering;
        Ok(Advance::Next {
            index: self.current,
        })
    }

    /// Switch subject filter. Discards this session's attempts and starts over.
    pub fn set_subject_filter(&mut self, filter: SubjectFilter) -> QuizPhase {
        self.questions = self
            .bank
            .iter()
            .filter(|q| filter.matches(q.subject()))
            .cloned()
            .collect();
        self.filter = filter;
        self.restart()
    }

    /// Start the current question set over with no attempts.
    pub fn reset(&mut self) -> QuizPhase {
        self.restart()
    }

    fn restart(&mut self) -> QuizPhase {
        self.current = 0;
        self.selected = None;
        self.results.clear();
        self.phase = if self.questions.is_empty() {
            QuizPhase::NoQuestions
        } else {
            QuizPhase::Answering
        };
        self.phase
    }

    fn answering_question(&self) -> Result<&Question, QuizError> {
        match self.phase {
            QuizPhase::Answering => self
                .questions
                .get(self.current)
                .ok_or(QuizError::NoQuestions),
            QuizPhase::Revealed => Err(QuizError::AlreadyRevealed),
            QuizPhase::NoQuestions => Err(QuizError::NoQuestions),
            QuizPhase::Complete => Err(QuizError::Completed),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("bank_len", &self.bank.len())
            .field("filter", &self.filter)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("results_len", &self.results.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
