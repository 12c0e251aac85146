use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use quiz_core::model::{
    AnalyticsSettings, AttemptRecord, OptionLetter, Question, SessionScore, SubjectFilter,
    validate_bank,
};
use quiz_core::{Advance, PerformanceSummary, QuizPhase, QuizSession, StudyTimer};

use crate::Clock;
use crate::error::{ExtractionError, StudyError};
use crate::extraction::{ExtractionProgress, QuestionExtractor, SourceDocument};
use crate::history::StudyHistory;

/// How question order is decided when a bank is loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuestionOrder {
    /// Keep the order the source produced.
    #[default]
    AsExtracted,
    /// Shuffle with a thread-local RNG.
    Shuffled,
    /// Shuffle reproducibly.
    Seeded(u64),
}

/// Result of moving past a revealed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyStep {
    Next { index: usize },
    Completed(SessionScore),
}

/// Hosts the active quiz: owns the bank, the session, the study timer and the
/// running attempt history, and feeds completed sessions into analytics.
#[derive(Debug)]
pub struct StudyService {
    clock: Clock,
    settings: AnalyticsSettings,
    order: QuestionOrder,
    session: Option<QuizSession>,
    timer: StudyTimer,
    history: StudyHistory,
}

impl StudyService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            settings: AnalyticsSettings::default(),
            order: QuestionOrder::AsExtracted,
            session: None,
            timer: StudyTimer::new(),
            history: StudyHistory::new(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AnalyticsSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: QuestionOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Run `extractor` over `document` and load the resulting bank.
    ///
    /// Returns the number of questions loaded.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Extraction` for unsupported files, cancellation or
    /// unreadable banks. The current bank and session are kept on error.
    pub async fn import(
        &mut self,
        extractor: &dyn QuestionExtractor,
        document: &SourceDocument,
        on_progress: &(dyn Fn(ExtractionProgress) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<usize, StudyError> {
        if let Err(err) = extractor.check_document(document) {
            warn!(file = %document.file_name, media_type = %document.media_type, "rejected upload");
            return Err(err.into());
        }

        info!(file = %document.file_name, "extracting questions");
        let questions = match extractor.extract(document, on_progress, cancel).await {
            Ok(questions) => questions,
            Err(ExtractionError::Cancelled) => {
                info!(file = %document.file_name, "extraction cancelled");
                return Err(ExtractionError::Cancelled.into());
            }
            Err(err) => {
                warn!(file = %document.file_name, error = %err, "extraction failed");
                return Err(err.into());
            }
        };
        if questions.is_empty() {
            return Err(ExtractionError::NoQuestions {
                file_name: document.file_name.clone(),
            }
            .into());
        }

        let count = questions.len();
        self.load_questions(questions)?;
        info!(file = %document.file_name, count, "question bank loaded");
        Ok(count)
    }

    /// Replace the bank and start a fresh session over all subjects.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Question` if question ids repeat.
    pub fn load_questions(&mut self, mut bank: Vec<Question>) -> Result<QuizPhase, StudyError> {
        validate_bank(&bank)?;
        match self.order {
            QuestionOrder::AsExtracted => {}
            QuestionOrder::Shuffled => bank.shuffle(&mut rand::rng()),
            QuestionOrder::Seeded(seed) => bank.shuffle(&mut StdRng::seed_from_u64(seed)),
        }

        let session = QuizSession::new(bank);
        let phase = session.phase();
        debug!(questions = session.questions().len(), ?phase, "session started");
        self.session = Some(session);
        Ok(phase)
    }

    /// The active session.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NoBank` before any bank was loaded.
    pub fn session(&self) -> Result<&QuizSession, StudyError> {
        self.session.as_ref().ok_or(StudyError::NoBank)
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, StudyError> {
        self.session.as_mut().ok_or(StudyError::NoBank)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Quiz` for illegal selections.
    pub fn select_answer(&mut self, letter: OptionLetter) -> Result<QuizPhase, StudyError> {
        Ok(self.session_mut()?.select_answer(letter)?)
    }

    /// Submit the selected answer, stamping it with the clock and study timer.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`StudyError::is_validation`) when nothing is
    /// selected, or another `StudyError::Quiz` for out-of-phase calls.
    pub fn submit_answer(&mut self) -> Result<AttemptRecord, StudyError> {
        let at = self.clock.now();
        let study_seconds = self.timer.elapsed_seconds();
        let session = self.session_mut()?;
        match session.submit_answer(study_seconds, at) {
            Ok(record) => {
                debug!(
                    question = %record.question_id,
                    correct = record.is_correct,
                    "answer submitted"
                );
                Ok(record.clone())
            }
            Err(err) => {
                if err.is_validation() {
                    warn!(error = %err, "submission rejected");
                }
                Err(err.into())
            }
        }
    }

    /// Move on from a revealed answer. A completed session's attempts are
    /// appended to the history.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Quiz` if the current answer is not revealed.
    pub fn advance(&mut self) -> Result<StudyStep, StudyError> {
        let advance = self.session_mut()?.advance()?;
        match advance {
            Advance::Next { index } => Ok(StudyStep::Next { index }),
            Advance::Completed(attempts) => {
                let score = SessionScore::from_attempts(&attempts);
                self.history.append_session(attempts);
                info!(
                    answered = score.answered,
                    correct = score.correct,
                    percent = score.percent,
                    history = self.history.len(),
                    "quiz completed"
                );
                Ok(StudyStep::Completed(score))
            }
        }
    }

    /// Restrict the session to one subject (or all). Discards in-progress
    /// attempts; the history is unaffected.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NoBank` before any bank was loaded.
    pub fn set_subject_filter(&mut self, filter: SubjectFilter) -> Result<QuizPhase, StudyError> {
        let session = self.session_mut()?;
        let discarded = session.results().len();
        let phase = session.set_subject_filter(filter);
        debug!(discarded, ?phase, "subject filter changed");
        Ok(phase)
    }

    /// Start the session over and zero the study timer.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NoBank` before any bank was loaded.
    pub fn restart(&mut self) -> Result<QuizPhase, StudyError> {
        let phase = self.session_mut()?.reset();
        self.timer.reset();
        Ok(phase)
    }

    /// Advance the study timer by one second if it is running.
    pub fn tick_timer(&mut self) -> u64 {
        self.timer.tick()
    }

    /// Start or pause the study timer; returns whether it is now running.
    pub fn toggle_timer(&mut self) -> bool {
        self.timer.toggle()
    }

    #[must_use]
    pub fn timer(&self) -> &StudyTimer {
        &self.timer
    }

    #[must_use]
    pub fn history(&self) -> &StudyHistory {
        &self.history
    }

    /// Performance summary over every completed session so far.
    #[must_use]
    pub fn analytics(&self) -> PerformanceSummary {
        self.history.summary(&self.settings)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
