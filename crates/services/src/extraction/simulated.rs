use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use quiz_core::model::{Question, QuestionDraft};

use super::{ExtractionProgress, PDF_MEDIA_TYPE, QuestionExtractor, SourceDocument};
use crate::error::ExtractionError;

const DEFAULT_TICKS: usize = 100;
const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(50);
/// A template question is found every this many ticks.
const TICKS_PER_FIND: usize = 10;
/// Questions appended after the progress loop.
const BULK_QUESTIONS: usize = 25;

const SUBJECTS: [&str; 8] = [
    "Ethical and Professional Standards",
    "Quantitative Methods",
    "Portfolio Management",
    "Alternative Investments",
    "Equity Investments",
    "Corporate Issuers",
    "Derivatives",
    "Fixed Income",
];

struct Template {
    text: &'static str,
    options: [&'static str; 3],
    answer: &'static str,
}

const TEMPLATES: [Template; 3] = [
    Template {
        text: "Which of the following statements about the CFA Institute Code of Ethics is most accurate?",
        options: [
            "A. Members must comply with applicable laws and regulations",
            "B. Members should strive to maintain professional competence",
            "C. Both A and B are correct",
        ],
        answer: "C",
    },
    Template {
        text: "The primary objective of the Global Investment Performance Standards (GIPS) is to:",
        options: [
            "A. Ensure fair representation of investment performance",
            "B. Standardize performance calculation methods",
            "C. Promote investor confidence in performance presentations",
        ],
        answer: "A",
    },
    Template {
        text: "In portfolio management, which of the following best describes diversification?",
        options: [
            "A. Investing in different asset classes",
            "B. Reducing portfolio risk without sacrificing expected returns",
            "C. Spreading investments across various securities",
        ],
        answer: "B",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionSettings {
    /// Number of progress steps.
    pub ticks: usize,
    /// Wait before each step.
    pub tick_delay: Duration,
}

impl ExtractionSettings {
    /// Read `CFA_QUIZ_EXTRACT_TICKS` and `CFA_QUIZ_EXTRACT_TICK_MS`, falling back
    /// to defaults for missing or unparsable values and for zero ticks.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let ticks = lookup("CFA_QUIZ_EXTRACT_TICKS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(defaults.ticks);
        let tick_delay = lookup("CFA_QUIZ_EXTRACT_TICK_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.tick_delay, Duration::from_millis);
        Self { ticks, tick_delay }
    }

    /// No waiting between steps.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            tick_delay: Duration::ZERO,
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            tick_delay: DEFAULT_TICK_DELAY,
        }
    }
}

/// Stand-in for PDF parsing: walks a timed progress sequence and yields a
/// fixed bank of sample CFA questions.
#[derive(Clone, Debug, Default)]
pub struct SimulatedPdfExtractor {
    settings: ExtractionSettings,
}

impl SimulatedPdfExtractor {
    #[must_use]
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }
}

fn sample_question(
    id: usize,
    template: &Template,
    subject: &str,
) -> Result<Question, ExtractionError> {
    QuestionDraft {
        id: id as u64,
        text: format!("{id}. {}", template.text),
        options: template.options.iter().map(|o| (*o).to_string()).collect(),
        answer: template.answer.to_string(),
        subject: subject.to_string(),
    }
    .validate()
    .map_err(|source| ExtractionError::Question {
        index: id - 1,
        source,
    })
}

#[async_trait]
impl QuestionExtractor for SimulatedPdfExtractor {
    fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }

    async fn extract(
        &self,
        document: &SourceDocument,
        on_progress: &(dyn Fn(ExtractionProgress) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<Vec<Question>, ExtractionError> {
        self.check_document(document)?;
        let ticks = self.settings.ticks;
        let mut questions = Vec::with_capacity(TEMPLATES.len() + BULK_QUESTIONS);

        for tick in 0..ticks {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(tick, file = %document.file_name, "extraction cancelled");
                    return Err(ExtractionError::Cancelled);
                }
                () = tokio::time::sleep(self.settings.tick_delay) => {}
            }

            if tick > 0 && tick % TICKS_PER_FIND == 0 {
                let idx = tick / TICKS_PER_FIND - 1;
                if let Some(template) = TEMPLATES.get(idx) {
                    let id = idx + 1;
                    let subject = SUBJECTS[idx % SUBJECTS.len()];
                    questions.push(sample_question(id, template, subject)?);
                }
            }
            on_progress(ExtractionProgress::of(tick + 1, ticks, questions.len()));
        }

        for i in 0..BULK_QUESTIONS {
            let template = &TEMPLATES[i % TEMPLATES.len()];
            let id = i + TEMPLATES.len() + 1;
            questions.push(sample_question(id, template, SUBJECTS[i % SUBJECTS.len()])?);
        }

        on_progress(ExtractionProgress {
            percent: 100,
            extracted: questions.len(),
        });
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    async fn run(
        settings: ExtractionSettings,
        document: SourceDocument,
        cancel: CancellationToken,
    ) -> (Result<Vec<Question>, ExtractionError>, Vec<ExtractionProgress>) {
        let seen = Mutex::new(Vec::new());
        let result = SimulatedPdfExtractor::new(settings)
            .extract(&document, &|p: ExtractionProgress| seen.lock().unwrap().push(p), &cancel)
            .await;
        (result, seen.into_inner().unwrap())
    }

    fn settings_from(vars: &[(&str, &str)]) -> ExtractionSettings {
        ExtractionSettings::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
    }

    #[test]
    fn env_overrides_fall_back_to_defaults() {
        assert_eq!(settings_from(&[]), ExtractionSettings::default());

        let tuned = settings_from(&[
            ("CFA_QUIZ_EXTRACT_TICKS", " 20 "),
            ("CFA_QUIZ_EXTRACT_TICK_MS", "0"),
        ]);
        assert_eq!(tuned.ticks, 20);
        assert_eq!(tuned.tick_delay, Duration::ZERO);

        let junk = settings_from(&[
            ("CFA_QUIZ_EXTRACT_TICKS", "0"),
            ("CFA_QUIZ_EXTRACT_TICK_MS", "fast"),
        ]);
        assert_eq!(junk, ExtractionSettings::default());

        let negative = settings_from(&[
            ("CFA_QUIZ_EXTRACT_TICKS", "-5"),
            ("CFA_QUIZ_EXTRACT_TICK_MS", "-1"),
        ]);
        assert_eq!(negative, ExtractionSettings::default());
    }

    #[tokio::test]
    async fn yields_the_sample_bank_with_progress() {
        let (result, seen) = run(
            ExtractionSettings::instant(),
            SourceDocument::pdf("bank.pdf", Vec::new()),
            CancellationToken::new(),
        )
        .await;
        let questions = result.unwrap();

        assert_eq!(questions.len(), 28);
        let ids: Vec<u64> = questions.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, (1..=28).collect::<Vec<_>>());
        assert!(questions[0].text().starts_with("1. Which of the following"));
        assert_eq!(questions[0].subject().as_str(), SUBJECTS[0]);
        assert_eq!(questions[3].subject().as_str(), SUBJECTS[0]);
        assert_eq!(questions[4].subject().as_str(), SUBJECTS[1]);

        assert_eq!(seen.len(), 101);
        assert_eq!(seen[0].percent, 1);
        assert_eq!(seen[10].extracted, 1);
        assert_eq!(seen[99], ExtractionProgress { percent: 100, extracted: 3 });
        assert_eq!(seen.last().unwrap().extracted, 28);
        assert!(seen.windows(2).all(|w| w[0].percent <= w[1].percent));
    }

    #[tokio::test]
    async fn cancelled_token_stops_extraction() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (result, seen) = run(
            ExtractionSettings::default(),
            SourceDocument::pdf("bank.pdf", Vec::new()),
            cancel,
        )
        .await;
        assert!(matches!(result, Err(ExtractionError::Cancelled)));
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn rejects_non_pdf_documents() {
        let (result, _) = run(
            ExtractionSettings::instant(),
            SourceDocument::new("notes.txt", "text/plain", Vec::new()),
            CancellationToken::new(),
        )
        .await;
        assert!(matches!(
            result,
            Err(ExtractionError::UnsupportedFileType { expected: PDF_MEDIA_TYPE, .. })
        ));
    }
}
