#![forbid(unsafe_code)]

pub mod error;
pub mod extraction;
pub mod history;
pub mod study_service;

pub use quiz_core::Clock;

pub use error::{ExtractionError, StudyError};
pub use extraction::{
    ExtractionProgress, ExtractionSettings, JsonQuestionBankExtractor, QuestionExtractor,
    SimulatedPdfExtractor, SourceDocument,
};
pub use history::StudyHistory;
pub use study_service::{QuestionOrder, StudyService, StudyStep};
