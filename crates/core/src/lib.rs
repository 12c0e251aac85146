#![forbid(unsafe_code)]

pub mod analytics;
pub mod error;
pub mod model;
pub mod quiz;
pub mod time;
pub mod timer;

pub use analytics::{PerformanceSummary, RecentAttempt, SubjectStat, analyze};
pub use error::Error;
pub use quiz::{Advance, QuizError, QuizPhase, QuizProgress, QuizSession};
pub use time::Clock;
pub use timer::{StudyTimer, format_elapsed};
