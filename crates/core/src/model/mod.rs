mod attempt;
mod ids;
mod question;
mod score;
mod settings;
mod subject;

pub use ids::{ParseIdError, QuestionId};

pub use attempt::AttemptRecord;
pub use question::{OptionLetter, Question, QuestionDraft, QuestionError, validate_bank};
pub use score::{SessionScore, score_percent};
pub use settings::{AnalyticsSettings, AnalyticsSettingsDraft, AnalyticsSettingsError};
pub use subject::{Subject, SubjectError, SubjectFilter};
