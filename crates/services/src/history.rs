use quiz_core::model::{AnalyticsSettings, AttemptRecord};
use quiz_core::{PerformanceSummary, analyze};

/// Every attempt from completed sessions, oldest first.
///
/// Append-only: filter changes and restarts in the active session never
/// touch what has already been handed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyHistory {
    records: Vec<AttemptRecord>,
}

impl StudyHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the attempts of one completed session.
    pub fn append_session(&mut self, attempts: Vec<AttemptRecord>) {
        self.records.extend(attempts);
    }

    #[must_use]
    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn summary(&self, settings: &AnalyticsSettings) -> PerformanceSummary {
        analyze(&self.records, settings)
    }

    /// Pretty-printed JSON array of all attempts.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }
}
