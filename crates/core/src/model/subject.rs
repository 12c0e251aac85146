use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validated subject name (trimmed, non-empty), e.g. "Fixed Income".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// Create a validated subject name.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SubjectError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label for charts and badges.
    ///
    /// Names longer than `max_chars` characters are cut to `max_chars` and
    /// suffixed with `...`; shorter names are returned unchanged.
    #[must_use]
    pub fn display_label(&self, max_chars: usize) -> String {
        if self.0.chars().count() > max_chars {
            let head: String = self.0.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Subject {
    type Error = SubjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.0
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject name cannot be empty")]
    EmptyName,
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Which part of the bank a quiz session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubjectFilter {
    #[default]
    All,
    Only(Subject),
}

impl SubjectFilter {
    /// Parse a filter value where `all` (any case) selects every subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyName` for blank input.
    pub fn parse(value: &str) -> Result<Self, SubjectError> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Subject::new(value).map(Self::Only)
    }

    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::Only(only) => only == subject,
        }
    }
}
