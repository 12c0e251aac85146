use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::subject::{Subject, SubjectError};

//
// ─── OPTION LETTER ─────────────────────────────────────────────────────────────
//

/// Letter label of a multiple-choice option (`A`, `B`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionLetter(char);

impl OptionLetter {
    /// Parse a bare letter such as `"b"` or `" C "`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        let first = chars.next()?;
        if chars.next().is_some() || !first.is_ascii_alphabetic() {
            return None;
        }
        Some(Self(first.to_ascii_uppercase()))
    }

    /// Extract the label of an option text like `"A. Ensure fair representation"`.
    #[must_use]
    pub fn from_option_label(option: &str) -> Option<Self> {
        let (label, _) = option.split_once('.')?;
        Self::parse(label)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Debug for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionLetter({})", self.0)
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OptionLetter {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(QuestionError::InvalidAnswer(value))
    }
}

impl From<OptionLetter> for String {
    fn from(value: OptionLetter) -> Self {
        value.0.to_string()
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question as handed over by a question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: u64,
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    pub subject: String,
}

impl QuestionDraft {
    /// Check the question source contract and build an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, options are missing or
    /// unlabeled, labels repeat, or the answer does not name exactly one option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for (idx, option) in self.options.iter().enumerate() {
            let letter = OptionLetter::from_option_label(option)
                .ok_or(QuestionError::UnlabeledOption(idx))?;
            if !seen.insert(letter) {
                return Err(QuestionError::DuplicateOption(letter));
            }
        }

        let answer =
            OptionLetter::parse(&self.answer).ok_or(QuestionError::InvalidAnswer(self.answer))?;
        if !seen.contains(&answer) {
            return Err(QuestionError::AnswerNotAnOption(answer));
        }

        Ok(Question {
            id: QuestionId::new(self.id),
            text,
            options: self.options,
            answer,
            subject: Subject::new(self.subject)?,
        })
    }
}

/// A multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    answer: OptionLetter,
    subject: Subject,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> OptionLetter {
        self.answer
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Letters of all options, in display order.
    pub fn option_letters(&self) -> impl Iterator<Item = OptionLetter> + '_ {
        self.options
            .iter()
            .filter_map(|option| OptionLetter::from_option_label(option))
    }

    #[must_use]
    pub fn has_option(&self, letter: OptionLetter) -> bool {
        self.option_letters().any(|l| l == letter)
    }

    #[must_use]
    pub fn is_correct(&self, letter: OptionLetter) -> bool {
        self.answer == letter
    }
}

/// Checks bank-wide constraints that single questions cannot see.
///
/// # Errors
///
/// Returns `QuestionError::DuplicateId` for the first repeated id.
pub fn validate_bank(questions: &[Question]) -> Result<(), QuestionError> {
    let mut ids = HashSet::with_capacity(questions.len());
    for question in questions {
        if !ids.insert(question.id()) {
            return Err(QuestionError::DuplicateId(question.id()));
        }
    }
    Ok(())
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no options")]
    NoOptions,

    #[error("option {0} has no letter label")]
    UnlabeledOption(usize),

    #[error("option letter {0} appears more than once")]
    DuplicateOption(OptionLetter),

    #[error("answer is not a single letter: {0:?}")]
    InvalidAnswer(String),

    #[error("answer {0} does not match any option")]
    AnswerNotAnOption(OptionLetter),

    #[error("question id {0} appears more than once in the bank")]
    DuplicateId(QuestionId),

    #[error(transparent)]
    Subject(#[from] SubjectError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
