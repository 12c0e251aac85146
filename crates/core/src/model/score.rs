use serde::Serialize;

use crate::model::AttemptRecord;

/// Percentage of `correct` over `total`, rounded half up.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn score_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u128;
    let total = total as u128;
    // round(100 * c / t) without floats: floor((200c + t) / 2t)
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Running tally for one quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionScore {
    pub correct: usize,
    pub incorrect: usize,
    pub answered: usize,
    pub percent: u8,
}

impl SessionScore {
    #[must_use]
    pub fn from_attempts(attempts: &[AttemptRecord]) -> Self {
        let correct = attempts.iter().filter(|a| a.is_correct).count();
        let answered = attempts.len();
        Self {
            correct,
            incorrect: answered - correct,
            answered,
            percent: score_percent(correct, answered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_scores_zero() {
        assert_eq!(score_percent(0, 0), 0);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(1, 8), 13);
        assert_eq!(score_percent(1, 200), 1);
        assert_eq!(score_percent(5, 5), 100);
        assert_eq!(score_percent(0, 4), 0);
    }

    #[test]
    fn empty_session_score() {
        let score = SessionScore::from_attempts(&[]);
        assert_eq!(score, SessionScore::default());
    }
}
