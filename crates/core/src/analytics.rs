//! Aggregate performance statistics over past attempts.
//!
//! Everything here is recomputed from the full attempt list on each call; no
//! state is kept between calls.

use serde::Serialize;

use crate::model::{AnalyticsSettings, AttemptRecord, Subject, score_percent};

/// Accuracy for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectStat {
    /// Full subject name, for lookups and detailed labels.
    pub subject: Subject,
    /// Possibly truncated name for compact display.
    pub label: String,
    pub correct: usize,
    pub total: usize,
    pub score: u8,
}

/// One entry of the recent-trend window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentAttempt {
    /// 1-based position within the window.
    pub position: usize,
    pub correct: bool,
    pub subject: Subject,
}

/// Derived summary handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PerformanceSummary {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub overall_score: u8,
    /// Sorted by score, highest first; ties keep first-appearance order.
    pub subject_performance: Vec<SubjectStat>,
    pub recent_performance: Vec<RecentAttempt>,
    pub strengths: Vec<SubjectStat>,
    /// Taken from the same descending list as `strengths`, so the weak
    /// subject closest to the threshold comes first.
    pub weaknesses: Vec<SubjectStat>,
}

impl PerformanceSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions == 0
    }

    #[must_use]
    pub fn best_subject(&self) -> Option<&SubjectStat> {
        self.strengths.first()
    }

    #[must_use]
    pub fn needs_focus(&self) -> Option<&SubjectStat> {
        self.weaknesses.first()
    }

    /// Attempts per subject as `(label, count)`, in `subject_performance` order.
    #[must_use]
    pub fn subject_distribution(&self) -> Vec<(&str, usize)> {
        self.subject_performance
            .iter()
            .map(|stat| (stat.label.as_str(), stat.total))
            .collect()
    }
}

/// Build the performance summary for `records`, oldest first.
#[must_use]
pub fn analyze(records: &[AttemptRecord], settings: &AnalyticsSettings) -> PerformanceSummary {
    if records.is_empty() {
        return PerformanceSummary::default();
    }

    let correct_answers = records.iter().filter(|r| r.is_correct).count();
    let subject_performance = subject_performance(records, settings.label_max_chars());

    let threshold = settings.strength_threshold();
    let strengths = subject_performance
        .iter()
        .filter(|s| s.score >= threshold)
        .take(settings.focus_limit())
        .cloned()
        .collect();
    let weaknesses = subject_performance
        .iter()
        .filter(|s| s.score < threshold)
        .take(settings.focus_limit())
        .cloned()
        .collect();

    PerformanceSummary {
        total_questions: records.len(),
        correct_answers,
        overall_score: score_percent(correct_answers, records.len()),
        subject_performance,
        recent_performance: recent_performance(records, settings.recent_window()),
        strengths,
        weaknesses,
    }
}

fn subject_performance(records: &[AttemptRecord], label_max_chars: usize) -> Vec<SubjectStat> {
    // (subject, correct, total) in order of first appearance
    let mut buckets: Vec<(&Subject, usize, usize)> = Vec::new();
    for record in records {
        let idx = match buckets.iter().position(|(s, _, _)| *s == &record.subject) {
            Some(idx) => idx,
            None => {
                buckets.push((&record.subject, 0, 0));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[idx];
        bucket.2 += 1;
        if record.is_correct {
            bucket.1 += 1;
        }
    }

    let mut stats: Vec<SubjectStat> = buckets
        .into_iter()
        .map(|(subject, correct, total)| SubjectStat {
            subject: subject.clone(),
            label: subject.display_label(label_max_chars),
            correct,
            total,
            score: score_percent(correct, total),
        })
        .collect();
    // sort_by is stable
    stats.sort_by(|a, b| b.score.cmp(&a.score));
    stats
}

fn recent_performance(records: &[AttemptRecord], window: usize) -> Vec<RecentAttempt> {
    let start = records.len().saturating_sub(window);
    records[start..]
        .iter()
        .enumerate()
        .map(|(idx, record)| RecentAttempt {
            position: idx + 1,
            correct: record.is_correct,
            subject: record.subject.clone(),
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalyticsSettingsDraft, OptionLetter, QuestionId};
    use crate::time::fixed_now;

    fn rec(id: u64, subject: &str, correct: bool) -> AttemptRecord {
        let a = OptionLetter::parse("A").unwrap();
        let b = OptionLetter::parse("B").unwrap();
        AttemptRecord {
            question_id: QuestionId::new(id),
            question_text: format!("{id}. Question"),
            selected_answer: if correct { a } else { b },
            correct_answer: a,
            is_correct: correct,
            subject: Subject::new(subject).unwrap(),
            timestamp: fixed_now(),
            study_time_seconds: id,
        }
    }

    fn graded(subject: &str, correct: usize, total: usize) -> Vec<AttemptRecord> {
        (0..total)
            .map(|i| rec(i as u64, subject, i < correct))
            .collect()
    }

    fn names(stats: &[SubjectStat]) -> Vec<&str> {
        stats.iter().map(|s| s.subject.as_str()).collect()
    }

    #[test]
    fn empty_history_is_all_zero() {
        let summary = analyze(&[], &AnalyticsSettings::default());
        assert!(summary.is_empty());
        assert_eq!(summary.overall_score, 0);
        assert_eq!(summary.correct_answers, 0);
        assert!(summary.subject_performance.is_empty());
        assert!(summary.recent_performance.is_empty());
        assert!(summary.strengths.is_empty());
        assert!(summary.weaknesses.is_empty());
        assert!(summary.best_subject().is_none());
        assert!(summary.needs_focus().is_none());
    }

    #[test]
    fn two_of_three_scores_67() {
        let records = vec![
            rec(1, "Ethics", true),
            rec(2, "Ethics", true),
            rec(3, "Derivatives", false),
        ];
        let summary = analyze(&records, &AnalyticsSettings::default());
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.overall_score, 67);
    }

    #[test]
    fn strengths_and_weaknesses_split_on_threshold() {
        let mut records = graded("Ethics", 4, 5);
        records.extend(graded("Derivatives", 1, 5));
        let summary = analyze(&records, &AnalyticsSettings::default());

        assert_eq!(summary.strengths.len(), 1);
        assert_eq!(summary.strengths[0].subject.as_str(), "Ethics");
        assert_eq!(summary.strengths[0].score, 80);
        assert_eq!(summary.weaknesses.len(), 1);
        assert_eq!(summary.weaknesses[0].subject.as_str(), "Derivatives");
        assert_eq!(summary.weaknesses[0].score, 20);
        assert_eq!(summary.best_subject().unwrap().score, 80);
        assert_eq!(summary.needs_focus().unwrap().score, 20);
    }

    #[test]
    fn subject_buckets_partition_records() {
        let mut records = graded("Ethics", 2, 3);
        records.extend(graded("Fixed Income", 1, 4));
        records.push(rec(99, "Ethics", true));
        let summary = analyze(&records, &AnalyticsSettings::default());

        let total: usize = summary.subject_performance.iter().map(|s| s.total).sum();
        assert_eq!(total, records.len());
        let ethics = &summary.subject_performance[0];
        assert_eq!((ethics.correct, ethics.total, ethics.score), (3, 4, 75));
        assert_eq!(
            summary.subject_distribution(),
            vec![("Ethics", 4), ("Fixed Income", 4)]
        );
    }

    #[test]
    fn equal_scores_keep_first_appearance_order() {
        let records = vec![
            rec(1, "Quantitative Methods", true),
            rec(2, "Derivatives", false),
            rec(3, "Corporate Issuers", true),
            rec(4, "Equity Investments", false),
        ];
        let summary = analyze(&records, &AnalyticsSettings::default());
        assert_eq!(
            names(&summary.subject_performance),
            vec![
                "Quantitative Methods",
                "Corporate Issuers",
                "Derivatives",
                "Equity Investments"
            ]
        );
    }

    #[test]
    fn lists_are_capped_and_disjoint() {
        let mut records = Vec::new();
        for (i, subject) in ["S1", "S2", "S3", "S4", "W1", "W2", "W3", "W4"]
            .iter()
            .enumerate()
        {
            let (correct, total) = if i < 4 { (4, 4) } else { (i - 4, 5) };
            records.extend(graded(subject, correct, total));
        }
        let summary = analyze(&records, &AnalyticsSettings::default());

        assert_eq!(names(&summary.strengths), vec!["S1", "S2", "S3"]);
        assert!(summary.strengths.iter().all(|s| s.score >= 70));
        // descending order surfaces the weak subject closest to the threshold
        assert_eq!(names(&summary.weaknesses), vec!["W4", "W3", "W2"]);
        assert!(summary.weaknesses.iter().all(|s| s.score < 70));
        assert!(
            summary
                .strengths
                .iter()
                .all(|s| !summary.weaknesses.contains(s))
        );

        let scores: Vec<u8> = summary.subject_performance.iter().map(|s| s.score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn recent_window_keeps_chronological_tail() {
        let records: Vec<_> = (1..=13).map(|i| rec(i, "Ethics", i % 2 == 0)).collect();
        let summary = analyze(&records, &AnalyticsSettings::default());

        assert_eq!(summary.recent_performance.len(), 10);
        assert_eq!(summary.recent_performance[0].position, 1);
        // window starts at record 4
        assert!(summary.recent_performance[0].correct);
        assert!(!summary.recent_performance[1].correct);
        assert_eq!(summary.recent_performance[9].position, 10);

        let short = analyze(&records[..4], &AnalyticsSettings::default());
        assert_eq!(short.recent_performance.len(), 4);
    }

    #[test]
    fn long_subject_names_get_short_labels() {
        let records = graded("Ethical and Professional Standards", 1, 1);
        let summary = analyze(&records, &AnalyticsSettings::default());
        let stat = &summary.subject_performance[0];
        assert_eq!(stat.label, "Ethical and Professi...");
        assert_eq!(stat.subject.as_str(), "Ethical and Professional Standards");
    }

    #[test]
    fn custom_settings_drive_split_caps_window_and_labels() {
        let settings = AnalyticsSettingsDraft {
            strength_threshold: Some(50),
            focus_limit: Some(1),
            recent_window: Some(2),
            label_max_chars: Some(3),
        }
        .validate()
        .unwrap();

        let mut records = graded("Ethics", 1, 1);
        records.extend(graded("Fixed Income", 1, 2));
        records.extend(graded("Derivatives", 0, 1));
        records.extend(graded("Economics", 0, 1));
        let summary = analyze(&records, &settings);

        assert_eq!(
            names(&summary.subject_performance),
            vec!["Ethics", "Fixed Income", "Derivatives", "Economics"]
        );
        // Fixed Income sits exactly on the lowered threshold
        assert_eq!(summary.subject_performance[1].score, 50);
        assert_eq!(names(&summary.strengths), vec!["Ethics"]);
        assert_eq!(names(&summary.weaknesses), vec!["Derivatives"]);

        let recent: Vec<&str> = summary
            .recent_performance
            .iter()
            .map(|r| r.subject.as_str())
            .collect();
        assert_eq!(recent, vec!["Derivatives", "Economics"]);
        assert_eq!(summary.recent_performance[1].position, 2);

        let labels: Vec<&str> = summary
            .subject_performance
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Eth...", "Fix...", "Der...", "Eco..."]);

        let defaults = analyze(&records, &AnalyticsSettings::default());
        assert_eq!(
            names(&defaults.weaknesses),
            vec!["Fixed Income", "Derivatives", "Economics"]
        );
    }

    #[test]
    fn analysis_is_idempotent() {
        let mut records = graded("Ethics", 3, 7);
        records.extend(graded("Derivatives", 5, 6));
        let settings = AnalyticsSettings::default();
        assert_eq!(analyze(&records, &settings), analyze(&records, &settings));
    }

    #[test]
    fn overall_score_stays_in_bounds() {
        for total in 1..=25 {
            for correct in 0..=total {
                let records = graded("Ethics", correct, total);
                let summary = analyze(&records, &AnalyticsSettings::default());
                let expected = (100.0 * correct as f64 / total as f64).round() as u8;
                assert_eq!(summary.overall_score, expected);
                assert!(summary.overall_score <= 100);
            }
        }
    }
}
