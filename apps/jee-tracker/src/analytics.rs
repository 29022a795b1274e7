//! Mock-test analytics.

use crate::models::{ExamType, MockTest, Priority, Subject};
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of weak topics surfaced.
pub const WEAK_TOPIC_LIMIT: usize = 5;

/// Tests of one exam type, newest first.
pub fn tests_for_exam(tests: &[MockTest], exam: ExamType) -> Vec<&MockTest> {
    let mut filtered: Vec<&MockTest> = tests.iter().filter(|t| t.exam == exam).collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// Most recent test of any exam type.
pub fn latest_test(tests: &[MockTest]) -> Option<&MockTest> {
    tests.iter().max_by_key(|t| t.date)
}

/// Mean score percentage, rounded.
pub fn average_score(tests: &[&MockTest]) -> u32 {
    if tests.is_empty() {
        return 0;
    }
    let total: f64 = tests.iter().map(|t| t.percentage()).sum();
    (total / tests.len() as f64).round() as u32
}

/// Highest rounded score percentage.
pub fn best_score(tests: &[&MockTest]) -> u32 {
    tests
        .iter()
        .map(|t| t.percentage().round() as u32)
        .max()
        .unwrap_or(0)
}

/// Mean minutes spent, rounded.
pub fn average_time(tests: &[&MockTest]) -> u32 {
    if tests.is_empty() {
        return 0;
    }
    let total: u32 = tests.iter().map(|t| t.time_spent).sum();
    (total as f64 / tests.len() as f64).round() as u32
}

/// Direction of the latest score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Absolute percentage-point change.
    pub change: f64,
}

/// Compare the two newest tests. Expects `tests` newest first.
pub fn trend(tests: &[&MockTest]) -> Trend {
    let (Some(latest), Some(previous)) = (tests.first(), tests.get(1)) else {
        return Trend {
            direction: TrendDirection::Stable,
            change: 0.0,
        };
    };

    let diff = latest.percentage() - previous.percentage();
    let direction = if diff > 0.0 {
        TrendDirection::Up
    } else if diff < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Trend {
        direction,
        change: diff.abs(),
    }
}

/// Most frequently reported weak topics with their counts.
pub fn weak_topic_frequency(tests: &[&MockTest]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for topic in tests.iter().flat_map(|t| t.weak_topics.iter()) {
        match counts.iter_mut().find(|(name, _)| name == topic) {
            Some((_, count)) => *count += 1,
            None => counts.push((topic.clone(), 1)),
        }
    }
    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(WEAK_TOPIC_LIMIT);
    counts
}

/// History of one weak topic across tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeakTopicDetail {
    pub topic: String,
    pub appearances: usize,
    /// Date of the newest test that reported it.
    pub last_seen: NaiveDate,
    /// Exam types it was reported in, first-seen order.
    pub exam_types: Vec<ExamType>,
    /// High at 3+ appearances, medium at 2, low otherwise.
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeakTopicReport {
    pub high_priority: usize,
    /// Most frequent first; ties keep first-seen order.
    pub topics: Vec<WeakTopicDetail>,
}

fn weak_priority(appearances: usize) -> Priority {
    match appearances {
        n if n >= 3 => Priority::High,
        2 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Every weak topic with how often, how recently and in which exams it came up.
pub fn weak_topic_details<'a>(tests: impl IntoIterator<Item = &'a MockTest>) -> WeakTopicReport {
    let mut topics: Vec<WeakTopicDetail> = Vec::new();
    for test in tests {
        for topic in &test.weak_topics {
            match topics.iter_mut().find(|d| &d.topic == topic) {
                Some(detail) => {
                    detail.appearances += 1;
                    detail.last_seen = detail.last_seen.max(test.date);
                    if !detail.exam_types.contains(&test.exam) {
                        detail.exam_types.push(test.exam);
                    }
                }
                None => topics.push(WeakTopicDetail {
                    topic: topic.clone(),
                    appearances: 1,
                    last_seen: test.date,
                    exam_types: vec![test.exam],
                    priority: Priority::Low,
                }),
            }
        }
    }
    for detail in &mut topics {
        detail.priority = weak_priority(detail.appearances);
    }
    topics.sort_by(|a, b| b.appearances.cmp(&a.appearances));

    WeakTopicReport {
        high_priority: topics.iter().filter(|d| d.priority == Priority::High).count(),
        topics,
    }
}

/// Accuracy summary for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectAccuracy {
    pub subject: Subject,
    pub average: u32,
    pub best: f64,
}

/// Per-subject accuracy across tests. Empty when there are no tests.
pub fn subject_breakdown(tests: &[&MockTest]) -> Vec<SubjectAccuracy> {
    if tests.is_empty() {
        return Vec::new();
    }

    Subject::ALL
        .iter()
        .map(|&subject| {
            let scores: Vec<f64> = tests.iter().map(|t| t.subject(subject).accuracy).collect();
            let sum: f64 = scores.iter().sum();
            SubjectAccuracy {
                subject,
                average: (sum / scores.len() as f64).round() as u32,
                best: scores.iter().copied().fold(f64::MIN, f64::max),
            }
        })
        .collect()
}

/// Everything the analytics view shows for one exam type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamReport {
    pub exam: ExamType,
    pub tests_taken: usize,
    pub average_score: u32,
    pub best_score: u32,
    pub average_time: u32,
    pub trend: Trend,
    pub weak_topics: Vec<(String, usize)>,
    pub subjects: Vec<SubjectAccuracy>,
}

impl ExamReport {
    pub fn build(tests: &[MockTest], exam: ExamType) -> Self {
        let filtered = tests_for_exam(tests, exam);
        Self {
            exam,
            tests_taken: filtered.len(),
            average_score: average_score(&filtered),
            best_score: best_score(&filtered),
            average_time: average_time(&filtered),
            trend: trend(&filtered),
            weak_topics: weak_topic_frequency(&filtered),
            subjects: subject_breakdown(&filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;
    use crate::models::SubjectScore;

    fn mock(id: &str, day: u32, score: u32, weak: &[&str]) -> MockTest {
        let s = |acc: f64| SubjectScore {
            score: 0,
            total: 100,
            accuracy: acc,
        };
        MockTest {
            id: id.into(),
            exam: ExamType::Mains,
            date: NaiveDate::from_ymd_opt(2024, 11, day).unwrap(),
            score,
            total_marks: 300,
            accuracy: 0.0,
            time_spent: 170 + day,
            physics: s(score as f64 / 3.0),
            chemistry: s(60.0),
            mathematics: s(70.0 + day as f64),
            weak_topics: weak.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn test_sample_mains_report() {
        let data = Dataset::sample();
        let report = ExamReport::build(&data.tests, ExamType::Mains);

        assert_eq!(report.tests_taken, 1);
        assert_eq!(report.average_score, 82);
        assert_eq!(report.best_score, 82);
        assert_eq!(report.average_time, 180);
        assert_eq!(report.trend.direction, TrendDirection::Stable);
        assert_eq!(report.weak_topics.len(), 3);
        assert_eq!(report.subjects[0].average, 85);
    }

    #[test]
    fn test_sample_advanced_report() {
        let data = Dataset::sample();
        let report = ExamReport::build(&data.tests, ExamType::Advanced);
        assert_eq!(report.average_score, 53);
        assert_eq!(report.subjects[2].best, 49.0);
    }

    #[test]
    fn test_empty_report() {
        let report = ExamReport::build(&[], ExamType::Mains);
        assert_eq!(report.tests_taken, 0);
        assert_eq!(report.average_score, 0);
        assert_eq!(report.best_score, 0);
        assert_eq!(report.average_time, 0);
        assert!(report.subjects.is_empty());
        assert!(report.weak_topics.is_empty());
    }

    #[test]
    fn test_trend_uses_newest_tests() {
        // Out of order on purpose.
        let tests = vec![mock("a", 1, 150, &[]), mock("c", 20, 240, &[]), mock("b", 10, 210, &[])];
        let filtered = tests_for_exam(&tests, ExamType::Mains);
        assert_eq!(filtered[0].id, "c");

        let t = trend(&filtered);
        assert_eq!(t.direction, TrendDirection::Up);
        assert!((t.change - 10.0).abs() < 1e-9);

        let tests = vec![mock("a", 1, 240, &[]), mock("b", 2, 180, &[])];
        let filtered = tests_for_exam(&tests, ExamType::Mains);
        assert_eq!(trend(&filtered).direction, TrendDirection::Down);
    }

    #[test]
    fn test_weak_topic_frequency_orders_by_count() {
        let tests = vec![
            mock("a", 1, 200, &["Optics", "Algebra", "Calculus"]),
            mock("b", 2, 200, &["Algebra", "Waves", "Solutions"]),
            mock("c", 3, 200, &["Algebra", "Calculus", "Hydrocarbons"]),
        ];
        let filtered = tests_for_exam(&tests, ExamType::Mains);
        let weak = weak_topic_frequency(&filtered);

        assert_eq!(weak.len(), WEAK_TOPIC_LIMIT);
        assert_eq!(weak[0], ("Algebra".to_string(), 3));
        assert_eq!(weak[1], ("Calculus".to_string(), 2));
        assert!(weak[2..].iter().all(|(_, count)| *count == 1));
    }

    #[test]
    fn test_subject_breakdown_best_and_average() {
        let tests = vec![mock("a", 1, 150, &[]), mock("b", 3, 210, &[])];
        let filtered = tests_for_exam(&tests, ExamType::Mains);
        let breakdown = subject_breakdown(&filtered);

        let maths = breakdown
            .iter()
            .find(|s| s.subject == Subject::Mathematics)
            .unwrap();
        assert_eq!(maths.average, 72);
        assert_eq!(maths.best, 73.0);
    }

    #[test]
    fn test_weak_topic_details() {
        let mut advanced = mock("d", 25, 200, &["Optics"]);
        advanced.exam = ExamType::Advanced;
        let tests = vec![
            mock("a", 12, 200, &["Optics", "Algebra"]),
            mock("b", 20, 200, &["Algebra", "Optics"]),
            advanced,
            mock("c", 5, 200, &["Algebra", "Waves"]),
        ];
        let report = weak_topic_details(&tests);

        assert_eq!(report.topics.len(), 3);
        assert_eq!(report.high_priority, 2);

        let optics = &report.topics[0];
        assert_eq!(optics.topic, "Optics");
        assert_eq!(optics.appearances, 3);
        assert_eq!(optics.last_seen, NaiveDate::from_ymd_opt(2024, 11, 25).unwrap());
        assert_eq!(optics.exam_types, vec![ExamType::Mains, ExamType::Advanced]);
        assert_eq!(optics.priority, Priority::High);

        // Last seen is the newest date even when tests arrive out of order.
        let algebra = &report.topics[1];
        assert_eq!(algebra.last_seen, NaiveDate::from_ymd_opt(2024, 11, 20).unwrap());
        assert_eq!(algebra.exam_types, vec![ExamType::Mains]);

        assert_eq!(report.topics[2].priority, Priority::Low);
        assert_eq!(weak_topic_details(&[] as &[MockTest]), WeakTopicReport::default());
    }

    #[test]
    fn test_weak_topic_priority_thresholds() {
        assert_eq!(weak_priority(1), Priority::Low);
        assert_eq!(weak_priority(2), Priority::Medium);
        assert_eq!(weak_priority(3), Priority::High);
        assert_eq!(weak_priority(7), Priority::High);
    }

    #[test]
    fn test_latest_test() {
        let data = Dataset::sample();
        assert_eq!(latest_test(&data.tests).map(|t| t.id.as_str()), Some("test1"));
        assert!(latest_test(&[]).is_none());
    }
}
