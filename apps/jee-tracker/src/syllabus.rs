//! Syllabus progress aggregation and topic filtering.

use crate::models::{ExamType, Subject, SubjectSyllabus, Syllabus, Topic, TopicStatus};
use serde::Serialize;

/// Rounded percentage of `part` in `whole`, 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u8
}

/// Progress counters for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectProgress {
    pub subject: Option<Subject>,
    pub total: usize,
    pub mastered: usize,
    pub in_progress: usize,
    pub revise_soon: usize,
    pub weak: usize,
    pub not_started: usize,
    pub high_yield: usize,
    /// Mastered share, rounded percent.
    pub percent: u8,
}

impl SubjectProgress {
    pub fn count(&self, status: TopicStatus) -> usize {
        match status {
            TopicStatus::Mastered => self.mastered,
            TopicStatus::InProgress => self.in_progress,
            TopicStatus::ReviseSoon => self.revise_soon,
            TopicStatus::Weak => self.weak,
            TopicStatus::NotStarted => self.not_started,
        }
    }
}

/// Count statuses over a set of topics.
pub fn topic_progress<'a>(topics: impl IntoIterator<Item = &'a Topic>) -> SubjectProgress {
    let mut progress = SubjectProgress::default();
    for topic in topics {
        progress.total += 1;
        if topic.high_yield {
            progress.high_yield += 1;
        }
        match topic.status {
            TopicStatus::Mastered => progress.mastered += 1,
            TopicStatus::InProgress => progress.in_progress += 1,
            TopicStatus::ReviseSoon => progress.revise_soon += 1,
            TopicStatus::Weak => progress.weak += 1,
            TopicStatus::NotStarted => progress.not_started += 1,
        }
    }
    progress.percent = percent(progress.mastered, progress.total);
    progress
}

pub fn subject_progress(section: &SubjectSyllabus) -> SubjectProgress {
    SubjectProgress {
        subject: Some(section.subject),
        ..topic_progress(&section.topics)
    }
}

/// Per-subject progress for one exam tier.
pub fn exam_progress(syllabus: &Syllabus, exam: ExamType) -> Vec<SubjectProgress> {
    syllabus.for_exam(exam).iter().map(subject_progress).collect()
}

/// Mastered share across both tiers.
pub fn overall_progress(syllabus: &Syllabus) -> SubjectProgress {
    topic_progress(syllabus.all_topics())
}

/// Search and status filter for the syllabus view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    pub search: String,
    /// `None` shows every status.
    pub status: Option<TopicStatus>,
}

impl TopicFilter {
    pub fn matches(&self, topic: &Topic) -> bool {
        if let Some(status) = self.status {
            if topic.status != status {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        topic.topic.to_lowercase().contains(&needle)
            || topic
                .subtopics
                .iter()
                .any(|s| s.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, topics: &'a [Topic]) -> Vec<&'a Topic> {
        topics.iter().filter(|t| self.matches(t)).collect()
    }

    /// Step the status filter: all, then each status, then back to all.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TopicStatus::ALL[0]),
            Some(current) => TopicStatus::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|i| TopicStatus::ALL.get(i + 1))
                .copied(),
        };
    }

    pub fn is_active(&self) -> bool {
        self.status.is_some() || !self.search.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;
    use proptest::prelude::*;

    #[test]
    fn test_mains_subject_progress() {
        let data = Dataset::sample();
        let progress = exam_progress(&data.syllabus, ExamType::Mains);

        assert_eq!(progress.len(), 3);
        let physics = &progress[0];
        assert_eq!(physics.subject, Some(Subject::Physics));
        assert_eq!(physics.total, 5);
        assert_eq!(physics.mastered, 1);
        assert_eq!(physics.in_progress, 1);
        assert_eq!(physics.high_yield, 3);
        assert_eq!(physics.percent, 20);

        let chemistry = &progress[1];
        assert_eq!(chemistry.total, 4);
        assert_eq!(chemistry.percent, 25);
    }

    #[test]
    fn test_overall_progress_spans_both_tiers() {
        let data = Dataset::sample();
        let overall = overall_progress(&data.syllabus);
        assert_eq!(overall.total, 20);
        assert_eq!(overall.mastered, 3);
        assert_eq!(overall.percent, 15);
    }

    #[test]
    fn test_empty_subject_is_zero_percent() {
        let section = SubjectSyllabus {
            subject: Subject::Physics,
            topics: vec![],
        };
        assert_eq!(subject_progress(&section).percent, 0);
    }

    #[test]
    fn test_filter_matches_subtopics_case_insensitively() {
        let data = Dataset::sample();
        let physics = &data.syllabus.mains[0].topics;

        let filter = TopicFilter {
            search: "shm".into(),
            status: None,
        };
        let hits = filter.apply(physics);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].topic, "Waves & Oscillations");

        let filter = TopicFilter {
            search: "MECH".into(),
            status: None,
        };
        assert_eq!(filter.apply(physics).len(), 1);
    }

    #[test]
    fn test_filter_by_status() {
        let data = Dataset::sample();
        let maths = &data.syllabus.mains[2].topics;
        let filter = TopicFilter {
            search: String::new(),
            status: Some(TopicStatus::Weak),
        };
        let hits = filter.apply(maths);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "math4");
    }

    #[test]
    fn test_cycle_status_returns_to_all() {
        let mut filter = TopicFilter::default();
        for _ in 0..TopicStatus::ALL.len() {
            filter.cycle_status();
            assert!(filter.status.is_some());
        }
        filter.cycle_status();
        assert_eq!(filter.status, None);
    }

    proptest! {
        #[test]
        fn percent_stays_in_range(whole in 0usize..500, part_ratio in 0.0f64..=1.0) {
            let part = (whole as f64 * part_ratio) as usize;
            prop_assert!(percent(part, whole) <= 100);
        }
    }
}
