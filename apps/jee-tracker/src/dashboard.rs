//! Overview figures for the dashboard view and the exported snapshot.

use crate::analytics::latest_test;
use crate::calendar::exam_countdown;
use crate::fixtures::Dataset;
use crate::gamification::LevelInfo;
use crate::models::{ExamType, Goal, MockTest, TimetableTask};
use crate::syllabus::{exam_progress, overall_progress, SubjectProgress};
use crate::timetable::{completion, todays_tasks};
use chrono::NaiveDate;
use serde::Serialize;

/// Goals shown on the dashboard.
pub const DASHBOARD_GOALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamCountdown {
    pub label: String,
    pub date: NaiveDate,
    pub days_left: i64,
}

/// Computed dashboard state. Borrowed records are cloned so the summary can
/// outlive the tracker borrow and be serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub overall_progress: u8,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub study_hours: u32,
    pub level: LevelInfo,
    pub todays_tasks: Vec<TimetableTask>,
    pub tasks_done: usize,
    pub tasks_total: usize,
    pub goals: Vec<Goal>,
    pub latest_test: Option<MockTest>,
    pub mains_progress: Vec<SubjectProgress>,
    pub countdown: ExamCountdown,
}

impl DashboardSummary {
    pub fn build(data: &Dataset, today: NaiveDate, countdown: ExamCountdown) -> Self {
        let tasks = todays_tasks(&data.timetable, today);
        let (tasks_done, tasks_total) = completion(&tasks);

        Self {
            date: today,
            overall_progress: overall_progress(&data.syllabus).percent,
            current_streak: data.user.current_streak,
            longest_streak: data.user.longest_streak,
            study_hours: data.user.total_study_hours,
            level: LevelInfo::from_xp(data.user.total_xp),
            todays_tasks: tasks.into_iter().cloned().collect(),
            tasks_done,
            tasks_total,
            goals: data.goals.iter().take(DASHBOARD_GOALS).cloned().collect(),
            latest_test: latest_test(&data.tests).cloned(),
            mains_progress: exam_progress(&data.syllabus, ExamType::Mains),
            countdown,
        }
    }
}

impl ExamCountdown {
    pub fn new(label: &str, date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            label: label.to_string(),
            date,
            days_left: exam_countdown(date, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary_on(today: NaiveDate) -> DashboardSummary {
        let data = Dataset::sample();
        let countdown = ExamCountdown::new("JEE Mains", date(2025, 1, 24), today);
        DashboardSummary::build(&data, today, countdown)
    }

    #[test]
    fn test_summary_on_a_monday() {
        let summary = summary_on(date(2024, 12, 16));
        assert_eq!(summary.overall_progress, 15);
        assert_eq!(summary.current_streak, 15);
        assert_eq!(summary.level.level, 5);
        assert_eq!((summary.tasks_done, summary.tasks_total), (2, 3));
        assert_eq!(summary.goals.len(), 3);
        assert_eq!(summary.latest_test.as_ref().map(|t| t.id.as_str()), Some("test1"));
        assert_eq!(summary.countdown.days_left, 39);

        let subjects: Vec<_> = summary.mains_progress.iter().map(|p| p.subject).collect();
        assert_eq!(
            subjects,
            vec![Some(Subject::Physics), Some(Subject::Chemistry), Some(Subject::Mathematics)]
        );
    }

    #[test]
    fn test_summary_on_a_free_day() {
        // 2024-12-22 was a Sunday.
        let summary = summary_on(date(2024, 12, 22));
        assert!(summary.todays_tasks.is_empty());
        assert_eq!((summary.tasks_done, summary.tasks_total), (0, 0));
    }

    #[test]
    fn test_countdown_after_exam_is_zero() {
        let summary = summary_on(date(2025, 3, 1));
        assert_eq!(summary.countdown.days_left, 0);
    }
}
