//! Weekly timetable aggregation.

use crate::models::{Subject, TimeSlot, TimetableTask};
use crate::syllabus::percent;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Monday-first week.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Tasks scheduled on `day`, ordered by start time.
pub fn tasks_for_day(tasks: &[TimetableTask], day: Weekday) -> Vec<&TimetableTask> {
    let mut day_tasks: Vec<&TimetableTask> = tasks.iter().filter(|t| t.day == day).collect();
    day_tasks.sort_by_key(|t| t.slot.start);
    day_tasks
}

pub fn todays_tasks(tasks: &[TimetableTask], today: NaiveDate) -> Vec<&TimetableTask> {
    tasks_for_day(tasks, today.weekday())
}

/// Completed and total counts.
pub fn completion(tasks: &[&TimetableTask]) -> (usize, usize) {
    (tasks.iter().filter(|t| t.completed).count(), tasks.len())
}

/// Completed share of a day's tasks, rounded percent.
pub fn day_progress(tasks: &[TimetableTask], day: Weekday) -> u8 {
    let (done, total) = completion(&tasks_for_day(tasks, day));
    percent(done, total)
}

/// Completed share of all tasks, rounded percent.
pub fn weekly_progress(tasks: &[TimetableTask]) -> u8 {
    let done = tasks.iter().filter(|t| t.completed).count();
    percent(done, tasks.len())
}

/// Share of the day's tasks belonging to each subject.
pub fn subject_share(tasks: &[TimetableTask], day: Weekday) -> Vec<(Subject, u8)> {
    let day_tasks = tasks_for_day(tasks, day);
    Subject::ALL
        .iter()
        .map(|&subject| {
            let count = day_tasks.iter().filter(|t| t.subject == subject).count();
            (subject, percent(count, day_tasks.len()))
        })
        .collect()
}

/// Total, completed and rate for one grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
}

impl CompletionStats {
    pub fn rate(&self) -> u8 {
        percent(self.completed, self.total)
    }

    fn record(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }
}

/// Timetable-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimetableStats {
    pub overall: CompletionStats,
    pub by_subject: Vec<(Subject, CompletionStats)>,
    /// Ordered by slot start time.
    pub by_slot: Vec<(TimeSlot, CompletionStats)>,
    /// Total scheduled minutes.
    pub planned_minutes: i64,
}

pub fn timetable_stats(tasks: &[TimetableTask]) -> TimetableStats {
    let mut stats = TimetableStats {
        by_subject: Subject::ALL
            .iter()
            .map(|&s| (s, CompletionStats::default()))
            .collect(),
        ..Default::default()
    };

    for task in tasks {
        stats.overall.record(task.completed);
        stats.planned_minutes += task.slot.minutes();

        if let Some((_, entry)) = stats.by_subject.iter_mut().find(|(s, _)| *s == task.subject) {
            entry.record(task.completed);
        }

        match stats.by_slot.iter_mut().find(|(slot, _)| *slot == task.slot) {
            Some((_, entry)) => entry.record(task.completed),
            None => {
                let mut entry = CompletionStats::default();
                entry.record(task.completed);
                stats.by_slot.push((task.slot, entry));
            }
        }
    }

    stats.by_slot.sort_by_key(|(slot, _)| *slot);
    stats
}
