//! Calendar events, goal deadlines and exam countdown.

use crate::models::{CalendarEvent, Goal, GoalCategory, Priority};
use crate::syllabus::percent;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Deadlines this many days out or fewer count as upcoming.
pub const DEADLINE_WINDOW_DAYS: i64 = 7;

/// Goals at or above this progress count as nearly complete.
pub const NEAR_COMPLETE_PROGRESS: u8 = 80;

pub fn events_for_date(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.date == date).collect()
}

pub fn has_events(events: &[CalendarEvent], date: NaiveDate) -> bool {
    events.iter().any(|e| e.date == date)
}

pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Open goals due within the next week, soonest first.
pub fn upcoming_deadlines(goals: &[Goal], today: NaiveDate) -> Vec<&Goal> {
    let mut upcoming: Vec<&Goal> = goals
        .iter()
        .filter(|g| !g.completed)
        .filter(|g| (0..=DEADLINE_WINDOW_DAYS).contains(&days_until(g.deadline, today)))
        .collect();
    upcoming.sort_by_key(|g| g.deadline);
    upcoming
}

/// Human label for a date relative to today.
pub fn relative_label(date: NaiveDate, today: NaiveDate, date_format: &str) -> String {
    match days_until(date, today) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n @ 2..=6 => format!("{n} days"),
        _ => date.format(date_format).to_string(),
    }
}

/// Days left until the exam, never negative.
pub fn exam_countdown(exam_date: NaiveDate, today: NaiveDate) -> i64 {
    days_until(exam_date, today).max(0)
}

/// Goal count for one category or priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoalTally {
    pub total: usize,
    pub completed: usize,
}

impl GoalTally {
    fn of<'a>(goals: impl Iterator<Item = &'a Goal>) -> Self {
        goals.fold(Self::default(), |tally, g| Self {
            total: tally.total + 1,
            completed: tally.completed + g.completed as usize,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalSummary {
    pub total: usize,
    pub completed: usize,
    pub near_complete: usize,
    /// Rounded mean progress.
    pub average_progress: u8,
    /// Completed share of all goals, rounded percent.
    pub completion_rate: u8,
    /// Categories and priorities with at least one goal, in declaration order.
    pub by_category: Vec<(GoalCategory, GoalTally)>,
    pub by_priority: Vec<(Priority, GoalTally)>,
}

pub fn goal_summary(goals: &[Goal]) -> GoalSummary {
    if goals.is_empty() {
        return GoalSummary::default();
    }
    let sum: u32 = goals.iter().map(|g| g.progress as u32).sum();
    let completed = goals.iter().filter(|g| g.completed).count();
    GoalSummary {
        total: goals.len(),
        completed,
        near_complete: goals
            .iter()
            .filter(|g| g.progress >= NEAR_COMPLETE_PROGRESS)
            .count(),
        average_progress: (sum as f64 / goals.len() as f64).round() as u8,
        completion_rate: percent(completed, goals.len()),
        by_category: GoalCategory::ALL
            .iter()
            .map(|&c| (c, GoalTally::of(goals.iter().filter(|g| g.category == c))))
            .filter(|(_, tally)| tally.total > 0)
            .collect(),
        by_priority: Priority::ALL
            .iter()
            .map(|&p| (p, GoalTally::of(goals.iter().filter(|g| g.priority == p))))
            .filter(|(_, tally)| tally.total > 0)
            .collect(),
    }
}

/// Days of the month containing `date`, laid out in weeks beginning on
/// `week_start`. Cells outside the month are `None`.
pub fn month_grid(date: NaiveDate, week_start: Weekday) -> Vec<[Option<NaiveDate>; 7]> {
    let first = date.with_day(1).unwrap_or(date);
    let offset = (first.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday()) as i64
        % 7;
    let mut weeks = Vec::new();
    let mut cursor = first - Duration::days(offset);

    loop {
        let mut week = [None; 7];
        for cell in week.iter_mut() {
            if cursor.month() == first.month() && cursor.year() == first.year() {
                *cell = Some(cursor);
            }
            cursor += Duration::days(1);
        }
        weeks.push(week);
        if cursor.month() != first.month() || cursor.year() != first.year() {
            break;
        }
    }

    weeks
}
