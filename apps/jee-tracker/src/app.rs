//! Application state and logic.

use crate::config::Config;
use crate::dashboard::{DashboardSummary, ExamCountdown};
use crate::export::export_snapshot;
use crate::fixtures::Dataset;
use crate::flashcards::{filter_cards, Deck, SessionStats, StudyMode};
use crate::gamification::XP_GOAL_CREATED;
use crate::models::{
    ExamDates, ExamType, Flashcard, GoalCategory, Priority, RecordId, Subject, Topic,
    TimetableTask,
};
use crate::syllabus::TopicFilter;
use crate::timer::{format_duration, QuoteRotator, StudyTimer};
use crate::timetable::tasks_for_day;
use crate::tracker::{NewTest, Tracker};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Application state.
pub struct App {
    /// Session data and mutations.
    pub tracker: Tracker,
    /// Configuration.
    pub config: Config,
    /// Current view.
    pub view: View,
    /// Date the session treats as today.
    pub today: NaiveDate,
    /// Exam dates after config overrides.
    pub exam_dates: ExamDates,
    /// Selected row in the current view's list.
    pub selected_index: usize,

    /// Exam tier shown in the syllabus view.
    pub syllabus_exam: ExamType,
    /// Exam tier shown in the analytics view.
    pub analytics_exam: ExamType,
    pub topic_filter: TopicFilter,
    /// Subjects whose topics are listed.
    pub expanded: HashSet<Subject>,

    /// Day shown in the timetable view.
    pub selected_day: Weekday,

    pub card_subject: Option<Subject>,
    pub study_mode: StudyMode,
    pub deck: Deck,
    pub session: SessionStats,

    /// Day highlighted in the calendar view.
    pub selected_date: NaiveDate,

    pub timer: StudyTimer,
    pub quotes: QuoteRotator,

    /// Whether in editing mode.
    pub editing: bool,
    /// Input buffer for editing.
    pub input_buffer: String,
    /// Editing field.
    pub editing_field: EditField,
    /// Values collected by earlier steps of a multi-step form.
    pub draft: Draft,

    /// Message to display.
    pub message: Option<(String, MessageType)>,
    /// Show help popup.
    pub show_help: bool,
}

/// Current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Syllabus,
    Analytics,
    Timetable,
    Flashcards,
    Calendar,
    Gamification,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Dashboard,
        View::Syllabus,
        View::Analytics,
        View::Timetable,
        View::Flashcards,
        View::Calendar,
        View::Gamification,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Syllabus => "Syllabus",
            Self::Analytics => "Analytics",
            Self::Timetable => "Timetable",
            Self::Flashcards => "Flashcards",
            Self::Calendar => "Calendar",
            Self::Gamification => "Achievements",
        }
    }

    fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Editing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    None,
    Search,
    TaskSlot,
    TaskTopic,
    GoalTitle,
    GoalDeadline,
    TestMarks,
    TestWeakTopics,
}

/// Partially filled add-task / add-goal / log-test form.
#[derive(Debug, Clone)]
pub struct Draft {
    pub slot: String,
    pub subject: Subject,
    pub title: String,
    pub priority: Priority,
    pub category: GoalCategory,
    pub marks: [u32; 3],
    pub time_spent: u32,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            slot: String::new(),
            subject: Subject::Physics,
            title: String::new(),
            priority: Priority::Medium,
            category: GoalCategory::Syllabus,
            marks: [0; 3],
            time_spent: 0,
        }
    }
}

/// Message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// A row in the syllabus view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyllabusRow {
    Subject(Subject),
    Topic(RecordId),
}

impl App {
    /// Create the application over the sample record, dated today (UTC).
    pub fn new(config: Config) -> Self {
        let today = Utc::now().date_naive();
        Self::with_state(config, Dataset::sample(), today)
    }

    /// Build the app over a given dataset and date.
    pub fn with_state(config: Config, data: Dataset, today: NaiveDate) -> Self {
        let exam_dates = config.exam.resolve(data.exam_dates);
        let quotes = QuoteRotator::new(data.quotes.len(), config.display.quote_rotation_secs);

        let mut app = Self {
            tracker: Tracker::new(data),
            config,
            view: View::Dashboard,
            today,
            exam_dates,
            selected_index: 0,
            syllabus_exam: ExamType::Mains,
            analytics_exam: ExamType::Mains,
            topic_filter: TopicFilter::default(),
            expanded: HashSet::from([Subject::Physics]),
            selected_day: today.weekday(),
            card_subject: None,
            study_mode: StudyMode::All,
            deck: Deck::default(),
            session: SessionStats::new(),
            selected_date: today,
            timer: StudyTimer::new(),
            quotes,
            editing: false,
            input_buffer: String::new(),
            editing_field: EditField::None,
            draft: Draft::default(),
            message: None,
            show_help: false,
        };
        app.refresh_deck();
        app
    }

    /// Advance time-driven state.
    pub fn tick(&mut self) {
        self.quotes.tick();
    }

    /// Quitting is blocked while a form is open.
    pub fn can_quit(&self) -> bool {
        !self.editing
    }

    pub fn view_title(&self) -> &str {
        self.view.title()
    }

    pub fn data(&self) -> &Dataset {
        self.tracker.data()
    }

    pub fn countdown(&self) -> ExamCountdown {
        let target = self.config.exam.countdown;
        ExamCountdown::new(target.label(), target.date(&self.exam_dates), self.today)
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        DashboardSummary::build(self.data(), self.today, self.countdown())
    }

    pub fn current_quote(&self) -> Option<&crate::models::Quote> {
        self.data().quotes.get(self.quotes.index())
    }

    /// Rows of the syllabus view. Topics show under expanded subjects, or
    /// under every subject while a filter is active.
    pub fn syllabus_rows(&self) -> Vec<SyllabusRow> {
        let mut rows = Vec::new();
        for section in self.data().syllabus.for_exam(self.syllabus_exam) {
            rows.push(SyllabusRow::Subject(section.subject));
            if self.topic_filter.is_active() || self.expanded.contains(&section.subject) {
                rows.extend(
                    self.topic_filter
                        .apply(&section.topics)
                        .into_iter()
                        .map(|t| SyllabusRow::Topic(t.id.clone())),
                );
            }
        }
        rows
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.data().syllabus.all_topics().find(|t| t.id == id)
    }

    pub fn day_tasks(&self) -> Vec<&TimetableTask> {
        tasks_for_day(&self.data().timetable, self.selected_day)
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        let id = self.deck.current()?;
        self.data().flashcards.iter().find(|c| &c.id == id)
    }

    /// Length of the selectable list in the current view.
    fn list_len(&self) -> usize {
        match self.view {
            View::Syllabus => self.syllabus_rows().len(),
            View::Timetable => self.day_tasks().len(),
            View::Calendar => self.data().goals.len(),
            _ => 0,
        }
    }

    fn set_message(&mut self, text: impl Into<String>, kind: MessageType) {
        self.message = Some((text.into(), kind));
    }

    /// Handle key input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle help popup
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Clear message on any key
        self.message = None;

        if self.editing {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(c @ '1'..='7') => {
                if let Some(view) = View::from_digit(c) {
                    self.switch_view(view);
                }
            }
            KeyCode::Tab => self.switch_view(self.view.next()),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('p') => self.toggle_timer(),
            KeyCode::Char('T') => self.stop_timer(),
            KeyCode::Char('j') | KeyCode::Down if self.view != View::Calendar => {
                self.move_selection(1)
            }
            KeyCode::Char('k') | KeyCode::Up if self.view != View::Calendar => {
                self.move_selection(-1)
            }
            _ => match self.view {
                View::Dashboard => self.handle_dashboard_key(key),
                View::Syllabus => self.handle_syllabus_key(key),
                View::Analytics => self.handle_analytics_key(key),
                View::Timetable => self.handle_timetable_key(key),
                View::Flashcards => self.handle_flashcard_key(key),
                View::Calendar => self.handle_calendar_key(key),
                View::Gamification => {}
            },
        }
    }

    fn switch_view(&mut self, view: View) {
        if self.view != view {
            debug!(from = ?self.view, to = ?view, "view switched");
            self.view = view;
            self.selected_index = 0;
        }
    }

    /// Move selection by delta.
    fn move_selection(&mut self, delta: i32) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let new_index = self.selected_index as i32 + delta;
        self.selected_index = new_index.clamp(0, len as i32 - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Handle editing keys.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.editing_field == EditField::Search {
                    self.topic_filter.search.clear();
                    self.clamp_selection();
                }
                self.cancel_editing();
            }
            KeyCode::Enter => self.finish_editing(),
            KeyCode::Tab => match self.editing_field {
                EditField::TaskTopic => self.draft.subject = self.draft.subject.next(),
                EditField::GoalTitle => self.draft.category = self.draft.category.next(),
                EditField::GoalDeadline => self.draft.priority = self.draft.priority.next(),
                _ => {}
            },
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.sync_search();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.sync_search();
            }
            _ => {}
        }
    }

    /// Search filters as you type.
    fn sync_search(&mut self) {
        if self.editing_field == EditField::Search {
            self.topic_filter.search = self.input_buffer.clone();
            self.selected_index = 0;
        }
    }

    fn start_editing(&mut self, field: EditField, initial: &str) {
        self.editing = true;
        self.editing_field = field;
        self.input_buffer = initial.to_string();
    }

    fn cancel_editing(&mut self) {
        self.editing = false;
        self.input_buffer.clear();
        self.editing_field = EditField::None;
        self.draft = Draft::default();
    }

    /// Finish the current field; multi-step forms move to their next field.
    fn finish_editing(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        match self.editing_field {
            EditField::Search => {}
            EditField::TaskSlot => {
                self.draft.slot = input;
                self.editing_field = EditField::TaskTopic;
                return;
            }
            EditField::TaskTopic => {
                let result = self.tracker.add_task(
                    self.selected_day,
                    &self.draft.slot,
                    self.draft.subject,
                    &input,
                );
                match result {
                    Ok(_) => self.set_message("Task added", MessageType::Success),
                    Err(e) => self.set_message(e.to_string(), MessageType::Error),
                }
            }
            EditField::GoalTitle => {
                if input.trim().is_empty() {
                    self.set_message("Goal title is required", MessageType::Warning);
                } else {
                    self.draft.title = input;
                    self.editing_field = EditField::GoalDeadline;
                    self.input_buffer = self.selected_date.format("%Y-%m-%d").to_string();
                    return;
                }
            }
            EditField::GoalDeadline => match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
                Ok(deadline) => {
                    let result = self.tracker.add_goal(
                        &self.draft.title,
                        deadline,
                        self.draft.priority,
                        self.draft.category,
                    );
                    match result {
                        Ok(_) => self.set_message(
                            format!("Goal added +{XP_GOAL_CREATED} XP"),
                            MessageType::Success,
                        ),
                        Err(e) => self.set_message(e.to_string(), MessageType::Error),
                    }
                }
                Err(_) => {
                    self.set_message(format!("Invalid date '{input}', use YYYY-MM-DD"), MessageType::Error)
                }
            },
            EditField::TestMarks => match parse_marks(&input) {
                Some((marks, time_spent)) => {
                    self.draft.marks = marks;
                    self.draft.time_spent = time_spent;
                    self.editing_field = EditField::TestWeakTopics;
                    return;
                }
                None => self.set_message(
                    format!("Invalid marks '{input}', use: physics chemistry maths minutes"),
                    MessageType::Error,
                ),
            },
            EditField::TestWeakTopics => {
                let entry = NewTest {
                    exam: self.analytics_exam,
                    date: self.today,
                    marks: self.draft.marks,
                    time_spent: self.draft.time_spent,
                    weak_topics: input.split(',').map(str::to_string).collect(),
                };
                match self.tracker.add_test(entry) {
                    Ok(logged) => self.set_message(
                        format!("Test logged: {:.2}% accuracy, +{} XP", logged.accuracy, logged.xp_awarded),
                        MessageType::Success,
                    ),
                    Err(e) => self.set_message(e.to_string(), MessageType::Error),
                }
            }
            EditField::None => {}
        }

        self.editing = false;
        self.editing_field = EditField::None;
        self.draft = Draft::default();
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('n') = key.code {
            self.quotes.advance();
        }
    }

    fn handle_syllabus_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('m') => {
                self.syllabus_exam = self.syllabus_exam.toggle();
                self.selected_index = 0;
            }
            KeyCode::Char('/') => {
                let current = self.topic_filter.search.clone();
                self.start_editing(EditField::Search, &current);
            }
            KeyCode::Char('f') => {
                self.topic_filter.cycle_status();
                self.clamp_selection();
            }
            KeyCode::Char('c') => {
                self.topic_filter = TopicFilter::default();
                self.clamp_selection();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_syllabus_row(),
            _ => {}
        }
    }

    /// Expand/collapse a subject, or cycle a topic's status.
    fn activate_syllabus_row(&mut self) {
        let Some(row) = self.syllabus_rows().get(self.selected_index).cloned() else {
            return;
        };
        match row {
            SyllabusRow::Subject(subject) => {
                if !self.expanded.remove(&subject) {
                    self.expanded.insert(subject);
                }
                self.clamp_selection();
            }
            SyllabusRow::Topic(id) => match self.tracker.cycle_topic_status(&id) {
                Ok(change) => {
                    let name = self.topic(&id).map(|t| t.topic.clone()).unwrap_or(id);
                    let mut text = format!("{name}: {}", change.to.label());
                    if change.xp_awarded > 0 {
                        text.push_str(&format!(" (+{} XP)", change.xp_awarded));
                    }
                    self.set_message(text, MessageType::Success);
                    // The topic may no longer match an active status filter.
                    self.clamp_selection();
                }
                Err(e) => self.set_message(e.to_string(), MessageType::Error),
            },
        }
    }

    fn handle_analytics_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('m') => self.analytics_exam = self.analytics_exam.toggle(),
            KeyCode::Char('a') => self.start_editing(EditField::TestMarks, ""),
            _ => {}
        }
    }

    fn handle_timetable_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.change_day(-1),
            KeyCode::Char('l') | KeyCode::Right => self.change_day(1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_task(),
            KeyCode::Char('a') => self.start_editing(EditField::TaskSlot, ""),
            KeyCode::Char('t') => self.start_timer_for_selected(),
            _ => {}
        }
    }

    fn change_day(&mut self, delta: i64) {
        self.selected_day = if delta >= 0 {
            self.selected_day.succ()
        } else {
            self.selected_day.pred()
        };
        self.selected_index = 0;
    }

    fn selected_task(&self) -> Option<TimetableTask> {
        self.day_tasks().get(self.selected_index).map(|t| (*t).clone())
    }

    fn toggle_selected_task(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        match self.tracker.toggle_task(&task.id) {
            Ok(toggle) => {
                let text = if toggle.completed {
                    format!("{} completed (+{} XP)", task.topic, toggle.xp_awarded)
                } else {
                    format!("{} marked pending", task.topic)
                };
                self.set_message(text, MessageType::Success);
            }
            Err(e) => self.set_message(e.to_string(), MessageType::Error),
        }
    }

    fn start_timer_for_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_message("No task selected", MessageType::Warning);
            return;
        };
        if let Some(session) = self.timer.stop() {
            debug!(topic = %session.target.topic, "previous timer replaced");
        }
        self.timer.start(task.subject, &task.topic);
        self.set_message(format!("Timing {} ({})", task.topic, task.subject), MessageType::Info);
    }

    fn toggle_timer(&mut self) {
        if !self.timer.is_active() {
            self.set_message("No timer running", MessageType::Warning);
            return;
        }
        self.timer.toggle();
        let state = if self.timer.is_running() { "resumed" } else { "paused" };
        self.set_message(format!("Timer {state}"), MessageType::Info);
    }

    /// Stop the study timer, reporting the session length.
    pub fn stop_timer(&mut self) {
        if let Some(session) = self.timer.stop() {
            self.set_message(
                format!(
                    "Studied {} for {}",
                    session.target.topic,
                    format_duration(session.elapsed)
                ),
                MessageType::Success,
            );
        }
    }

    fn handle_flashcard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.deck.flip(),
            KeyCode::Char('l') | KeyCode::Right => {
                self.deck.next();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.deck.prev();
            }
            KeyCode::Char('y') => self.mark_card(true),
            KeyCode::Char('n') => self.mark_card(false),
            KeyCode::Char('r') => {
                self.deck.shuffle();
                self.start_session();
                self.set_message("Deck shuffled", MessageType::Info);
            }
            KeyCode::Char('R') => {
                self.deck.restart();
                self.start_session();
                self.set_message("New study session", MessageType::Info);
            }
            KeyCode::Char('s') => {
                self.card_subject = match self.card_subject {
                    None => Some(Subject::Physics),
                    Some(Subject::Mathematics) => None,
                    Some(subject) => Some(subject.next()),
                };
                self.refresh_deck();
            }
            KeyCode::Char('m') => {
                self.study_mode = self.study_mode.next();
                self.refresh_deck();
            }
            _ => {}
        }
    }

    /// Zero the session score. The deck must already be rewound.
    fn start_session(&mut self) {
        if self.session.total() > 0 {
            info!(
                correct = self.session.correct,
                total = self.session.total(),
                "flashcard session ended"
            );
        }
        self.session = SessionStats::new();
    }

    /// Rebuild the deck from the current filters and start a new session.
    pub fn refresh_deck(&mut self) {
        let ids = filter_cards(
            &self.data().flashcards,
            self.card_subject,
            self.study_mode,
            self.today,
        )
        .into_iter()
        .map(|c| c.id.clone())
        .collect();
        self.deck.reset(ids);
        self.start_session();
    }

    /// Score the current card and move on.
    fn mark_card(&mut self, correct: bool) {
        let Some(id) = self.deck.current().cloned() else {
            return;
        };
        if self.deck.is_scored() {
            let text = if self.deck.is_complete() {
                "Session complete. Press R to study again"
            } else {
                "Card already scored this session"
            };
            self.set_message(text, MessageType::Warning);
            return;
        }
        if !self.deck.is_flipped() {
            self.set_message("Flip the card first", MessageType::Warning);
            return;
        }
        if let Err(e) = self.tracker.record_review(&id, correct) {
            self.set_message(e.to_string(), MessageType::Error);
            return;
        }
        self.deck.score();
        self.session.record(correct);

        if self.deck.is_complete() || !self.deck.next() {
            self.set_message(
                format!(
                    "Session complete: {}/{} correct ({}%)",
                    self.session.correct,
                    self.session.total(),
                    self.session.accuracy()
                ),
                MessageType::Success,
            );
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.change_date(-1),
            KeyCode::Char('l') | KeyCode::Right => self.change_date(1),
            KeyCode::Up => self.change_date(-7),
            KeyCode::Down => self.change_date(7),
            KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('t') => self.selected_date = self.today,
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_selected_goal(10),
            KeyCode::Char('-') => self.adjust_selected_goal(-10),
            KeyCode::Char('a') => self.start_editing(EditField::GoalTitle, ""),
            _ => {}
        }
    }

    fn change_date(&mut self, delta: i64) {
        self.selected_date += Duration::days(delta);
    }

    fn adjust_selected_goal(&mut self, delta: i32) {
        let Some(id) = self.data().goals.get(self.selected_index).map(|g| g.id.clone()) else {
            return;
        };
        match self.tracker.adjust_goal_progress(&id, delta) {
            Ok(update) if update.xp_awarded > 0 => self.set_message(
                format!("Goal completed! +{} XP", update.xp_awarded),
                MessageType::Success,
            ),
            Ok(update) => self.set_message(format!("Goal progress {}%", update.progress), MessageType::Info),
            Err(e) => self.set_message(e.to_string(), MessageType::Error),
        }
    }

    fn export(&mut self) {
        let Some(dir) = self.config.export_dir() else {
            self.set_message("No export directory available", MessageType::Error);
            return;
        };
        match export_snapshot(&self.dashboard_summary(), &dir) {
            Ok(path) => self.set_message(format!("Exported to {}", path.display()), MessageType::Success),
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_message(format!("Export failed: {e}"), MessageType::Error);
            }
        }
    }
}

/// Parse `physics chemistry maths minutes`, whitespace separated.
fn parse_marks(input: &str) -> Option<([u32; 3], u32)> {
    let values: Vec<u32> = input
        .split_whitespace()
        .map(|v| v.parse().ok())
        .collect::<Option<_>>()?;
    match values[..] {
        [p, c, m, minutes] => Some(([p, c, m], minutes)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TopicStatus;
    use crossterm::event::KeyModifiers;
    use tempfile::tempdir;

    // 2024-12-16 was a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 16).unwrap()
    }

    fn app() -> App {
        App::with_state(Config::default(), Dataset::sample(), monday())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = app();
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.view, View::Timetable);
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.view, View::Gamification);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn test_help_popup_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('2'));
        assert!(!app.show_help);
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn test_syllabus_expand_and_cycle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));

        // Physics starts expanded: 1 header + 5 topics + 2 headers.
        assert_eq!(app.syllabus_rows().len(), 8);

        // Select Optics (phy5) and cycle it to mastered.
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.syllabus_rows()[app.selected_index], SyllabusRow::Topic("phy5".into()));
        let xp = app.tracker.total_xp();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.topic("phy5").unwrap().status, TopicStatus::Mastered);
        assert_eq!(app.tracker.total_xp(), xp + 15);

        // Collapse physics.
        app.selected_index = 0;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.syllabus_rows().len(), 3);
    }

    #[test]
    fn test_syllabus_search_shows_matches_in_all_subjects() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert!(!app.can_quit());
        type_str(&mut app, "calc");
        assert_eq!(app.topic_filter.search, "calc");

        let topics: Vec<_> = app
            .syllabus_rows()
            .into_iter()
            .filter_map(|r| match r {
                SyllabusRow::Topic(id) => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(topics, vec!["math1".to_string()]);

        press(&mut app, KeyCode::Esc);
        assert!(app.topic_filter.search.is_empty());
        assert!(app.can_quit());
    }

    #[test]
    fn test_syllabus_exam_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.syllabus_exam, ExamType::Advanced);
        // Physics expanded: 2 advanced physics topics.
        assert_eq!(app.syllabus_rows().len(), 5);
    }

    #[test]
    fn test_timetable_toggle_and_day_change() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.selected_day, Weekday::Mon);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.data().timetable.iter().find(|t| t.id == "tt3").unwrap().completed);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.selected_day, Weekday::Tue);
        assert_eq!(app.selected_index, 0);
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.selected_day, Weekday::Sun);
    }

    #[test]
    fn test_add_task_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "18:00-19:00");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editing_field, EditField::TaskTopic);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Equilibrium");
        press(&mut app, KeyCode::Enter);

        assert!(!app.editing);
        let tasks = app.day_tasks();
        assert_eq!(tasks.len(), 4);
        let added = tasks.last().unwrap();
        assert_eq!(added.topic, "Equilibrium");
        assert_eq!(added.subject, Subject::Chemistry);
    }

    #[test]
    fn test_add_task_rejects_bad_slot() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "late");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Optics");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.day_tasks().len(), 3);
        assert!(matches!(app.message, Some((_, MessageType::Error))));
    }

    #[test]
    fn test_quit_blocked_while_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('a'));
        assert!(!app.can_quit());
        press(&mut app, KeyCode::Esc);
        assert!(app.can_quit());
    }

    #[test]
    fn test_flashcard_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.deck.len(), 3);

        // Must flip before marking.
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.total(), 0);

        let xp = app.tracker.total_xp();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.correct, 1);
        assert_eq!(app.deck.position(), 1);
        assert!(!app.deck.is_flipped());
        assert_eq!(app.tracker.total_xp(), xp + 3);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.total(), 3);
        assert_eq!(app.session.accuracy(), 67);
        assert!(matches!(app.message, Some((ref m, MessageType::Success)) if m.contains("complete")));
    }

    #[test]
    fn test_finished_deck_cannot_be_scored_again() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        let xp = app.tracker.total_xp();
        for _ in 0..3 {
            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Char('y'));
        }
        assert_eq!(app.session.total(), 3);
        assert_eq!(app.tracker.total_xp(), xp + 9);

        for _ in 0..10 {
            press(&mut app, KeyCode::Char('y'));
        }
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.total(), 3);
        assert_eq!(app.tracker.total_xp(), xp + 9);
        assert!(matches!(app.message, Some((ref m, MessageType::Warning)) if m.contains("Press R")));
    }

    #[test]
    fn test_going_back_does_not_rescore() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        let xp = app.tracker.total_xp();

        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.total(), 1);
        assert_eq!(app.tracker.total_xp(), xp);
        assert!(matches!(app.message, Some((ref m, _)) if m.contains("already scored")));
    }

    #[test]
    fn test_new_session_resets_score() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Char(' '));
            press(&mut app, KeyCode::Char('n'));
        }
        assert_eq!(app.session.incorrect, 3);

        press(&mut app, KeyCode::Char('R'));
        assert_eq!(app.session.total(), 0);
        assert_eq!(app.deck.position(), 0);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.correct, 1);

        // Changing filters starts over too.
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.session.total(), 0);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session.total(), 0);
        assert_eq!(app.deck.scored_count(), 0);
    }

    #[test]
    fn test_flashcard_filters_rebuild_deck() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.study_mode, StudyMode::Due);
        // Only fc2 is due on the 16th.
        assert_eq!(app.deck.len(), 1);
        assert_eq!(app.current_card().unwrap().id, "fc2");

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.study_mode, StudyMode::Difficult);
        assert!(app.deck.is_empty());

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.card_subject, Some(Subject::Physics));
        assert_eq!(app.deck.len(), 1);
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('s'));
        }
        assert_eq!(app.card_subject, None);
    }

    #[test]
    fn test_calendar_navigation_and_goal_progress() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_date, monday() + Duration::days(8));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.selected_date, monday());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.data().goals[1].progress, 90);
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.data().goals[1].progress, 100);
    }

    #[test]
    fn test_add_goal_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        let xp = app.tracker.total_xp();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Revise Optics");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editing_field, EditField::GoalDeadline);
        assert_eq!(app.input_buffer, "2024-12-16");

        press(&mut app, KeyCode::Tab);
        app.input_buffer = "2024-12-20".into();
        press(&mut app, KeyCode::Enter);

        let goal = app.data().goals.last().unwrap();
        assert_eq!(goal.title, "Revise Optics");
        assert_eq!(goal.priority, Priority::Low);
        assert_eq!(goal.category, GoalCategory::Performance);
        assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
        assert_eq!(app.tracker.total_xp(), xp + 15);
    }

    #[test]
    fn test_completing_goal_from_calendar() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        let xp = app.tracker.total_xp();
        // goal2 is high priority at 80%.
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert!(app.data().goals[1].completed);
        assert!(matches!(app.message, Some((ref m, MessageType::Success)) if m.contains("+50 XP")));

        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.tracker.total_xp(), xp + 50);
    }

    #[test]
    fn test_log_test_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('m'));
        let xp = app.tracker.total_xp();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.editing_field, EditField::TestMarks);
        type_str(&mut app, "100 90 80 170");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editing_field, EditField::TestWeakTopics);
        type_str(&mut app, "Rotational Motion, Electrochemistry");
        press(&mut app, KeyCode::Enter);
        assert!(!app.editing);

        let test = app.data().tests.last().unwrap();
        assert_eq!(test.exam, ExamType::Advanced);
        assert_eq!(test.date, monday());
        assert_eq!(test.total_marks, 372);
        assert_eq!(test.time_spent, 170);
        assert_eq!(test.weak_topics, vec!["Rotational Motion", "Electrochemistry"]);
        // 270 / 372 is 72.58%, the 50 XP tier plus the bonus.
        assert_eq!(app.tracker.total_xp(), xp + 75);
    }

    #[test]
    fn test_log_test_rejects_bad_marks() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "85 78 82");
        press(&mut app, KeyCode::Enter);
        assert!(!app.editing);
        assert!(matches!(app.message, Some((_, MessageType::Error))));

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "120 78 82 180");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.message, Some((ref m, MessageType::Error)) if m.contains("Physics")));
        assert_eq!(app.data().tests.len(), 2);
    }

    #[test]
    fn test_parse_marks() {
        assert_eq!(parse_marks(" 85 78  82 180 "), Some(([85, 78, 82], 180)));
        assert_eq!(parse_marks("85 78 82"), None);
        assert_eq!(parse_marks("85 78 x 180"), None);
        assert_eq!(parse_marks("85 -1 82 180"), None);
    }

    #[test]
    fn test_timer_from_timetable() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('t'));
        let target = app.timer.target().unwrap();
        assert_eq!(target.topic, "Mechanics Revision");
        assert!(app.timer.is_running());

        press(&mut app, KeyCode::Char('p'));
        assert!(!app.timer.is_running());
        press(&mut app, KeyCode::Char('T'));
        assert!(!app.timer.is_active());
        assert!(matches!(app.message, Some((ref m, _)) if m.starts_with("Studied")));
    }

    #[test]
    fn test_export_writes_to_configured_dir() {
        let dir = tempdir().unwrap();
        let mut app = app();
        app.config.export.path = Some(dir.path().to_path_buf());
        press(&mut app, KeyCode::Char('x'));

        assert!(matches!(app.message, Some((_, MessageType::Success))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_countdown_uses_config() {
        let mut config = Config::default();
        config.exam.mains_session1 = NaiveDate::from_ymd_opt(2024, 12, 26);
        let app = App::with_state(config, Dataset::sample(), monday());
        assert_eq!(app.countdown().days_left, 10);
    }
}
