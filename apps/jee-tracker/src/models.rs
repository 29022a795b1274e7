//! Data models for JEE preparation tracking.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TrackerError};

/// Record identifier. Fixture records use short human-readable ids.
pub type RecordId = String;

/// Exam subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
}

impl Subject {
    /// All subjects in display order.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Mathematics];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Mathematics => "Mathematics",
        }
    }

    /// Short label for narrow columns.
    pub fn short(&self) -> &'static str {
        match self {
            Self::Physics => "Phy",
            Self::Chemistry => "Chem",
            Self::Mathematics => "Maths",
        }
    }

    /// Cycle to the next subject, used by the add-task form.
    pub fn next(&self) -> Self {
        match self {
            Self::Physics => Self::Chemistry,
            Self::Chemistry => Self::Mathematics,
            Self::Mathematics => Self::Physics,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// JEE exam tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Mains,
    Advanced,
}

impl ExamType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mains => "JEE Mains",
            Self::Advanced => "JEE Advanced",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Self::Mains => "Mains",
            Self::Advanced => "Adv",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Mains => Self::Advanced,
            Self::Advanced => Self::Mains,
        }
    }

    /// Maximum marks for one subject paper.
    pub fn subject_max_marks(&self) -> u32 {
        match self {
            Self::Mains => 100,
            Self::Advanced => 124,
        }
    }
}

/// Preparation status of a syllabus topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Mastered,
    InProgress,
    ReviseSoon,
    Weak,
    NotStarted,
}

impl TopicStatus {
    pub const ALL: [TopicStatus; 5] = [
        TopicStatus::Mastered,
        TopicStatus::InProgress,
        TopicStatus::ReviseSoon,
        TopicStatus::Weak,
        TopicStatus::NotStarted,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mastered => "Mastered",
            Self::InProgress => "In Progress",
            Self::ReviseSoon => "Revise Soon",
            Self::Weak => "Weak",
            Self::NotStarted => "Not Started",
        }
    }

    /// Next status in the toggle cycle.
    pub fn next(&self) -> Self {
        match self {
            Self::Mastered => Self::InProgress,
            Self::InProgress => Self::ReviseSoon,
            Self::ReviseSoon => Self::Weak,
            Self::Weak => Self::NotStarted,
            Self::NotStarted => Self::Mastered,
        }
    }
}

/// A syllabus topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: RecordId,
    pub topic: String,
    pub subtopics: Vec<String>,
    pub status: TopicStatus,
    pub high_yield: bool,
}

impl Topic {
    pub fn new(
        id: &str,
        topic: &str,
        subtopics: &[&str],
        status: TopicStatus,
        high_yield: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            topic: topic.to_string(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
            status,
            high_yield,
        }
    }
}

/// Topics of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSyllabus {
    pub subject: Subject,
    pub topics: Vec<Topic>,
}

/// The full syllabus, split by exam tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Syllabus {
    pub mains: Vec<SubjectSyllabus>,
    pub advanced: Vec<SubjectSyllabus>,
}

impl Syllabus {
    pub fn for_exam(&self, exam: ExamType) -> &[SubjectSyllabus] {
        match exam {
            ExamType::Mains => &self.mains,
            ExamType::Advanced => &self.advanced,
        }
    }

    /// Iterate every topic across both tiers.
    pub fn all_topics(&self) -> impl Iterator<Item = &Topic> {
        self.mains
            .iter()
            .chain(self.advanced.iter())
            .flat_map(|s| s.topics.iter())
    }

    pub fn find_topic_mut(&mut self, id: &str) -> Option<&mut Topic> {
        self.mains
            .iter_mut()
            .chain(self.advanced.iter_mut())
            .flat_map(|s| s.topics.iter_mut())
            .find(|t| t.id == id)
    }
}

/// Score for one subject within a mock test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub score: u32,
    pub total: u32,
    pub accuracy: f64,
}

/// A mock test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockTest {
    pub id: RecordId,
    pub exam: ExamType,
    pub date: NaiveDate,
    pub score: u32,
    pub total_marks: u32,
    pub accuracy: f64,
    /// Minutes spent.
    pub time_spent: u32,
    pub physics: SubjectScore,
    pub chemistry: SubjectScore,
    pub mathematics: SubjectScore,
    pub weak_topics: Vec<String>,
}

impl MockTest {
    /// Score as a percentage of total marks.
    pub fn percentage(&self) -> f64 {
        if self.total_marks == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_marks as f64 * 100.0
    }

    pub fn subject(&self, subject: Subject) -> &SubjectScore {
        match subject {
            Subject::Physics => &self.physics,
            Subject::Chemistry => &self.chemistry,
            Subject::Mathematics => &self.mathematics,
        }
    }
}

/// A time range within a day, written `H:MM-H:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TrackerError::InvalidTimeSlot(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| invalid())?;
        if start >= end {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }

    /// Length of the slot in minutes.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%-H:%M"),
            self.end.format("%-H:%M")
        )
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeSlot::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A scheduled study block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableTask {
    pub id: RecordId,
    pub day: Weekday,
    pub slot: TimeSlot,
    pub subject: Subject,
    pub topic: String,
    pub completed: bool,
}

/// Flashcard difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// A question/answer card. Review dates are fixed and never rescheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: RecordId,
    pub subject: Subject,
    pub topic: String,
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub last_reviewed: NaiveDate,
    pub next_review: NaiveDate,
}

/// Goal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }
}

/// Goal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Syllabus,
    Performance,
    Routine,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 3] = [
        GoalCategory::Syllabus,
        GoalCategory::Performance,
        GoalCategory::Routine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Syllabus => "syllabus",
            Self::Performance => "performance",
            Self::Routine => "routine",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Syllabus => Self::Performance,
            Self::Performance => Self::Routine,
            Self::Routine => Self::Syllabus,
        }
    }
}

/// A preparation goal with a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    /// Percent complete, 0..=100.
    pub progress: u8,
    pub priority: Priority,
    pub category: GoalCategory,
    /// Set once progress first reaches 100 and never cleared.
    #[serde(default)]
    pub completed: bool,
}

/// Calendar event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Test,
    Study,
    Revision,
    Practice,
    Milestone,
}

impl EventType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Study => "study",
            Self::Revision => "revision",
            Self::Practice => "practice",
            Self::Milestone => "milestone",
        }
    }
}

/// A dated calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub title: String,
    pub kind: EventType,
    pub priority: Priority,
}

/// An earnable badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub earned: bool,
    pub earned_date: Option<NaiveDate>,
}

/// Aggregate user statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_xp: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_study_hours: u32,
    pub completed_topics: u32,
    pub total_topics: u32,
    pub badges: Vec<Badge>,
}

/// Long-running achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Percent shown on the progress bar.
    pub progress: u8,
    pub current_value: u32,
    pub max_value: u32,
    pub reward: String,
}

impl Achievement {
    pub fn is_completed(&self) -> bool {
        self.progress >= 100
    }
}

/// Weekly challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub progress: u8,
    pub reward: String,
    pub time_left: String,
}

/// A leaderboard competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub xp: u32,
}

/// Motivational quote with a study tip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub tip: String,
}

/// Key exam dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDates {
    pub mains_session1: NaiveDate,
    pub mains_session2: NaiveDate,
    pub advanced: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_parse() {
        let slot = TimeSlot::parse("6:00-8:00").unwrap();
        assert_eq!(slot.start, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(slot.end, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(slot.minutes(), 120);
        assert_eq!(slot.to_string(), "6:00-8:00");

        let slot = TimeSlot::parse(" 15:00 - 17:30 ").unwrap();
        assert_eq!(slot.to_string(), "15:00-17:30");
    }

    #[test]
    fn test_time_slot_rejects_bad_input() {
        assert!(TimeSlot::parse("6:00").is_err());
        assert!(TimeSlot::parse("8:00-6:00").is_err());
        assert!(TimeSlot::parse("9:00-9:00").is_err());
        assert!(TimeSlot::parse("abc-def").is_err());
    }

    #[test]
    fn test_status_cycle_visits_every_status() {
        let mut status = TopicStatus::Mastered;
        let mut seen = Vec::new();
        for _ in 0..TopicStatus::ALL.len() {
            seen.push(status);
            status = status.next();
        }
        assert_eq!(status, TopicStatus::Mastered);
        for s in TopicStatus::ALL {
            assert!(seen.contains(&s));
        }
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&TopicStatus::ReviseSoon).unwrap();
        assert_eq!(json, "\"revise-soon\"");
        let parsed: TopicStatus = serde_json::from_str("\"not-started\"").unwrap();
        assert_eq!(parsed, TopicStatus::NotStarted);
    }

    #[test]
    fn test_mock_test_percentage() {
        let score = SubjectScore { score: 0, total: 0, accuracy: 0.0 };
        let test = MockTest {
            id: "t".into(),
            exam: ExamType::Mains,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            score: 150,
            total_marks: 300,
            accuracy: 50.0,
            time_spent: 180,
            physics: score,
            chemistry: score,
            mathematics: score,
            weak_topics: vec![],
        };
        assert_eq!(test.percentage(), 50.0);
    }

    #[test]
    fn test_goal_completed_defaults_to_false() {
        let json = r#"{
            "id": "g", "title": "Revise", "description": "", "deadline": "2024-12-20",
            "progress": 100, "priority": "low", "category": "routine"
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert!(!goal.completed);
        assert_eq!(goal.category, GoalCategory::Routine);
    }
}
