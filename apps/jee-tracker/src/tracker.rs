//! In-memory session store.
//!
//! All edits live for the current session only. Each one is logged so a
//! session can be reconstructed from the log file.

use crate::error::{Result, TrackerError};
use crate::fixtures::Dataset;
use crate::gamification::{
    goal_completion_reward, mock_test_reward, review_reward, topic_reward, XP_GOAL_CREATED,
    XP_TASK,
};
use crate::models::{
    ExamType, Goal, GoalCategory, MockTest, Priority, RecordId, Subject, SubjectScore, TimeSlot,
    TimetableTask, TopicStatus,
};
use chrono::{NaiveDate, Weekday};
use tracing::{debug, info};
use uuid::Uuid;

/// Outcome of changing a topic's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: TopicStatus,
    pub to: TopicStatus,
    pub xp_awarded: u32,
}

/// Outcome of toggling a timetable task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToggle {
    pub completed: bool,
    pub xp_awarded: u32,
}

/// Outcome of changing a goal's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalUpdate {
    pub progress: u8,
    pub completed: bool,
    pub xp_awarded: u32,
}

/// A mock test result as entered, before accuracy is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTest {
    pub exam: ExamType,
    pub date: NaiveDate,
    /// Marks per subject in Physics, Chemistry, Mathematics order.
    pub marks: [u32; 3],
    /// Minutes spent.
    pub time_spent: u32,
    pub weak_topics: Vec<String>,
}

/// Outcome of logging a mock test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestLogged {
    pub id: RecordId,
    pub accuracy: f64,
    pub xp_awarded: u32,
}

/// Owns the dataset and applies edits to it.
#[derive(Debug, Clone)]
pub struct Tracker {
    data: Dataset,
}

impl Tracker {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn total_xp(&self) -> u32 {
        self.data.user.total_xp
    }

    fn award_xp(&mut self, amount: u32, reason: &str) {
        self.data.user.total_xp = self.data.user.total_xp.saturating_add(amount);
        info!(amount, reason, total = self.data.user.total_xp, "xp awarded");
    }

    /// Set a topic's status. Mastering a topic for the first time earns XP.
    pub fn set_topic_status(&mut self, topic_id: &str, status: TopicStatus) -> Result<StatusChange> {
        let topic = self
            .data
            .syllabus
            .find_topic_mut(topic_id)
            .ok_or_else(|| TrackerError::TopicNotFound(topic_id.to_string()))?;

        let from = topic.status;
        topic.status = status;
        let high_yield = topic.high_yield;
        info!(topic = topic_id, ?from, to = ?status, "topic status changed");

        let xp_awarded = if status == TopicStatus::Mastered && from != TopicStatus::Mastered {
            topic_reward(high_yield)
        } else {
            0
        };
        if xp_awarded > 0 {
            self.award_xp(xp_awarded, "topic mastered");
        }

        Ok(StatusChange {
            from,
            to: status,
            xp_awarded,
        })
    }

    /// Advance a topic to the next status in the cycle.
    pub fn cycle_topic_status(&mut self, topic_id: &str) -> Result<StatusChange> {
        let current = self
            .data
            .syllabus
            .all_topics()
            .find(|t| t.id == topic_id)
            .map(|t| t.status)
            .ok_or_else(|| TrackerError::TopicNotFound(topic_id.to_string()))?;
        self.set_topic_status(topic_id, current.next())
    }

    /// Flip a task's completed flag. Completing earns XP; un-completing
    /// does not take it back.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<TaskToggle> {
        let task = self
            .data
            .timetable
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| TrackerError::TaskNotFound(task_id.to_string()))?;

        task.completed = !task.completed;
        let completed = task.completed;
        info!(task = task_id, completed, "task toggled");

        let xp_awarded = if completed { XP_TASK } else { 0 };
        if xp_awarded > 0 {
            self.award_xp(xp_awarded, "task completed");
        }

        Ok(TaskToggle {
            completed,
            xp_awarded,
        })
    }

    /// Schedule a new study block.
    pub fn add_task(
        &mut self,
        day: Weekday,
        slot: &str,
        subject: Subject,
        topic: &str,
    ) -> Result<RecordId> {
        let slot = TimeSlot::parse(slot)?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(TrackerError::InvalidInput("topic must not be empty".into()));
        }

        let id = format!("tt-{}", Uuid::new_v4());
        self.data.timetable.push(TimetableTask {
            id: id.clone(),
            day,
            slot,
            subject,
            topic: topic.to_string(),
            completed: false,
        });
        info!(task = %id, ?day, %slot, %subject, topic, "task added");
        Ok(id)
    }

    /// Score a flashcard answer. Review dates are left untouched.
    pub fn record_review(&mut self, card_id: &str, correct: bool) -> Result<u32> {
        if !self.data.flashcards.iter().any(|c| c.id == card_id) {
            return Err(TrackerError::CardNotFound(card_id.to_string()));
        }
        debug!(card = card_id, correct, "flashcard reviewed");
        let xp = review_reward(correct);
        self.award_xp(xp, "flashcard review");
        Ok(xp)
    }

    /// Set goal progress, clamped to 0..=100. The first time a goal reaches
    /// 100 it is marked completed and earns a reward by priority.
    pub fn set_goal_progress(&mut self, goal_id: &str, progress: i32) -> Result<GoalUpdate> {
        let goal = self
            .data
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| TrackerError::GoalNotFound(goal_id.to_string()))?;

        goal.progress = progress.clamp(0, 100) as u8;
        let newly_completed = goal.progress == 100 && !goal.completed;
        if newly_completed {
            goal.completed = true;
        }
        let update = GoalUpdate {
            progress: goal.progress,
            completed: goal.completed,
            xp_awarded: if newly_completed {
                goal_completion_reward(goal.priority)
            } else {
                0
            },
        };
        info!(
            goal = goal_id,
            progress = update.progress,
            completed = update.completed,
            "goal progress updated"
        );

        if update.xp_awarded > 0 {
            self.award_xp(update.xp_awarded, "goal completed");
        }
        Ok(update)
    }

    pub fn adjust_goal_progress(&mut self, goal_id: &str, delta: i32) -> Result<GoalUpdate> {
        let current = self
            .data
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .map(|g| g.progress as i32)
            .ok_or_else(|| TrackerError::GoalNotFound(goal_id.to_string()))?;
        self.set_goal_progress(goal_id, current + delta)
    }

    /// Add a goal at 0% progress. Setting a goal earns a small reward.
    pub fn add_goal(
        &mut self,
        title: &str,
        deadline: NaiveDate,
        priority: Priority,
        category: GoalCategory,
    ) -> Result<RecordId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::InvalidInput("goal title must not be empty".into()));
        }

        let id = format!("goal-{}", Uuid::new_v4());
        self.data.goals.push(Goal {
            id: id.clone(),
            title: title.to_string(),
            description: String::new(),
            deadline,
            progress: 0,
            priority,
            category,
            completed: false,
        });
        info!(
            goal = %id,
            title,
            %deadline,
            priority = priority.name(),
            category = category.name(),
            "goal added"
        );
        self.award_xp(XP_GOAL_CREATED, "goal created");
        Ok(id)
    }

    /// Log a mock test. Accuracy is derived from the marks, rounded to two
    /// decimals, and the reward depends on it.
    pub fn add_test(&mut self, entry: NewTest) -> Result<TestLogged> {
        let per_subject = entry.exam.subject_max_marks();
        if let Some(subject) = Subject::ALL
            .iter()
            .zip(entry.marks)
            .find_map(|(s, m)| (m > per_subject).then_some(s))
        {
            return Err(TrackerError::InvalidInput(format!(
                "{subject} marks exceed {per_subject}"
            )));
        }

        let score: u32 = entry.marks.iter().sum();
        let total_marks = per_subject * Subject::ALL.len() as u32;
        let accuracy = round2(score as f64 / total_marks as f64 * 100.0);
        let subject = |marks: u32| SubjectScore {
            score: marks,
            total: per_subject,
            accuracy: round2(marks as f64 / per_subject as f64 * 100.0),
        };
        let weak_topics: Vec<String> = entry
            .weak_topics
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let id = format!("test-{}", Uuid::new_v4());
        self.data.tests.push(MockTest {
            id: id.clone(),
            exam: entry.exam,
            date: entry.date,
            score,
            total_marks,
            accuracy,
            time_spent: entry.time_spent,
            physics: subject(entry.marks[0]),
            chemistry: subject(entry.marks[1]),
            mathematics: subject(entry.marks[2]),
            weak_topics,
        });
        info!(
            test = %id,
            exam = entry.exam.name(),
            score,
            total_marks,
            accuracy,
            "mock test logged"
        );

        let xp_awarded = mock_test_reward(accuracy);
        self.award_xp(xp_awarded, "mock test logged");
        Ok(TestLogged {
            id,
            accuracy,
            xp_awarded,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(Dataset::sample())
    }
}
