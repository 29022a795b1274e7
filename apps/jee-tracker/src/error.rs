//! Tracker error types.

use thiserror::Error;

/// Errors raised by tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// No topic with the given id.
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    /// No timetable task with the given id.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// No goal with the given id.
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    /// No flashcard with the given id.
    #[error("Flashcard not found: {0}")]
    CardNotFound(String),

    /// Time slot not in `H:MM-H:MM` form, or end not after start.
    #[error("Invalid time slot '{0}', expected H:MM-H:MM")]
    InvalidTimeSlot(String),

    /// Rejected user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
