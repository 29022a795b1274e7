//! Study timer and quote rotation.

use crate::models::Subject;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// What the timer is tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyTarget {
    pub subject: Subject,
    pub topic: String,
}

/// A finished study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    pub target: StudyTarget,
    pub elapsed: Duration,
}

/// Stopwatch for a study block. Pausing keeps the accumulated time.
#[derive(Debug, Clone)]
pub struct StudyTimer {
    target: Option<StudyTarget>,
    /// When the current run started (None if paused or idle).
    started_at: Option<DateTime<Utc>>,
    /// Time banked from earlier runs.
    accumulated: Duration,
}

impl StudyTimer {
    pub fn new() -> Self {
        Self {
            target: None,
            started_at: None,
            accumulated: Duration::zero(),
        }
    }

    /// Start timing a new target, discarding any previous session.
    pub fn start(&mut self, subject: Subject, topic: &str) {
        self.start_at(subject, topic, Utc::now());
    }

    pub fn start_at(&mut self, subject: Subject, topic: &str, now: DateTime<Utc>) {
        self.target = Some(StudyTarget {
            subject,
            topic: topic.to_string(),
        });
        self.accumulated = Duration::zero();
        self.started_at = Some(now);
        info!(%subject, topic, "study timer started");
    }

    pub fn pause_at(&mut self, now: DateTime<Utc>) {
        if let Some(started) = self.started_at.take() {
            self.accumulated = self.accumulated + (now - started).max(Duration::zero());
        }
    }

    pub fn resume_at(&mut self, now: DateTime<Utc>) {
        if self.target.is_some() && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Pause a running timer or resume a paused one.
    pub fn toggle(&mut self) {
        let now = Utc::now();
        if self.is_running() {
            self.pause_at(now);
        } else {
            self.resume_at(now);
        }
    }

    /// Stop and return the finished session, if one was in progress.
    pub fn stop(&mut self) -> Option<StudySession> {
        self.stop_at(Utc::now())
    }

    pub fn stop_at(&mut self, now: DateTime<Utc>) -> Option<StudySession> {
        self.pause_at(now);
        let target = self.target.take()?;
        let elapsed = std::mem::replace(&mut self.accumulated, Duration::zero());
        info!(
            subject = %target.subject,
            topic = %target.topic,
            minutes = elapsed.num_minutes(),
            seconds = elapsed.num_seconds(),
            "study timer stopped"
        );
        Some(StudySession { target, elapsed })
    }

    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + (now - started).max(Duration::zero()),
            None => self.accumulated,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Utc::now())
    }

    pub fn target(&self) -> Option<&StudyTarget> {
        self.target.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Elapsed time as `MM:SS`. Minutes keep counting past an hour.
    pub fn format_elapsed(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Cycles through quotes on a fixed interval.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    index: usize,
    len: usize,
    interval: Duration,
    last_switch: DateTime<Utc>,
}

impl QuoteRotator {
    pub fn new(len: usize, interval_secs: u64) -> Self {
        Self::new_at(len, interval_secs, Utc::now())
    }

    pub fn new_at(len: usize, interval_secs: u64, now: DateTime<Utc>) -> Self {
        Self {
            index: 0,
            len,
            interval: Duration::seconds(interval_secs.max(1) as i64),
            last_switch: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next quote.
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Utc::now())
    }

    /// Advance once the interval has elapsed. Returns whether it moved.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.len < 2 || now - self.last_switch < self.interval {
            return false;
        }
        self.advance();
        self.last_switch = now;
        true
    }
}
