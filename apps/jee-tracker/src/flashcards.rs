//! Flashcard filtering, browsing and study-session scoring.
//!
//! Review dates come from the dataset as-is. Nothing here reschedules a card.

use crate::models::{Difficulty, Flashcard, RecordId, Subject};
use crate::syllabus::percent;
use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use serde::Serialize;

/// Which cards to study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    All,
    Due,
    Difficult,
}

impl StudyMode {
    pub const ALL: [StudyMode; 3] = [StudyMode::All, StudyMode::Due, StudyMode::Difficult];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Cards",
            Self::Due => "Due for Review",
            Self::Difficult => "Difficult",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Due,
            Self::Due => Self::Difficult,
            Self::Difficult => Self::All,
        }
    }
}

pub fn is_due(card: &Flashcard, today: NaiveDate) -> bool {
    card.next_review <= today
}

/// Apply the subject filter (`None` keeps every subject), then the study mode.
pub fn filter_cards<'a>(
    cards: &'a [Flashcard],
    subject: Option<Subject>,
    mode: StudyMode,
    today: NaiveDate,
) -> Vec<&'a Flashcard> {
    cards
        .iter()
        .filter(|c| subject.map_or(true, |s| c.subject == s))
        .filter(|c| match mode {
            StudyMode::All => true,
            StudyMode::Due => is_due(c, today),
            StudyMode::Difficult => c.difficulty == Difficulty::Hard,
        })
        .collect()
}

pub fn due_count(cards: &[Flashcard], today: NaiveDate) -> usize {
    cards.iter().filter(|c| is_due(c, today)).count()
}

pub fn hard_count(cards: &[Flashcard]) -> usize {
    cards
        .iter()
        .filter(|c| c.difficulty == Difficulty::Hard)
        .count()
}

/// Card collection overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub total: usize,
    pub due: usize,
    pub by_subject: Vec<(Subject, usize)>,
    pub by_difficulty: Vec<(Difficulty, usize)>,
}

pub fn card_summary(cards: &[Flashcard], today: NaiveDate) -> CardSummary {
    CardSummary {
        total: cards.len(),
        due: due_count(cards, today),
        by_subject: Subject::ALL
            .iter()
            .map(|&s| (s, cards.iter().filter(|c| c.subject == s).count()))
            .collect(),
        by_difficulty: Difficulty::ALL
            .iter()
            .map(|&d| (d, cards.iter().filter(|c| c.difficulty == d).count()))
            .collect(),
    }
}

/// Cursor over a filtered set of cards. Each card can be scored once per pass.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<RecordId>,
    scored: Vec<bool>,
    index: usize,
    flipped: bool,
}

impl Deck {
    pub fn new(cards: Vec<RecordId>) -> Self {
        let scored = vec![false; cards.len()];
        Self {
            cards,
            scored,
            index: 0,
            flipped: false,
        }
    }

    /// Replace the cards and rewind.
    pub fn reset(&mut self, cards: Vec<RecordId>) {
        *self = Self::new(cards);
    }

    /// Rewind to the first card and forget which cards were scored.
    pub fn restart(&mut self) {
        self.scored.iter_mut().for_each(|s| *s = false);
        self.index = 0;
        self.flipped = false;
    }

    pub fn current(&self) -> Option<&RecordId> {
        self.cards.get(self.index)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        if !self.cards.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.cards.len()
    }

    /// Whether the current card was already scored in this pass.
    pub fn is_scored(&self) -> bool {
        self.scored.get(self.index).copied().unwrap_or(false)
    }

    /// Mark the current card scored. Returns false if there is no card or
    /// it was already scored.
    pub fn score(&mut self) -> bool {
        match self.scored.get_mut(self.index) {
            Some(scored) if !*scored => {
                *scored = true;
                true
            }
            _ => false,
        }
    }

    pub fn scored_count(&self) -> usize {
        self.scored.iter().filter(|s| **s).count()
    }

    /// Every card has been scored.
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.scored.iter().all(|s| *s)
    }

    /// Advance unless already on the last card. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.flipped = false;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.flipped = false;
        true
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::thread_rng());
        self.restart();
    }
}

/// Running score for a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub correct: u32,
    pub incorrect: u32,
    pub started_at: DateTime<Utc>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            started_at,
        }
    }

    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded accuracy, 0 before any answer.
    pub fn accuracy(&self) -> u8 {
        percent(self.correct as usize, self.total() as usize)
    }

    /// Whole minutes since the session started, never negative.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.started_at).num_minutes().max(0)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;
    use chrono::TimeZone;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    fn hard_card() -> Flashcard {
        Flashcard {
            id: "fc-hard".into(),
            subject: Subject::Physics,
            topic: "Optics".into(),
            question: "Lens maker's formula?".into(),
            answer: "1/f = (n-1)(1/R1 - 1/R2)".into(),
            difficulty: Difficulty::Hard,
            last_reviewed: day(1),
            next_review: day(30),
        }
    }

    #[test]
    fn test_filter_all_and_by_subject() {
        let data = Dataset::sample();
        assert_eq!(filter_cards(&data.flashcards, None, StudyMode::All, day(1)).len(), 3);

        let chem = filter_cards(&data.flashcards, Some(Subject::Chemistry), StudyMode::All, day(1));
        assert_eq!(chem.len(), 1);
        assert_eq!(chem[0].id, "fc2");
    }

    #[test]
    fn test_due_filter_is_inclusive_of_today() {
        let data = Dataset::sample();
        assert_eq!(filter_cards(&data.flashcards, None, StudyMode::Due, day(15)).len(), 0);

        let due = filter_cards(&data.flashcards, None, StudyMode::Due, day(16));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "fc2");

        assert_eq!(due_count(&data.flashcards, day(18)), 3);
    }

    #[test]
    fn test_difficult_filter() {
        let mut data = Dataset::sample();
        assert!(filter_cards(&data.flashcards, None, StudyMode::Difficult, day(1)).is_empty());

        data.flashcards.push(hard_card());
        let hard = filter_cards(&data.flashcards, None, StudyMode::Difficult, day(1));
        assert_eq!(hard.len(), 1);
        assert_eq!(hard_count(&data.flashcards), 1);
        assert!(filter_cards(&data.flashcards, Some(Subject::Mathematics), StudyMode::Difficult, day(1)).is_empty());
    }

    #[test]
    fn test_card_summary() {
        let data = Dataset::sample();
        let summary = card_summary(&data.flashcards, day(17));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.due, 2);
        assert_eq!(summary.by_subject, vec![
            (Subject::Physics, 1),
            (Subject::Chemistry, 1),
            (Subject::Mathematics, 1),
        ]);
        assert_eq!(summary.by_difficulty[0], (Difficulty::Easy, 2));
        assert_eq!(summary.by_difficulty[2], (Difficulty::Hard, 0));
    }

    #[test]
    fn test_deck_navigation_is_bounded() {
        let mut deck = Deck::new(vec!["a".into(), "b".into()]);
        assert_eq!(deck.current().map(String::as_str), Some("a"));
        assert!(!deck.prev());

        deck.flip();
        assert!(deck.is_flipped());
        assert!(deck.next());
        assert!(!deck.is_flipped());
        assert_eq!(deck.current().map(String::as_str), Some("b"));
        assert!(!deck.next());
        assert_eq!(deck.position(), 1);

        assert!(deck.prev());
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_deck_shuffle_and_reset_rewind() {
        let ids: Vec<RecordId> = (0..10).map(|i| format!("c{i}")).collect();
        let mut deck = Deck::new(ids.clone());
        deck.next();
        deck.flip();

        deck.shuffle();
        assert_eq!(deck.position(), 0);
        assert!(!deck.is_flipped());
        assert_eq!(deck.len(), 10);

        deck.next();
        deck.reset(vec!["x".into()]);
        assert_eq!(deck.position(), 0);
        assert_eq!(deck.current().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_deck_scores_each_card_once() {
        let mut deck = Deck::new(vec!["a".into(), "b".into()]);
        assert!(deck.score());
        assert!(deck.is_scored());
        assert!(!deck.score());
        assert!(!deck.is_complete());

        deck.next();
        assert!(!deck.is_scored());
        assert!(deck.score());
        assert!(deck.is_complete());
        assert_eq!(deck.scored_count(), 2);

        // Going back does not reopen a scored card.
        deck.prev();
        assert!(!deck.score());

        deck.restart();
        assert_eq!(deck.position(), 0);
        assert_eq!(deck.scored_count(), 0);
        assert!(deck.score());
    }

    #[test]
    fn test_shuffle_clears_scores() {
        let mut deck = Deck::new(vec!["a".into(), "b".into(), "c".into()]);
        deck.score();
        deck.next();
        deck.score();
        deck.shuffle();
        assert_eq!(deck.scored_count(), 0);
        assert!(!deck.is_complete());
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = Deck::default();
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        deck.flip();
        assert!(!deck.is_flipped());
        assert!(!deck.next());
        assert!(!deck.score());
        assert!(!deck.is_complete());
    }

    #[test]
    fn test_session_accuracy() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.accuracy(), 0);

        stats.record(true);
        stats.record(true);
        stats.record(false);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.accuracy(), 67);
    }

    #[test]
    fn test_session_elapsed_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 12, 16, 9, 0, 0).unwrap();
        let stats = SessionStats::starting_at(start);
        assert_eq!(stats.elapsed_minutes(start + chrono::Duration::seconds(150)), 2);
        assert_eq!(stats.elapsed_minutes(start - chrono::Duration::minutes(5)), 0);
    }
}
